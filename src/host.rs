//! CLIでのAPIキー選択（設定ファイル・環境変数）

use crate::config::Config;
use dialoguer::Password;
use photoclean_common::KeyGate;
use std::cell::RefCell;

pub struct CliKeyGate {
    config: RefCell<Config>,
}

impl CliKeyGate {
    pub fn new(config: Config) -> Self {
        Self {
            config: RefCell::new(config),
        }
    }
}

impl KeyGate for CliKeyGate {
    async fn has_selected_api_key(&self) -> bool {
        self.config.borrow().get_api_key().is_ok()
    }

    /// 対話的にキーを入力させて保存する（端末でなければ案内のみ）
    async fn open_select_key(&self) {
        let entered = Password::new()
            .with_prompt("Gemini API key (paid tier for 2K/4K)")
            .allow_empty_password(true)
            .interact();

        match entered {
            Ok(key) if !key.trim().is_empty() => {
                if let Err(e) = self.config.borrow_mut().set_api_key(key.trim().to_string()) {
                    tracing::warn!(error = %e, "failed to save API key");
                } else {
                    println!("✔ APIキーを保存しました。もう一度実行してください");
                }
            }
            Ok(_) => println!("APIキーは変更されていません"),
            Err(e) => {
                tracing::warn!(error = %e, "key prompt unavailable");
                println!("`photoclean config --set-api-key YOUR_KEY` でAPIキーを設定してください");
            }
        }
    }
}
