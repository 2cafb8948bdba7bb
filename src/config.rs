use crate::error::{PhotoCleanError, Result};
use photoclean_common::gemini::DEFAULT_API_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use photoclean_common::edit::DEFAULT_PROXY_URL;

/// APIキーを読む環境変数（先頭が優先）
const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub proxy_url: String,
    /// 省略時はタイムアウトなし
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.into(),
            proxy_url: DEFAULT_PROXY_URL.into(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PhotoCleanError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photoclean"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// セッション（ユーザー・履歴・残高）の保存先
    pub fn storage_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("storage.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        self.resolve_api_key(|name| std::env::var(name).ok())
    }

    /// 環境変数を優先してAPIキーを決める
    pub fn resolve_api_key(&self, env: impl Fn(&str) -> Option<String>) -> Result<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| env(name))
            .chain(self.api_key.clone())
            .find(|key| !key.trim().is_empty())
            .ok_or(PhotoCleanError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}
