use anyhow::Context;
use clap::Parser;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use photoclean::{cli, config, error, gemini, host, image_file, proxy, storage};
use photoclean_common::types::{EXPERTISE_LEVELS, USE_CASES};
use photoclean_common::{Preferences, Studio, View, MOCK_SIGN_IN_DELAY_MS};
use cli::{Cli, Commands};
use config::Config;
use error::PhotoCleanError;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;
    let storage_path = Config::storage_path()?;
    let store = storage::FileStore::open(&storage_path)
        .with_context(|| format!("セッションの読み込みに失敗しました: {}", storage_path.display()))?;
    let mut studio = Studio::restore(store)?;

    match cli.command {
        Commands::Login => {
            println!("✨ photoclean - サインイン\n");

            if let Some(user) = studio.user() {
                println!("すでに {} としてサインインしています", user.email);
                return Ok(());
            }

            studio.open_auth();
            studio.begin_sign_in();
            let spinner = spinner("Googleでサインイン中...");
            tokio::time::sleep(Duration::from_millis(MOCK_SIGN_IN_DELAY_MS.into())).await;
            studio.finish_sign_in();
            spinner.finish_and_clear();

            let preferences = ask_preferences();
            studio.complete_onboarding(preferences);
            studio.claim_credits();

            let credits = studio.credits();
            println!("✔ {} クレジットを受け取りました", credits.remaining());
        }

        Commands::Logout => {
            studio.logout();
            println!("✔ サインアウトしました（履歴を削除）");
        }

        Commands::Status => {
            match studio.user() {
                Some(user) => println!("ユーザー: {} <{}>", user.name, user.email),
                None => println!("ユーザー: 未サインイン"),
            }
            let credits = studio.credits();
            println!("クレジット: {} / {}", credits.remaining(), credits.total());
            println!("履歴: {}件", studio.history().len());
        }

        Commands::Edit { source, prompt, resolution, output } => {
            println!("🧽 photoclean - オブジェクト除去\n");

            if studio.user().is_none() {
                return Err(PhotoCleanError::NotSignedIn.into());
            }

            // 1. 取込み
            let path = Path::new(&source);
            if path.exists() {
                let (name, url) = image_file::read_as_data_url(path)?;
                studio.import_local(&name, url, now_ms());
            } else {
                studio.import_remote(&source, now_ms()).map_err(PhotoCleanError::from)?;
            }
            if studio.view() != View::Editor {
                return Err(PhotoCleanError::FileNotFound(source).into());
            }

            // 2. 合成
            studio.set_prompt(prompt);
            studio.set_resolution(resolution);

            let http = gemini::http_client(&config)?;
            let api_key = config.get_api_key().unwrap_or_default();
            let editor = gemini::GeminiClient::new(http.clone(), &config.api_base_url, api_key);
            let fetcher = proxy::ProxyFetcher::new(http, &config.proxy_url);
            let gate = host::CliKeyGate::new(config.clone());

            let spinner = spinner(&format!("{} で合成中...", resolution));
            let outcome = studio.execute_edit(&gate, &fetcher, &editor, now_ms).await;
            spinner.finish_and_clear();
            let record = outcome.map_err(PhotoCleanError::from)?;

            // 3. 保存
            println!("✔ {} ({})", record.name, record.id);
            if let Some(output) = output {
                image_file::write_data_url(&output, &record.url)?;
                println!("✔ 結果を保存: {}", output.display());
            }
            let credits = studio.credits();
            println!("クレジット残高: {} / {}", credits.remaining(), credits.total());
        }

        Commands::History { search, resolution } => {
            studio.set_search_query(search);
            studio.set_gallery_filter(resolution);

            let records = studio.filtered_history();
            if records.is_empty() {
                println!("該当する履歴はありません");
            }
            for record in records {
                println!(
                    "{:<20} {:<16} {:<4} {}{}",
                    record.id,
                    format_timestamp(record.created_at),
                    record.resolution.map(|r| r.as_str()).unwrap_or("-"),
                    record.name,
                    record
                        .prompt
                        .as_deref()
                        .map(|p| format!("  \"{p}\""))
                        .unwrap_or_default(),
                );
            }
        }

        Commands::Delete { id } => {
            let removed = studio
                .delete_record(&id)
                .ok_or_else(|| PhotoCleanError::RecordNotFound(id.clone()))?;
            println!("✔ 削除しました: {}", removed.name);
            if studio.history().is_empty() {
                // 空の履歴は保存されない
                println!("  ※ 最後の1件のため、次の編集または logout まで保存済みの履歴には残ります");
            }
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  APIエンドポイント: {}", config.api_base_url);
                println!("  プロキシ: {}", config.proxy_url);
                println!(
                    "  タイムアウト: {}",
                    config
                        .timeout_seconds
                        .map(|s| format!("{s}秒"))
                        .unwrap_or_else(|| "なし".into())
                );
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn format_timestamp(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// オンボーディングの質問（端末でなければスキップ）
fn ask_preferences() -> Option<Preferences> {
    let use_case = Select::new()
        .with_prompt("What will you use the studio for?")
        .items(&USE_CASES)
        .default(0)
        .interact_opt()
        .ok()??;
    let expertise = Select::new()
        .with_prompt("How would you describe your editing experience?")
        .items(&EXPERTISE_LEVELS)
        .default(0)
        .interact_opt()
        .ok()??;

    Some(Preferences {
        use_case: USE_CASES[use_case].to_string(),
        expertise: EXPERTISE_LEVELS[expertise].to_string(),
    })
}
