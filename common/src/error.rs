//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Invalid credit state: {0}")]
    InvalidCredits(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 画像編集（ソース取得・モデル呼び出し）のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// "Requested entity was not found"（APIキー不正・未選択）
    #[error("STUDIO_KEY_ERROR")]
    KeyNotFound,

    /// レート制限・クォータ超過
    #[error("QUOTA_EXCEEDED")]
    QuotaExceeded,

    #[error("Invalid response format from AI engine.")]
    InvalidResponse,

    #[error("No image data part was returned from the model.")]
    NoImageData,

    #[error("Source fetch failed: {0}")]
    Fetch(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),
}

/// ユーザーに表示する操作エラー
///
/// `Display` がそのまま画面のメッセージになる。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StudioError {
    #[error("Nothing to edit yet.")]
    NothingToEdit,

    #[error("An edit is already in progress.")]
    EditInFlight,

    #[error("Insufficient studio balance.")]
    InsufficientCredits { required: u32, remaining: u32 },

    #[error("High-resolution exports (2K/4K) require a paid API key.")]
    MissingApiKey,

    #[error("The provided URL is invalid.")]
    InvalidUrl,

    #[error("{}", synthesis_message(.0))]
    Synthesis(EditError),

    /// 実行中にログアウト・エディタ終了があり、結果を破棄した
    #[error("The session changed before the edit finished.")]
    SessionChanged,
}

impl StudioError {
    /// 画面にメッセージを出さないガード（ボタン無効化で防ぐもの）
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            StudioError::NothingToEdit | StudioError::EditInFlight | StudioError::SessionChanged
        )
    }
}

fn synthesis_message(error: &EditError) -> &'static str {
    match error {
        EditError::KeyNotFound => {
            "Synthesis failed. The selected API key was not found; choose a different key."
        }
        EditError::QuotaExceeded => {
            "Synthesis failed. The API quota is exhausted; wait a moment and retry."
        }
        _ => "Synthesis failed. Check your API key or connection.",
    }
}
