use photoclean_common::StudioError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoCleanError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`photoclean config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("サインインしていません。`photoclean login` を実行してください")]
    NotSignedIn,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("履歴に見つかりません: {0}")]
    RecordNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] photoclean_common::Error),

    /// 画面に出すメッセージをそのまま表示
    #[error(transparent)]
    Studio(#[from] StudioError),
}

pub type Result<T> = std::result::Result<T, PhotoCleanError>;
