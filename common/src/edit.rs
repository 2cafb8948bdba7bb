//! 画像編集のオーケストレーション
//!
//! ソース取得 → MIMEタイプ判定 → モデル呼び出し。
//! HTTPやホスト機能はプラットフォームごとにトレイトで差し替える。

use crate::data_url;
use crate::error::EditError;
use crate::types::{ImageRecord, Resolution};

/// リモート画像の取得に使う公開CORSプロキシ（`?url=` に元URLを渡す）
pub const DEFAULT_PROXY_URL: &str = "https://api.allorigins.win/raw";

/// 編集ガードを通過した依頼
///
/// `generation` は発行時のセッション世代。ログアウト等で世代が変わると結果は破棄される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTicket {
    pub generation: u64,
    pub source: ImageRecord,
    pub prompt: String,
    pub resolution: Resolution,
    pub cost: u32,
}

/// モデルに渡す入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRequest<'a> {
    /// data URL
    pub image: &'a str,
    pub mime_type: &'a str,
    pub prompt: &'a str,
    pub resolution: Resolution,
}

/// リモート画像を data URL として取得する（CORSプロキシ経由）
#[allow(async_fn_in_trait)]
pub trait ImageSource {
    async fn fetch_data_url(&self, url: &str) -> Result<String, EditError>;
}

/// 画像編集モデル
#[allow(async_fn_in_trait)]
pub trait ImageEditor {
    /// 編集結果を data URL で返す
    async fn edit_image(&self, request: EditRequest<'_>) -> Result<String, EditError>;
}

/// ホスト側のAPIキー選択機能
#[allow(async_fn_in_trait)]
pub trait KeyGate {
    async fn has_selected_api_key(&self) -> bool;
    async fn open_select_key(&self);
}

/// APIキー確認を経た合成の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// 2K/4K でキー未選択のため合成していない
    MissingKey,
    Synthesized(Result<String, EditError>),
}

impl EditOutcome {
    /// ホストのキー選択を開き直すべきか
    pub fn reopens_key_picker(&self) -> bool {
        matches!(
            self,
            EditOutcome::MissingKey | EditOutcome::Synthesized(Err(EditError::KeyNotFound))
        )
    }
}

/// APIキー確認（2K/4Kのみ）→ 合成
///
/// キー選択を開くのは呼び出し側（状態を反映したあと）。
pub async fn synthesize_with_gate<G, S, E>(
    ticket: &EditTicket,
    gate: &G,
    source: &S,
    editor: &E,
) -> EditOutcome
where
    G: KeyGate,
    S: ImageSource,
    E: ImageEditor,
{
    if ticket.resolution.requires_paid_key() && !gate.has_selected_api_key().await {
        return EditOutcome::MissingKey;
    }
    EditOutcome::Synthesized(synthesize(ticket, source, editor).await)
}

/// ソース取得からモデル呼び出しまでを実行
///
/// リトライ・タイムアウトはしない。
pub async fn synthesize<S, E>(ticket: &EditTicket, source: &S, editor: &E) -> Result<String, EditError>
where
    S: ImageSource,
    E: ImageEditor,
{
    let image = if ticket.source.is_embedded() {
        ticket.source.url.clone()
    } else {
        tracing::debug!(url = %ticket.source.url, "fetching remote source through proxy");
        source.fetch_data_url(&ticket.source.url).await?
    };

    let mime_type = data_url::mime_type(&image);
    editor
        .edit_image(EditRequest {
            image: &image,
            mime_type,
            prompt: &ticket.prompt,
            resolution: ticket.resolution,
        })
        .await
}
