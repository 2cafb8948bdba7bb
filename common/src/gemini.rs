//! Gemini 画像編集APIのワイヤーフォーマット
//!
//! リクエスト生成・レスポンス解析・エラー分類のみを扱い、
//! HTTP送信はWeb（fetch）とCLI（reqwest）がそれぞれ実装する。

use serde::{Deserialize, Serialize};

use crate::data_url;
use crate::error::EditError;
use crate::prompts::build_removal_prompt;
use crate::types::Resolution;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// 1K用の高速モデル
pub const FAST_MODEL: &str = "gemini-2.5-flash-image";
/// 2K/4K用の高品質モデル（imageSize 指定可）
pub const PRO_MODEL: &str = "gemini-3-pro-image-preview";

pub fn model_for(resolution: Resolution) -> &'static str {
    match resolution {
        Resolution::OneK => FAST_MODEL,
        Resolution::TwoK | Resolution::FourK => PRO_MODEL,
    }
}

/// `{base}/models/{model}:generateContent`
pub fn endpoint(base_url: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", base_url.trim_end_matches('/'), model)
}

/// Gemini APIリクエスト
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub image_config: ImageConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub image_size: String,
}

impl GenerateContentRequest {
    /// オブジェクト除去リクエストを組み立てる
    ///
    /// # Arguments
    /// * `image` - data URL（プレフィックスは送信前に除去）
    /// * `mime_type` - 画像のMIMEタイプ
    /// * `removal` - 除去指示
    /// * `resolution` - 出力解像度（高品質モデルのみ imageSize として送る）
    pub fn for_edit(image: &str, mime_type: &str, removal: &str, resolution: Resolution) -> Self {
        let parts = vec![
            Part::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.to_string(),
                    data: data_url::payload(image).to_string(),
                },
            },
            Part::Text {
                text: build_removal_prompt(removal),
            },
        ];

        // 高速モデルは imageSize を受け付けない
        let generation_config = (model_for(resolution) == PRO_MODEL).then(|| GenerationConfig {
            image_config: ImageConfig {
                image_size: resolution.as_str().to_string(),
            },
        });

        Self {
            contents: vec![Content { parts }],
            generation_config,
        }
    }
}

/// Gemini APIレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

impl GenerateContentResponse {
    /// 最初の画像パートを data URL にして返す
    pub fn into_image_data_url(self) -> Result<String, EditError> {
        let parts = self
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .ok_or(EditError::InvalidResponse)?;

        parts
            .into_iter()
            .find_map(|part| part.inline_data)
            .map(|image| format!("data:{};base64,{}", image.mime_type, image.data))
            .ok_or(EditError::NoImageData)
    }
}

/// エラーレスポンス `{"error": {"code", "message", "status"}}`
#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// 既知の失敗パターン（キー不正・クォータ超過）に分類する
///
/// どちらにも当たらなければ `None`。
pub fn classify_failure(status: Option<u16>, detail: &str) -> Option<EditError> {
    if detail.contains("entity was not found") {
        return Some(EditError::KeyNotFound);
    }
    if status == Some(429)
        || detail.contains("RESOURCE_EXHAUSTED")
        || detail.contains("429")
        || detail.contains("quota")
    {
        return Some(EditError::QuotaExceeded);
    }
    None
}

/// HTTPエラー（非2xx）をEditErrorに変換
pub fn error_from_response(status: u16, body: &str) -> EditError {
    if let Some(known) = classify_failure(Some(status), body) {
        return known;
    }
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => {
            if parsed.error.status.is_empty() {
                parsed.error.message
            } else {
                format!("{}: {}", parsed.error.status, parsed.error.message)
            }
        }
        _ => body.trim().to_string(),
    };
    EditError::Api { status, message }
}

/// 通信エラー（ステータスなし）をEditErrorに変換
pub fn error_from_transport(detail: &str) -> EditError {
    classify_failure(None, detail).unwrap_or_else(|| EditError::Transport(detail.to_string()))
}
