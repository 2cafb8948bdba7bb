//! Gemini API連携（画像編集）

use super::fetch;
use crate::host;
use photoclean_common::gemini::{
    self, endpoint, model_for, GenerateContentRequest, GenerateContentResponse,
    DEFAULT_API_BASE_URL,
};
use photoclean_common::{EditError, EditRequest, ImageEditor};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// `{endpoint}?key={api_key}`
fn request_url(base_url: &str, model: &str, api_key: &str) -> String {
    format!("{}?key={}", endpoint(base_url, model), api_key)
}

fn transport_error(e: JsValue) -> EditError {
    gemini::error_from_transport(&format!("{:?}", e))
}

/// ブラウザの `fetch` で呼び出すGeminiクライアント
///
/// APIキーは呼び出しのたびにホストから読む。
#[derive(Debug, Clone)]
pub struct GeminiEditor {
    base_url: String,
}

impl Default for GeminiEditor {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ImageEditor for GeminiEditor {
    async fn edit_image(&self, request: EditRequest<'_>) -> Result<String, EditError> {
        let api_key = host::api_key().unwrap_or_default();
        let model = model_for(request.resolution);
        let body = GenerateContentRequest::for_edit(
            request.image,
            request.mime_type,
            request.prompt,
            request.resolution,
        );
        let body = serde_json::to_string(&body).map_err(|e| EditError::Transport(e.to_string()))?;

        let url = request_url(&self.base_url, model, &api_key);
        let resp = fetch(&url, Some(&body)).await.map_err(transport_error)?;

        if !resp.ok() {
            let text = match resp.text() {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .ok()
                    .and_then(|v| v.as_string())
                    .unwrap_or_default(),
                Err(_) => String::new(),
            };
            return Err(gemini::error_from_response(resp.status(), &text));
        }

        let json = JsFuture::from(resp.json().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;
        let response: GenerateContentResponse =
            serde_wasm_bindgen::from_value(json).map_err(|_| EditError::InvalidResponse)?;
        response.into_image_data_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photoclean_common::gemini::{FAST_MODEL, PRO_MODEL};
    use photoclean_common::Resolution;

    #[test]
    fn test_request_url_fast_model() {
        let url = request_url(DEFAULT_API_BASE_URL, FAST_MODEL, "abc");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-image:generateContent?key=abc"
        );
    }

    #[test]
    fn test_request_url_pro_model() {
        let url = request_url(DEFAULT_API_BASE_URL, model_for(Resolution::TwoK), "abc");
        assert!(url.contains(PRO_MODEL));
        assert!(url.ends_with(":generateContent?key=abc"));
    }

    #[test]
    fn test_request_body_serialize() {
        let body = GenerateContentRequest::for_edit(
            "data:image/jpeg;base64,/9j/4AAQ",
            "image/jpeg",
            "remove the lamp post",
            Resolution::OneK,
        );
        let json = serde_json::to_string(&body).expect("シリアライズ失敗");
        assert!(json.contains("\"inlineData\""));
        assert!(json.contains("\"data\":\"/9j/4AAQ\""));
        assert!(json.contains("remove the lamp post"));
        assert!(!json.contains("generationConfig"));
    }

    #[test]
    fn test_response_deserialize() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "AAAA"}}]
                }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(
            response.into_image_data_url().expect("画像なし"),
            "data:image/png;base64,AAAA"
        );
    }
}
