//! Gemini API クライアント（reqwest）

use crate::config::Config;
use crate::error::{PhotoCleanError, Result};
use photoclean_common::gemini::{
    self, endpoint, model_for, GenerateContentRequest, GenerateContentResponse,
};
use photoclean_common::{EditError, EditRequest, ImageEditor};
use std::time::Duration;

/// 共通のHTTPクライアント（タイムアウトは設定時のみ）
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(seconds) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    builder
        .build()
        .map_err(|e| PhotoCleanError::Config(format!("HTTPクライアント初期化失敗: {e}")))
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

impl ImageEditor for GeminiClient {
    async fn edit_image(&self, request: EditRequest<'_>) -> std::result::Result<String, EditError> {
        let model = model_for(request.resolution);
        let body = GenerateContentRequest::for_edit(
            request.image,
            request.mime_type,
            request.prompt,
            request.resolution,
        );
        tracing::debug!(model, resolution = %request.resolution, "calling Gemini");

        let response = self
            .http
            .post(endpoint(&self.base_url, model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| gemini::error_from_transport(&e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| gemini::error_from_transport(&e.to_string()))?;

        if !status.is_success() {
            return Err(gemini::error_from_response(status.as_u16(), &text));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|_| EditError::InvalidResponse)?;
        parsed.into_image_data_url()
    }
}
