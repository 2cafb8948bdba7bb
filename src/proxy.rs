//! リモート画像の取得（CORSプロキシ経由）

use crate::image_file::sniff_mime_type;
use photoclean_common::{data_url, EditError, ImageSource};
use reqwest::header::CONTENT_TYPE;

#[derive(Debug, Clone)]
pub struct ProxyFetcher {
    http: reqwest::Client,
    proxy_url: String,
}

impl ProxyFetcher {
    pub fn new(http: reqwest::Client, proxy_url: impl Into<String>) -> Self {
        Self {
            http,
            proxy_url: proxy_url.into(),
        }
    }
}

impl ImageSource for ProxyFetcher {
    async fn fetch_data_url(&self, url: &str) -> Result<String, EditError> {
        let response = self
            .http
            .get(&self.proxy_url)
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| EditError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EditError::Fetch(format!("proxy returned {status}")));
        }

        let declared = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_string())
            .filter(|value| value.starts_with("image/"));

        let bytes = response
            .bytes()
            .await
            .map_err(|e| EditError::Fetch(e.to_string()))?;

        let mime_type = declared
            .or_else(|| sniff_mime_type(&bytes).map(str::to_string))
            .unwrap_or_else(|| "application/octet-stream".to_string());
        tracing::debug!(url, mime_type = %mime_type, bytes = bytes.len(), "remote source fetched");

        Ok(data_url::encode(&mime_type, &bytes))
    }
}
