//! リモート画像の取得（CORSプロキシ経由）

use super::fetch;
use photoclean_common::edit::DEFAULT_PROXY_URL;
use photoclean_common::{EditError, ImageSource};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

fn fetch_error(e: JsValue) -> EditError {
    EditError::Fetch(format!("{:?}", e))
}

#[derive(Debug, Clone)]
pub struct ProxyFetcher {
    proxy_url: String,
}

impl Default for ProxyFetcher {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
        }
    }
}

impl ImageSource for ProxyFetcher {
    /// 取得したBlobをそのまま data URL に読み込む（MIMEタイプはレスポンスのもの）
    async fn fetch_data_url(&self, url: &str) -> Result<String, EditError> {
        let target = format!(
            "{}?url={}",
            self.proxy_url,
            String::from(js_sys::encode_uri_component(url))
        );
        let resp = fetch(&target, None).await.map_err(fetch_error)?;
        if !resp.ok() {
            return Err(EditError::Fetch(format!("proxy returned {}", resp.status())));
        }

        let blob: web_sys::Blob = JsFuture::from(resp.blob().map_err(fetch_error)?)
            .await
            .map_err(fetch_error)?
            .dyn_into()
            .map_err(fetch_error)?;

        gloo::file::futures::read_as_data_url(&gloo::file::Blob::from(blob))
            .await
            .map_err(|e| EditError::Fetch(e.to_string()))
    }
}
