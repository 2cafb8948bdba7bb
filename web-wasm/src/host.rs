//! ホスト環境（AI Studio）の提供機能
//!
//! `window.aistudio` のキー選択と、ホストが注入する `process.env.API_KEY`。

use photoclean_common::KeyGate;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = aistudio, js_name = "hasSelectedApiKey", catch)]
    async fn has_selected_api_key_js() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = aistudio, js_name = "openSelectKey", catch)]
    async fn open_select_key_js() -> Result<JsValue, JsValue>;
}

/// リクエスト時点のAPIキー
///
/// キー選択でホストが差し替えるため、毎回 `process.env.API_KEY` を読み直す。
/// なければビルド時の `API_KEY`。
pub fn api_key() -> Option<String> {
    let global = js_sys::global();
    js_sys::Reflect::get(&global, &JsValue::from_str("process"))
        .and_then(|process| js_sys::Reflect::get(&process, &JsValue::from_str("env")))
        .and_then(|env| js_sys::Reflect::get(&env, &JsValue::from_str("API_KEY")))
        .ok()
        .and_then(|key| key.as_string())
        .or_else(|| option_env!("API_KEY").map(str::to_string))
        .filter(|key| !key.trim().is_empty())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HostKeyGate;

impl KeyGate for HostKeyGate {
    /// ホストがない場合は注入済みのキーがあるかで判定
    async fn has_selected_api_key(&self) -> bool {
        match has_selected_api_key_js().await {
            Ok(selected) => selected.as_bool().unwrap_or(false),
            Err(_) => api_key().is_some(),
        }
    }

    async fn open_select_key(&self) {
        if let Err(e) = open_select_key_js().await {
            gloo::console::warn!("key selection unavailable:", e);
        }
    }
}
