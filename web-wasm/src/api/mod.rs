//! 外部API（Gemini・CORSプロキシ）

pub mod gemini;
pub mod proxy;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// `fetch` の共通処理（bodyがあればJSONとしてPOST）
async fn fetch(url: &str, json_body: Option<&str>) -> Result<Response, JsValue> {
    let opts = RequestInit::new();
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = json_body {
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(body));
    } else {
        opts.set_method("GET");
    }

    let request = Request::new_with_str_and_init(url, &opts)?;
    if json_body.is_some() {
        request.headers().set("Content-Type", "application/json")?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    resp_value.dyn_into()
}
