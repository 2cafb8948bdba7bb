//! ブラウザの localStorage を使うキー・バリューストア

use gloo::storage::{LocalStorage, Storage};
use photoclean_common::{Error, KeyValueStore, Result};
use wasm_bindgen::JsValue;

/// `localStorage` そのもの（状態は持たない）
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

fn storage_error(e: JsValue) -> Error {
    Error::Storage(format!("{:?}", e))
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw().get_item(key).map_err(storage_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw().set_item(key, value).map_err(storage_error)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        LocalStorage::raw().remove_item(key).map_err(storage_error)
    }
}
