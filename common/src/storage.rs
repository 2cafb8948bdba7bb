//! セッション・履歴の永続化
//!
//! ブラウザの localStorage とCLIのファイルストアを `KeyValueStore` で抽象化する。
//! 値はJSON文字列。スキーマバージョンはない。

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::credits::CreditState;
use crate::error::Result;
use crate::types::{ImageRecord, User};

pub const USER_KEY: &str = "pc_premium_user";
pub const HISTORY_KEY: &str = "pc_history";
pub const CREDITS_KEY: &str = "pc_credits";

/// 文字列キー・文字列値のストア
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// メモリ上のストア（テスト用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// 起動時に読み込んだ状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub user: Option<User>,
    pub history: Vec<ImageRecord>,
    pub credits: Option<CreditState>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// 保存済みのユーザー・履歴・残高を読み込む
    ///
    /// 壊れた値は `Error::Json` としてそのまま返す（復旧はしない）。
    pub fn load(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            user: self.read(USER_KEY)?,
            history: self.read(HISTORY_KEY)?.unwrap_or_default(),
            credits: self.read(CREDITS_KEY)?,
        })
    }

    pub fn save_user(&mut self, user: &User) -> Result<()> {
        self.write(USER_KEY, user)
    }

    /// 履歴全体を書き戻す。空の履歴は書かない。
    pub fn save_history(&mut self, history: &[ImageRecord]) -> Result<()> {
        if history.is_empty() {
            return Ok(());
        }
        self.write(HISTORY_KEY, history)
    }

    pub fn save_credits(&mut self, credits: &CreditState) -> Result<()> {
        self.write(CREDITS_KEY, credits)
    }

    /// ログアウト時に全キーを削除
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(USER_KEY)?;
        self.store.remove(HISTORY_KEY)?;
        self.store.remove(CREDITS_KEY)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)
    }
}
