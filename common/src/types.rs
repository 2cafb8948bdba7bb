//! スタジオのデータモデル
//!
//! WebとCLIで共有される型:
//! - Resolution: 出力解像度（1K/2K/4K）
//! - ImageRecord: アップロード画像・編集結果
//! - User: サインイン済みユーザー
//! - View: 画面

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 出力解像度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Resolution {
    #[default]
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::OneK, Resolution::TwoK, Resolution::FourK];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::OneK => "1K",
            Resolution::TwoK => "2K",
            Resolution::FourK => "4K",
        }
    }

    /// 1回の編集で消費するクレジット
    pub fn cost(&self) -> u32 {
        match self {
            Resolution::OneK => 1,
            Resolution::TwoK => 2,
            Resolution::FourK => 3,
        }
    }

    /// 有料APIキーが必要か（2K/4K）
    pub fn requires_paid_key(&self) -> bool {
        !matches!(self, Resolution::OneK)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1K" => Ok(Resolution::OneK),
            "2K" => Ok(Resolution::TwoK),
            "4K" => Ok(Resolution::FourK),
            other => Err(format!("unknown resolution: {other}")),
        }
    }
}

/// 画像レコード（履歴の1件）
///
/// アップロード時は `resolution` / `prompt` / `original_url` なし。
/// 編集成功時は全フィールドが埋まる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// data URL またはリモートURL
    pub url: String,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    /// 作成日時（UNIXエポックからのミリ秒）
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

pub const REMOTE_ASSET_NAME: &str = "Remote Asset";

impl ImageRecord {
    /// アップロード・URL取込みで作られるレコード
    pub fn imported(name: impl Into<String>, url: impl Into<String>, now_ms: i64) -> Self {
        Self {
            url: url.into(),
            id: now_ms.to_string(),
            name: name.into(),
            original_url: None,
            created_at: now_ms,
            resolution: None,
            prompt: None,
        }
    }

    /// 編集結果のレコード（`original_url` は元画像）
    pub fn edited(
        source: &ImageRecord,
        result_url: String,
        prompt: &str,
        resolution: Resolution,
        now_ms: i64,
    ) -> Self {
        Self {
            url: result_url,
            id: format!("edit-{now_ms}"),
            name: format!("Cleaned {}", source.name),
            original_url: Some(source.url.clone()),
            created_at: now_ms,
            resolution: Some(resolution),
            prompt: Some(prompt.to_string()),
        }
    }

    /// 埋め込み画像（data URL）か
    pub fn is_embedded(&self) -> bool {
        crate::data_url::is_data_url(&self.url)
    }
}

/// オンボーディングで回答した利用目的
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub use_case: String,
    pub expertise: String,
}

pub const USE_CASES: [&str; 3] = ["Product Photography", "Graphic Design", "Creative Arts"];
pub const EXPERTISE_LEVELS: [&str; 3] = ["Beginner", "Enthusiast", "Professional"];

/// ユーザー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub name: String,
    pub is_new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}

impl User {
    /// クレジット受取時に作るプレースホルダーユーザー
    pub fn placeholder(preferences: Option<Preferences>) -> Self {
        Self {
            email: "creator@photoclean.ai".to_string(),
            name: "Creative Partner".to_string(),
            is_new: false,
            preferences,
        }
    }
}

/// 画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Landing,
    Auth,
    Onboarding,
    ClaimCredits,
    Dashboard,
    Editor,
    Gallery,
    Subscription,
}

impl View {
    /// サイドバーの遷移先
    pub const NAVIGATION: [(View, &'static str); 3] = [
        (View::Dashboard, "Dashboard"),
        (View::Gallery, "Gallery"),
        (View::Subscription, "Subscription"),
    ];

    /// サインイン後のシェル内に描画する画面か
    pub fn is_workspace(&self) -> bool {
        matches!(
            self,
            View::Dashboard | View::Editor | View::Gallery | View::Subscription
        )
    }
}
