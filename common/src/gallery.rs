//! 履歴（ギャラリー）の検索・絞込み・削除

use std::fmt;
use std::str::FromStr;

use crate::types::{ImageRecord, Resolution};

/// ダッシュボードに並べる最近の編集件数
pub const RECENT_LIMIT: usize = 3;

/// 解像度フィルタ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionFilter {
    #[default]
    All,
    Only(Resolution),
}

impl ResolutionFilter {
    pub const CHOICES: [ResolutionFilter; 4] = [
        ResolutionFilter::All,
        ResolutionFilter::Only(Resolution::OneK),
        ResolutionFilter::Only(Resolution::TwoK),
        ResolutionFilter::Only(Resolution::FourK),
    ];

    pub fn matches(&self, record: &ImageRecord) -> bool {
        match self {
            ResolutionFilter::All => true,
            ResolutionFilter::Only(resolution) => record.resolution == Some(*resolution),
        }
    }
}

impl fmt::Display for ResolutionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionFilter::All => f.write_str("ALL"),
            ResolutionFilter::Only(resolution) => write!(f, "{resolution}"),
        }
    }
}

impl FromStr for ResolutionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(ResolutionFilter::All);
        }
        s.parse::<Resolution>().map(ResolutionFilter::Only)
    }
}

/// 名前の部分一致（大文字小文字を区別しない）かつ解像度一致で絞込む
///
/// 履歴の順序は保つ。
pub fn filter_history<'a>(
    history: &'a [ImageRecord],
    query: &str,
    filter: ResolutionFilter,
) -> Vec<&'a ImageRecord> {
    let needle = query.to_lowercase();
    history
        .iter()
        .filter(|record| record.name.to_lowercase().contains(&needle) && filter.matches(record))
        .collect()
}

/// IDが一致する最初の1件を削除して返す
pub fn remove_record(history: &mut Vec<ImageRecord>, id: &str) -> Option<ImageRecord> {
    let index = history.iter().position(|record| record.id == id)?;
    Some(history.remove(index))
}

pub fn recent(history: &[ImageRecord], limit: usize) -> &[ImageRecord] {
    &history[..history.len().min(limit)]
}
