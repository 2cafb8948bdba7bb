//! data URL（`data:<mime>;base64,<payload>`）ユーティリティ

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Error, Result};

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

pub fn is_data_url(url: &str) -> bool {
    url.starts_with("data:")
}

/// Base64データ部分を取り出す
///
/// 最初の `,` までをプレフィックスとして取り除く。`,` がなければ全体をそのまま返す。
pub fn payload(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map(|(_, data)| data)
        .unwrap_or(data_url)
}

/// MIMEタイプを取り出す（取得できなければ `image/jpeg`）
pub fn mime_type(data_url: &str) -> &str {
    data_url
        .split(':')
        .nth(1)
        .and_then(|s| s.split(';').next())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_MIME_TYPE)
}

pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Base64部分をデコードする
pub fn decode(data_url: &str) -> Result<Vec<u8>> {
    if !is_data_url(data_url) {
        return Err(Error::InvalidDataUrl("missing data: prefix".to_string()));
    }
    STANDARD
        .decode(payload(data_url))
        .map_err(|e| Error::InvalidDataUrl(e.to_string()))
}

/// MIMEタイプから拡張子を推定
pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_png() {
        assert_eq!(payload("data:image/png;base64,iVBORw0KGgo="), "iVBORw0KGgo=");
    }

    #[test]
    fn test_payload_without_prefix() {
        assert_eq!(payload("iVBORw0KGgo="), "iVBORw0KGgo=");
    }

    #[test]
    fn test_mime_type_webp() {
        assert_eq!(mime_type("data:image/webp;base64,UklGR"), "image/webp");
    }

    #[test]
    fn test_mime_type_default() {
        // 不正なフォーマットの場合はデフォルト値を返す
        assert_eq!(mime_type("invalid"), "image/jpeg");
        assert_eq!(mime_type("data:;base64,AAAA"), "image/jpeg");
    }

    #[test]
    fn test_encode_decode() {
        let url = encode("image/png", b"\x89PNG");
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode(&url).expect("デコード失敗"), b"\x89PNG");
    }

    #[test]
    fn test_decode_rejects_remote_url() {
        assert!(matches!(
            decode("https://example.com/a.png"),
            Err(Error::InvalidDataUrl(_))
        ));
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("application/octet-stream"), "png");
    }
}
