//! ローカル画像ファイルの読み書き

use crate::error::{PhotoCleanError, Result};
use image::ImageFormat;
use photoclean_common::data_url;
use std::path::Path;

/// バイト列からMIMEタイプを推定
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}

/// 画像ファイルを読み込み (ファイル名, data URL) を返す
pub fn read_as_data_url(path: &Path) -> Result<(String, String)> {
    if !path.is_file() {
        return Err(PhotoCleanError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    let mime_type = sniff_mime_type(&bytes)
        .or_else(|| ImageFormat::from_path(path).ok().map(|f| f.to_mime_type()))
        .ok_or_else(|| PhotoCleanError::ImageLoad(format!("画像形式を判定できません: {}", path.display())))?;

    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("image")
        .to_string();
    Ok((name, data_url::encode(mime_type, &bytes)))
}

/// data URL をデコードしてファイルに書き出す
pub fn write_data_url(path: &Path, url: &str) -> Result<()> {
    let bytes = data_url::decode(url)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_sniff_png() {
        assert_eq!(sniff_mime_type(PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_mime_type(b"hello"), None);
    }

    #[test]
    fn test_read_as_data_url() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("cat.png");
        std::fs::write(&path, PNG_HEADER).expect("書き込み失敗");

        let (name, url) = read_as_data_url(&path).expect("読み込み失敗");
        assert_eq!(name, "cat.png");
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_as_data_url(Path::new("/nonexistent/cat.png")).unwrap_err();
        assert!(matches!(err, PhotoCleanError::FileNotFound(_)));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").expect("書き込み失敗");

        let err = read_as_data_url(&path).unwrap_err();
        assert!(matches!(err, PhotoCleanError::ImageLoad(_)));
    }

    #[test]
    fn test_write_data_url() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("out").join("result.png");
        write_data_url(&path, "data:image/png;base64,QUJD").expect("書き出し失敗");
        assert_eq!(std::fs::read(&path).expect("読み込み失敗"), b"ABC");
    }
}
