use image::{ImageFormat, Rgb, RgbImage};
use photoclean::gemini::GeminiClient;
use photoclean_common::gemini::DEFAULT_API_BASE_URL;
use photoclean_common::{data_url, EditRequest, ImageEditor, Resolution};
use std::io::Cursor;

/// 白地に赤い四角を置いた小さなPNG
fn sample_png() -> Vec<u8> {
    let mut img = RgbImage::from_pixel(64, 64, Rgb([255, 255, 255]));
    for x in 24..40 {
        for y in 24..40 {
            img.put_pixel(x, y, Rgb([220, 20, 20]));
        }
    }
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("PNGエンコード失敗");
    bytes
}

#[tokio::test]
async fn gemini_edit_integration() {
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping integration test");
            return;
        }
    };

    let image = data_url::encode("image/png", &sample_png());
    let client = GeminiClient::new(reqwest::Client::new(), DEFAULT_API_BASE_URL, api_key);
    let result = client
        .edit_image(EditRequest {
            image: &image,
            mime_type: "image/png",
            prompt: "the red square",
            resolution: Resolution::OneK,
        })
        .await
        .unwrap_or_else(|e| panic!("gemini edit failed: {e}"));

    assert!(data_url::is_data_url(&result));
    assert!(data_url::mime_type(&result).starts_with("image/"));
    assert!(!data_url::decode(&result).expect("デコード失敗").is_empty());
}
