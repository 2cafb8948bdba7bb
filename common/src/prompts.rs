//! プロンプト生成モジュール
//!
//! WebとCLIで共有される、オブジェクト除去用のシステム指示。

/// 除去指示（ユーザー入力）を埋め込んだインペインティング用プロンプト
///
/// # Arguments
/// * `removal` - 除去したい対象の説明（例: "remove the hat"）
pub fn build_removal_prompt(removal: &str) -> String {
    format!(
        r#"You are a professional image editing AI. Your task is to REMOVE the objects or regions described by the user.
When removing an object, realistically fill in the background using context-aware inpainting to match lighting, textures, and perspective.
The user wants to remove: "{removal}".
Please output ONLY the final edited image. Ensure the output matches the requested high quality standard."#
    )
}
