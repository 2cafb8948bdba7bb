//! 画面コンポーネント

pub mod auth;
pub mod busy_overlay;
pub mod dashboard;
pub mod editor;
pub mod landing;
pub mod photo_gallery;
pub mod sidebar;
pub mod subscription;
pub mod upload_area;
