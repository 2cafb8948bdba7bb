pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod host;
pub mod image_file;
pub mod proxy;
pub mod storage;
