//! PhotoClean Common Library
//!
//! CLIとWeb(WASM)で共有される型・状態管理・Gemini連携

pub mod types;
pub mod credits;
pub mod data_url;
pub mod edit;
pub mod error;
pub mod gallery;
pub mod gemini;
pub mod prompts;
pub mod storage;
pub mod studio;

pub use types::{ImageRecord, Preferences, Resolution, User, View};
pub use credits::CreditState;
pub use edit::{
    synthesize, synthesize_with_gate, EditOutcome, EditRequest, EditTicket, ImageEditor, ImageSource,
    KeyGate,
};
pub use error::{EditError, Error, Result, StudioError};
pub use gallery::{filter_history, ResolutionFilter};
pub use storage::{KeyValueStore, MemoryStore, SessionStore};
pub use studio::{EditCompletion, Studio, MOCK_SIGN_IN_DELAY_MS};
