//! 基于 JSON 文件的持久化：生成历史与用户设置

pub mod history;
pub mod settings;

pub use history::{HistoryEntry, HistoryStore};
pub use settings::{Settings, SettingsStore, SettingsUpdate, mask_api_key};
