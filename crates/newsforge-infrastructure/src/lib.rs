//! Filesystem-backed settings and preference storage.

pub mod paths;
pub mod preferences;
pub mod settings_service;
pub mod storage;

pub use paths::NewsforgePaths;
pub use preferences::{PreferenceKey, PreferenceStore};
pub use settings_service::{EnvOverrides, SettingsServiceImpl};
