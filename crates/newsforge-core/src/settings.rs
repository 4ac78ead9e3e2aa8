//! Settings service trait.
//!
//! Defines how callers obtain the `Settings` object that is passed to the
//! dispatcher, and how the AI-service preference is persisted.

use crate::config::{AiServicePreference, Settings};
use crate::error::Result;

/// Service for loading and updating user settings.
///
/// # Security Note
///
/// Implementations must never log API keys contained in provider settings.
#[async_trait::async_trait]
pub trait SettingsService: Send + Sync {
    /// Loads the effective settings (file configuration overlaid with
    /// persisted preferences and environment overrides).
    async fn load_settings(&self) -> Result<Settings>;

    /// Persists the AI-service preference.
    async fn save_preference(&self, preference: AiServicePreference) -> Result<()>;
}
