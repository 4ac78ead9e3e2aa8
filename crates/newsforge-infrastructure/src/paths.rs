//! Path management for newsforge configuration files.
//!
//! ```text
//! ~/.config/newsforge/
//! ├── config.toml        # Settings (backend, providers, editing)
//! └── preferences.json   # Persisted preference keys
//! ```

use std::path::PathBuf;

use newsforge_core::error::{NewsforgeError, Result};

const APP_DIR: &str = "newsforge";
const CONFIG_FILE: &str = "config.toml";
const PREFERENCES_FILE: &str = "preferences.json";

pub struct NewsforgePaths;

impl NewsforgePaths {
    /// `~/.config/newsforge` on Linux, the platform equivalent elsewhere.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| NewsforgeError::config("Cannot find the user configuration directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn preferences_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(PREFERENCES_FILE))
    }

    /// Same layout rooted at `base` instead of the user config directory.
    pub fn config_file_in(base: &std::path::Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }

    pub fn preferences_file_in(base: &std::path::Path) -> PathBuf {
        base.join(PREFERENCES_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_in_the_same_directory() {
        let base = std::path::Path::new("/tmp/nf");
        assert_eq!(
            NewsforgePaths::config_file_in(base),
            PathBuf::from("/tmp/nf/config.toml")
        );
        assert_eq!(
            NewsforgePaths::preferences_file_in(base).parent(),
            Some(base)
        );
    }
}
