//! Persisted user preferences.
//!
//! A flat key/value JSON document using the same key names the web client
//! keeps in `localStorage`, written atomically under a file lock.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use newsforge_core::config::{AiServicePreference, GeminiSearchSettings, ProviderSettings};
use newsforge_core::error::Result;
use newsforge_core::geolocation::UserLocation;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::paths::NewsforgePaths;
use crate::storage::AtomicFile;

type Document = BTreeMap<String, Value>;

/// Known preference keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
pub enum PreferenceKey {
    #[strum(serialize = "hasSeenOnboarding")]
    HasSeenOnboarding,
    #[strum(serialize = "lastNewsCheck")]
    LastNewsCheck,
    #[strum(serialize = "aiServicePreference")]
    AiServicePreference,
    #[strum(serialize = "chatgptSettings")]
    ChatgptSettings,
    #[strum(serialize = "claude_settings")]
    ClaudeSettings,
    #[strum(serialize = "geminiSearchSettings")]
    GeminiSearchSettings,
    #[strum(serialize = "mistralSettings")]
    MistralSettings,
    #[strum(serialize = "userLocation")]
    UserLocation,
}

pub struct PreferenceStore {
    file: AtomicFile<Document>,
}

impl PreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::json(path),
        }
    }

    /// Store at `~/.config/newsforge/preferences.json`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(NewsforgePaths::preferences_file()?))
    }

    /// Reads `key`. A value that no longer matches `T` is treated as absent.
    pub fn get<T: DeserializeOwned>(&self, key: PreferenceKey) -> Result<Option<T>> {
        let document = self.file.load()?.unwrap_or_default();
        let Some(value) = document.get(key.as_ref()) else {
            return Ok(None);
        };
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(err) => {
                tracing::warn!("Ignoring malformed preference '{}': {}", key, err);
                Ok(None)
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: PreferenceKey, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.file.update(Document::new(), |document| {
            document.insert(key.to_string(), value);
            Ok(())
        })
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&self, key: PreferenceKey) -> Result<bool> {
        self.file
            .update(Document::new(), |document| Ok(document.remove(key.as_ref()).is_some()))
    }

    pub fn has_seen_onboarding(&self) -> Result<bool> {
        Ok(self.get(PreferenceKey::HasSeenOnboarding)?.unwrap_or(false))
    }

    pub fn mark_onboarding_seen(&self) -> Result<()> {
        self.set(PreferenceKey::HasSeenOnboarding, &true)
    }

    pub fn last_news_check(&self) -> Result<Option<DateTime<Utc>>> {
        self.get(PreferenceKey::LastNewsCheck)
    }

    pub fn record_news_check(&self, at: DateTime<Utc>) -> Result<()> {
        self.set(PreferenceKey::LastNewsCheck, &at)
    }

    /// Unknown stored values read back as `Default`.
    pub fn ai_service_preference(&self) -> Result<Option<AiServicePreference>> {
        let raw: Option<String> = self.get(PreferenceKey::AiServicePreference)?;
        Ok(raw.map(|value| AiServicePreference::parse_lossy(&value)))
    }

    pub fn set_ai_service_preference(&self, preference: AiServicePreference) -> Result<()> {
        self.set(PreferenceKey::AiServicePreference, &preference.as_ref())
    }

    pub fn provider_settings(&self, key: PreferenceKey) -> Result<Option<ProviderSettings>> {
        self.get(key)
    }

    pub fn gemini_search_settings(&self) -> Result<Option<GeminiSearchSettings>> {
        self.get(PreferenceKey::GeminiSearchSettings)
    }

    /// The cached location, evicting it when older than six hours.
    pub fn user_location(&self, now: DateTime<Utc>) -> Result<Option<UserLocation>> {
        let Some(location) = self.get::<UserLocation>(PreferenceKey::UserLocation)? else {
            return Ok(None);
        };
        if location.is_expired(now) {
            tracing::debug!("Evicting expired user location");
            self.remove(PreferenceKey::UserLocation)?;
            return Ok(None);
        }
        Ok(Some(location))
    }

    pub fn set_user_location(&self, location: &UserLocation) -> Result<()> {
        self.set(PreferenceKey::UserLocation, location)
    }
}
