//! Settings service implementation.
//!
//! Effective settings are layered, later layers winning:
//! 1. `~/.config/newsforge/config.toml`
//! 2. persisted preference keys (`aiServicePreference`, `chatgptSettings`, ...)
//! 3. environment variables

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use newsforge_core::config::{AiServicePreference, Settings};
use newsforge_core::error::{NewsforgeError, Result};
use newsforge_core::settings::SettingsService;

use crate::paths::NewsforgePaths;
use crate::preferences::{PreferenceKey, PreferenceStore};
use crate::storage::AtomicFile;

pub const ENV_BACKEND_URL: &str = "NEWSFORGE_BACKEND_URL";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_MISTRAL_API_KEY: &str = "MISTRAL_API_KEY";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Values taken from the environment, applied last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub backend_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub mistral_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_process_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            backend_url: read(ENV_BACKEND_URL),
            openai_api_key: read(ENV_OPENAI_API_KEY),
            anthropic_api_key: read(ENV_ANTHROPIC_API_KEY),
            mistral_api_key: read(ENV_MISTRAL_API_KEY),
            gemini_api_key: read(ENV_GEMINI_API_KEY),
        }
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(url) = &self.backend_url {
            settings.backend.base_url = url.clone();
        }
        if let Some(key) = &self.openai_api_key {
            settings.chatgpt.api_key = Some(key.clone());
        }
        if let Some(key) = &self.anthropic_api_key {
            settings.claude.api_key = Some(key.clone());
        }
        if let Some(key) = &self.mistral_api_key {
            settings.mistral.api_key = Some(key.clone());
        }
        if let Some(key) = &self.gemini_api_key {
            settings.gemini_search.api_key = Some(key.clone());
        }
    }
}

/// Loads and caches the effective [`Settings`].
#[derive(Clone)]
pub struct SettingsServiceImpl {
    config: Arc<AtomicFile<Settings>>,
    preferences: Arc<PreferenceStore>,
    env: EnvOverrides,
    cache: Arc<RwLock<Option<Settings>>>,
}

impl SettingsServiceImpl {
    pub fn new(config_path: PathBuf, preferences: Arc<PreferenceStore>, env: EnvOverrides) -> Self {
        Self {
            config: Arc::new(AtomicFile::toml(config_path)),
            preferences,
            env,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses the standard paths and the process environment.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(
            NewsforgePaths::config_file()?,
            Arc::new(PreferenceStore::open_default()?),
            EnvOverrides::from_process_env(),
        ))
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    pub fn invalidate_cache(&self) -> Result<()> {
        *self.cache.write().map_err(|_| poisoned())? = None;
        Ok(())
    }

    /// Writes `settings` to `config.toml`. Preference keys and environment
    /// variables still take precedence on the next load.
    pub fn save_config(&self, settings: &Settings) -> Result<()> {
        self.config.save(settings)?;
        self.invalidate_cache()
    }

    fn assemble(&self) -> Result<Settings> {
        let mut settings = self.config.load()?.unwrap_or_default();

        if let Some(preference) = self.preferences.ai_service_preference()? {
            settings.ai_service_preference = preference;
        }
        if let Some(chatgpt) = self
            .preferences
            .provider_settings(PreferenceKey::ChatgptSettings)?
        {
            settings.chatgpt = chatgpt;
        }
        if let Some(claude) = self
            .preferences
            .provider_settings(PreferenceKey::ClaudeSettings)?
        {
            settings.claude = claude;
        }
        if let Some(mistral) = self
            .preferences
            .provider_settings(PreferenceKey::MistralSettings)?
        {
            settings.mistral = mistral;
        }
        if let Some(gemini) = self.preferences.gemini_search_settings()? {
            settings.gemini_search = gemini;
        }

        self.env.apply(&mut settings);
        tracing::debug!(
            "Loaded settings: preference={}, backend={}",
            settings.ai_service_preference,
            settings.backend.base_url
        );
        Ok(settings)
    }
}

fn poisoned() -> NewsforgeError {
    NewsforgeError::internal("Settings cache lock poisoned")
}

#[async_trait]
impl SettingsService for SettingsServiceImpl {
    async fn load_settings(&self) -> Result<Settings> {
        if let Some(cached) = self.cache.read().map_err(|_| poisoned())?.as_ref() {
            return Ok(cached.clone());
        }

        let settings = self.assemble()?;
        *self.cache.write().map_err(|_| poisoned())? = Some(settings.clone());
        Ok(settings)
    }

    async fn save_preference(&self, preference: AiServicePreference) -> Result<()> {
        self.preferences.set_ai_service_preference(preference)?;
        tracing::info!("AI service preference set to {}", preference);
        self.invalidate_cache()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsforge_core::config::ProviderSettings;
    use tempfile::TempDir;

    fn service(dir: &TempDir, env: EnvOverrides) -> SettingsServiceImpl {
        SettingsServiceImpl::new(
            NewsforgePaths::config_file_in(dir.path()),
            Arc::new(PreferenceStore::new(NewsforgePaths::preferences_file_in(
                dir.path(),
            ))),
            env,
        )
    }

    #[tokio::test]
    async fn test_defaults_without_files() {
        let dir = TempDir::new().unwrap();
        let settings = service(&dir, EnvOverrides::default())
            .load_settings()
            .await
            .unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_layers_apply_in_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            NewsforgePaths::config_file_in(dir.path()),
            r#"
            ai_service_preference = "claude"

            [backend]
            base_url = "http://from-file:3000"

            [chatgpt]
            api_key = "sk-file"
            "#,
        )
        .unwrap();

        let env = EnvOverrides {
            backend_url: Some("http://from-env:4000".to_string()),
            ..Default::default()
        };
        let service = service(&dir, env);
        service
            .preferences()
            .set_ai_service_preference(AiServicePreference::Mistral)
            .unwrap();
        service
            .preferences()
            .set(
                PreferenceKey::ChatgptSettings,
                &serde_json::json!({"apiKey": "sk-pref", "maxTokens": 900}),
            )
            .unwrap();

        let settings = service.load_settings().await.unwrap();
        assert_eq!(settings.ai_service_preference, AiServicePreference::Mistral);
        assert_eq!(settings.chatgpt.api_key.as_deref(), Some("sk-pref"));
        assert_eq!(settings.chatgpt.max_tokens, 900);
        assert_eq!(settings.backend.base_url, "http://from-env:4000");
    }

    #[tokio::test]
    async fn test_save_preference_invalidates_cache() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, EnvOverrides::default());
        assert_eq!(
            service.load_settings().await.unwrap().ai_service_preference,
            AiServicePreference::Default
        );

        service
            .save_preference(AiServicePreference::Hybrid)
            .await
            .unwrap();
        assert_eq!(
            service.load_settings().await.unwrap().ai_service_preference,
            AiServicePreference::Hybrid
        );
    }

    #[tokio::test]
    async fn test_env_keys_override_everything() {
        let dir = TempDir::new().unwrap();
        let env = EnvOverrides {
            anthropic_api_key: Some("sk-ant-env".to_string()),
            ..Default::default()
        };
        let service = service(&dir, env);
        service
            .preferences()
            .set(
                PreferenceKey::ClaudeSettings,
                &ProviderSettings {
                    api_key: Some("sk-ant-pref".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let settings = service.load_settings().await.unwrap();
        assert_eq!(settings.claude.api_key.as_deref(), Some("sk-ant-env"));
    }

    #[tokio::test]
    async fn test_save_config_round_trips() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, EnvOverrides::default());
        let settings = Settings::default().with_backend_url("http://saved:1234");
        service.save_config(&settings).unwrap();
        assert_eq!(
            service.load_settings().await.unwrap().backend.base_url,
            "http://saved:1234"
        );
    }
}
