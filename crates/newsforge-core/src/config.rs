//! Settings model injected into the dispatcher at call time.
//!
//! The same structure is read from `config.toml` and overlaid with the
//! persisted preference keys (`aiServicePreference`, `chatgptSettings`, ...).

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Which AI service the user prefers for synthesis and editing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AiServicePreference {
    #[default]
    Default,
    Chatgpt,
    Claude,
    Hybrid,
    Mistral,
}

impl AiServicePreference {
    /// Exact string match; anything unrecognized becomes `Default`.
    pub fn parse_lossy(value: &str) -> Self {
        Self::from_str(value).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for AiServicePreference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&raw))
    }
}

/// Key formats accepted by each provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScheme {
    OpenAi,
    Anthropic,
    Mistral,
    Gemini,
}

impl KeyScheme {
    const MIN_OPAQUE_KEY_LEN: usize = 20;

    /// Upfront sanity check so that obviously broken keys skip the network.
    pub fn accepts(&self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        match self {
            KeyScheme::OpenAi => key.starts_with("sk-") && !key.starts_with("sk-ant-"),
            KeyScheme::Anthropic => key.starts_with("sk-ant-"),
            KeyScheme::Mistral | KeyScheme::Gemini => key.len() >= Self::MIN_OPAQUE_KEY_LEN,
        }
    }
}

/// Per-provider settings (`chatgptSettings`, `claude_settings`, `mistralSettings`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default, alias = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens", alias = "maxTokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ProviderSettings {
    /// Returns the trimmed key if it passes `scheme`, `None` otherwise.
    pub fn usable_key(&self, scheme: KeyScheme) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| scheme.accepts(key))
    }
}

/// `geminiSearchSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiSearchSettings {
    #[serde(default, alias = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_max_results", alias = "maxResults")]
    pub max_results: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

fn default_max_results() -> usize {
    10
}

impl Default for GeminiSearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            max_results: default_max_results(),
            region: None,
        }
    }
}

impl GeminiSearchSettings {
    pub fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| KeyScheme::Gemini.accepts(key))
    }
}

/// Where the same-origin backend lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    /// No timeout is applied when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_secs: None,
        }
    }
}

impl BackendSettings {
    /// Joins `route` (starting with `/`) onto the base URL.
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), route)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditingSettings {
    /// Under the `default` preference, instructions mentioning "chatgpt" or
    /// "ai" are routed to the ChatGPT adapter instead of the local engine.
    #[serde(default = "default_keyword_override")]
    pub keyword_override: bool,
}

fn default_keyword_override() -> bool {
    true
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            keyword_override: default_keyword_override(),
        }
    }
}

/// Root settings object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub ai_service_preference: AiServicePreference,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub chatgpt: ProviderSettings,
    #[serde(default)]
    pub claude: ProviderSettings,
    #[serde(default)]
    pub mistral: ProviderSettings,
    #[serde(default)]
    pub gemini_search: GeminiSearchSettings,
    #[serde(default)]
    pub editing: EditingSettings,
}

impl Settings {
    pub fn with_preference(mut self, preference: AiServicePreference) -> Self {
        self.ai_service_preference = preference;
        self
    }

    pub fn with_backend_url(mut self, base_url: impl Into<String>) -> Self {
        self.backend.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_preference_falls_back_to_default() {
        assert_eq!(
            AiServicePreference::parse_lossy("gemini"),
            AiServicePreference::Default
        );
        assert_eq!(
            AiServicePreference::parse_lossy("Claude"),
            AiServicePreference::Default
        );
        assert_eq!(
            AiServicePreference::parse_lossy("hybrid"),
            AiServicePreference::Hybrid
        );
    }

    #[test]
    fn test_key_schemes() {
        assert!(KeyScheme::OpenAi.accepts("sk-proj-abc123"));
        assert!(!KeyScheme::OpenAi.accepts("sk-ant-abc123"));
        assert!(!KeyScheme::OpenAi.accepts("   "));
        assert!(KeyScheme::Anthropic.accepts("  sk-ant-api03-xyz  "));
        assert!(!KeyScheme::Mistral.accepts("short"));
        assert!(KeyScheme::Mistral.accepts("abcdefghijklmnopqrstuvwxyz"));
    }

    #[test]
    fn test_settings_from_toml() {
        let settings: Settings = toml::from_str(
            r#"
            ai_service_preference = "something-else"

            [backend]
            base_url = "http://127.0.0.1:8080/"

            [claude]
            api_key = "sk-ant-test"
            "#,
        )
        .unwrap();

        assert_eq!(settings.ai_service_preference, AiServicePreference::Default);
        assert_eq!(
            settings.backend.endpoint("/api/claude/edit"),
            "http://127.0.0.1:8080/api/claude/edit"
        );
        assert_eq!(
            settings.claude.usable_key(KeyScheme::Anthropic),
            Some("sk-ant-test")
        );
        assert_eq!(settings.chatgpt.max_tokens, 2000);
        assert!(settings.editing.keyword_override);
    }

    #[test]
    fn test_provider_settings_accept_camel_case_keys() {
        let settings: ProviderSettings =
            serde_json::from_str(r#"{"apiKey":"sk-live","maxTokens":512}"#).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("sk-live"));
        assert_eq!(settings.max_tokens, 512);
    }
}
