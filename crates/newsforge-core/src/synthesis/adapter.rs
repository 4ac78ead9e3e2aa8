use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::article::{SynthesisRequest, SynthesizedArticle};
use crate::config::{KeyScheme, ProviderSettings, Settings};
use crate::error::Result;

/// Backends that can synthesize and edit articles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AiProvider {
    Chatgpt,
    Claude,
    Mistral,
}

impl AiProvider {
    /// Path segment of the provider's backend routes (`/api/<segment>/...`).
    pub fn route_segment(&self) -> &'static str {
        match self {
            AiProvider::Chatgpt => "openai",
            AiProvider::Claude => "claude",
            AiProvider::Mistral => "mistral",
        }
    }

    pub fn key_scheme(&self) -> KeyScheme {
        match self {
            AiProvider::Chatgpt => KeyScheme::OpenAi,
            AiProvider::Claude => KeyScheme::Anthropic,
            AiProvider::Mistral => KeyScheme::Mistral,
        }
    }

    /// The provider's slice of `settings`.
    pub fn settings<'a>(&self, settings: &'a Settings) -> &'a ProviderSettings {
        match self {
            AiProvider::Chatgpt => &settings.chatgpt,
            AiProvider::Claude => &settings.claude,
            AiProvider::Mistral => &settings.mistral,
        }
    }
}

/// Uniform capability of every provider adapter.
///
/// Adapters are expected to recover from network failures themselves (by
/// returning simulated content); an `Err` means even that was impossible.
#[async_trait]
pub trait ArticleAdapter: Send + Sync {
    fn provider(&self) -> AiProvider;

    async fn synthesize(
        &self,
        settings: &Settings,
        request: &SynthesisRequest,
    ) -> Result<SynthesizedArticle>;

    async fn edit(
        &self,
        settings: &Settings,
        article: &SynthesizedArticle,
        instructions: &str,
    ) -> Result<SynthesizedArticle>;
}
