//! Routes synthesis and edit requests to a provider adapter according to the
//! user's AI-service preference.

use std::collections::HashMap;
use std::sync::Arc;

use newsforge_core::article::{
    Article, ArticleLength, SynthesisRequest, SynthesizedArticle, Tone, WritingStyle,
};
use newsforge_core::config::{AiServicePreference, Settings};
use newsforge_core::editing::AdvancedEditingEngine;
use newsforge_core::error::{NewsforgeError, Result};
use newsforge_core::synthesis::{AiProvider, ArticleAdapter, ArticleSimulator};
use newsforge_interaction::{BackendHttp, ChatGptAdapter, ClaudeAdapter, MistralAdapter};

/// `ai_model_used` stamped on hybrid results.
pub const HYBRID_MODEL_TAG: &str = "hybrid-claude-chatgpt";
/// Floor applied to `content_quality_score` of hybrid results.
pub const HYBRID_MIN_QUALITY: u8 = 85;

const OVERRIDE_KEYWORDS: &[&str] = &["chatgpt", "ai"];

/// Where a request ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Adapter(AiProvider),
    /// Claude adapter, stamped as hybrid, retried once on failure.
    Hybrid,
    /// The in-process editing engine (edits only).
    LocalEngine,
}

impl Route {
    /// Route for synthesis under `preference`.
    pub fn for_synthesis(preference: AiServicePreference) -> Self {
        match preference {
            AiServicePreference::Hybrid => Route::Hybrid,
            AiServicePreference::Claude => Route::Adapter(AiProvider::Claude),
            AiServicePreference::Mistral => Route::Adapter(AiProvider::Mistral),
            AiServicePreference::Chatgpt | AiServicePreference::Default => {
                Route::Adapter(AiProvider::Chatgpt)
            }
        }
    }

    /// Route for an edit. Under `default` the local engine handles the edit,
    /// unless the keyword override is enabled and the instruction mentions
    /// "chatgpt" or "ai" anywhere (plain substring, so "said" matches too).
    pub fn for_edit(settings: &Settings, instructions: &str) -> Self {
        match settings.ai_service_preference {
            AiServicePreference::Default => {
                let lowered = instructions.to_lowercase();
                if settings.editing.keyword_override
                    && OVERRIDE_KEYWORDS.iter().any(|k| lowered.contains(k))
                {
                    Route::Adapter(AiProvider::Chatgpt)
                } else {
                    Route::LocalEngine
                }
            }
            preference => Self::for_synthesis(preference),
        }
    }
}

/// Enum-indexed adapter table plus the local editing engine.
#[derive(Clone, Default)]
pub struct SynthesisDispatcher {
    adapters: HashMap<AiProvider, Arc<dyn ArticleAdapter>>,
    engine: AdvancedEditingEngine,
}

impl SynthesisDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher wired to the HTTP adapters for every provider.
    pub fn with_backend_adapters(http: BackendHttp, simulator: Arc<ArticleSimulator>) -> Self {
        Self::new()
            .with_adapter(Arc::new(ChatGptAdapter::new(http.clone(), simulator.clone())))
            .with_adapter(Arc::new(ClaudeAdapter::new(http.clone(), simulator.clone())))
            .with_adapter(Arc::new(MistralAdapter::new(http, simulator)))
    }

    /// Registers `adapter` under its own provider, replacing any previous one.
    pub fn with_adapter(mut self, adapter: Arc<dyn ArticleAdapter>) -> Self {
        self.adapters.insert(adapter.provider(), adapter);
        self
    }

    fn adapter(&self, provider: AiProvider) -> Result<&Arc<dyn ArticleAdapter>> {
        self.adapters
            .get(&provider)
            .ok_or_else(|| NewsforgeError::config(format!("No adapter registered for {provider}")))
    }

    pub async fn synthesize_articles(
        &self,
        settings: &Settings,
        sources: Vec<Article>,
        topic: impl Into<String>,
        style: WritingStyle,
        tone: Tone,
        length: ArticleLength,
    ) -> Result<SynthesizedArticle> {
        let request = SynthesisRequest {
            sources,
            topic: topic.into(),
            style,
            tone,
            length,
        };
        let route = Route::for_synthesis(settings.ai_service_preference);
        tracing::info!(
            target: "dispatcher",
            "Synthesizing '{}' from {} sources via {:?}",
            request.topic,
            request.sources.len(),
            route
        );

        let mut article = match route {
            Route::Adapter(provider) => self.adapter(provider)?.synthesize(settings, &request).await?,
            Route::Hybrid => {
                let claude = self.adapter(AiProvider::Claude)?;
                let article = match claude.synthesize(settings, &request).await {
                    Ok(article) => article,
                    Err(err) => {
                        tracing::warn!(
                            target: "dispatcher",
                            "Hybrid synthesis failed, retrying with Claude: {}",
                            err
                        );
                        claude.synthesize(settings, &request).await?
                    }
                };
                stamp_hybrid(article)
            }
            Route::LocalEngine => {
                return Err(NewsforgeError::internal(
                    "The local engine cannot synthesize articles",
                ));
            }
        };

        article.refresh_metrics();
        Ok(article)
    }

    pub async fn edit_article(
        &self,
        settings: &Settings,
        article: &SynthesizedArticle,
        instructions: &str,
    ) -> Result<SynthesizedArticle> {
        let route = Route::for_edit(settings, instructions);
        tracing::info!(target: "dispatcher", "Editing article {} via {:?}", article.id, route);

        let mut edited = match route {
            Route::Adapter(provider) => {
                self.adapter(provider)?
                    .edit(settings, article, instructions)
                    .await?
            }
            Route::Hybrid => {
                let claude = self.adapter(AiProvider::Claude)?;
                let edited = match claude.edit(settings, article, instructions).await {
                    Ok(edited) => edited,
                    Err(err) => {
                        tracing::warn!(
                            target: "dispatcher",
                            "Hybrid edit failed, retrying with Claude: {}",
                            err
                        );
                        claude.edit(settings, article, instructions).await?
                    }
                };
                stamp_hybrid(edited)
            }
            Route::LocalEngine => self.engine.edit(article, instructions)?,
        };

        edited.refresh_metrics();
        Ok(edited)
    }
}

fn stamp_hybrid(mut article: SynthesizedArticle) -> SynthesizedArticle {
    article.processing_metrics.ai_model_used = HYBRID_MODEL_TAG.to_string();
    article.processing_metrics.content_quality_score = article
        .processing_metrics
        .content_quality_score
        .max(HYBRID_MIN_QUALITY);
    article
}
