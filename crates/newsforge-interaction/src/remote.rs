//! Shared request/response handling for the synthesize and edit routes.
//!
//! Every provider speaks the same backend contract; only the route segment,
//! default model and key format differ. Failures never reach the caller:
//! a missing key or a failed call falls back to the local simulator.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use newsforge_core::article::text::{split_sentences, truncate_chars};
use newsforge_core::article::{
    FactCheckResult, ProcessingMetrics, SeoMetadata, SynthesisRequest, SynthesizedArticle,
};
use newsforge_core::config::{ProviderSettings, Settings};
use newsforge_core::error::{NewsforgeError, Result};
use newsforge_core::synthesis::{AiProvider, ArticleSimulator};
use serde::{Deserialize, Serialize};

use crate::http::BackendHttp;

/// Quality score assumed when the backend does not report one.
const DEFAULT_REMOTE_QUALITY: u8 = 85;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeBody<'a> {
    #[serde(flatten)]
    request: &'a SynthesisRequest,
    target_words: usize,
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EditBody<'a> {
    title: &'a str,
    content: &'a str,
    instructions: &'a str,
    topic: &'a str,
    style: &'a str,
    tone: &'a str,
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
}

/// Article fields as the backend returns them. Everything except `content`
/// is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoteArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, alias = "model")]
    pub ai_model_used: Option<String>,
    #[serde(default, alias = "contentQualityScore")]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub seo_metadata: Option<SeoMetadata>,
    #[serde(default)]
    pub fact_check_results: Option<Vec<FactCheckResult>>,
}

/// Either `{ "article": {...} }` or the article object itself.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ArticleEnvelope {
    Wrapped { article: RemoteArticle },
    Bare(RemoteArticle),
}

impl ArticleEnvelope {
    pub(crate) fn into_article(self) -> Result<RemoteArticle> {
        let article = match self {
            ArticleEnvelope::Wrapped { article } | ArticleEnvelope::Bare(article) => article,
        };
        if article.content.trim().is_empty() {
            return Err(NewsforgeError::Serialization {
                format: "JSON".to_string(),
                message: "Backend returned an article without content".to_string(),
            });
        }
        Ok(article)
    }
}

/// Provider-agnostic synthesize/edit client with simulated fallback.
#[derive(Clone)]
pub struct RemoteArticleAdapter {
    provider: AiProvider,
    default_model: &'static str,
    http: BackendHttp,
    simulator: Arc<ArticleSimulator>,
}

impl RemoteArticleAdapter {
    pub fn new(
        provider: AiProvider,
        default_model: &'static str,
        http: BackendHttp,
        simulator: Arc<ArticleSimulator>,
    ) -> Self {
        Self {
            provider,
            default_model,
            http,
            simulator,
        }
    }

    pub fn provider(&self) -> AiProvider {
        self.provider
    }

    pub(crate) fn http(&self) -> &BackendHttp {
        &self.http
    }

    pub(crate) fn simulator(&self) -> &ArticleSimulator {
        &self.simulator
    }

    pub(crate) fn provider_settings<'a>(&self, settings: &'a Settings) -> &'a ProviderSettings {
        self.provider.settings(settings)
    }

    /// The configured key if it passes the provider's format check.
    pub(crate) fn usable_key<'a>(&self, settings: &'a Settings) -> Option<&'a str> {
        self.provider_settings(settings)
            .usable_key(self.provider.key_scheme())
    }

    pub(crate) fn model<'a>(&self, settings: &'a Settings) -> &'a str {
        self.provider_settings(settings)
            .model
            .as_deref()
            .unwrap_or(self.default_model)
    }

    pub(crate) fn route(&self, action: &str) -> String {
        format!("/api/{}/{}", self.provider.route_segment(), action)
    }

    pub async fn synthesize(
        &self,
        settings: &Settings,
        request: &SynthesisRequest,
    ) -> Result<SynthesizedArticle> {
        let Some(api_key) = self.usable_key(settings) else {
            tracing::info!(
                "No usable {} API key configured; generating simulated article",
                self.provider
            );
            return self
                .simulator
                .simulate_synthesis(request, self.provider.as_ref());
        };

        let started = Instant::now();
        match self.request_synthesis(settings, api_key, request).await {
            Ok(remote) => Ok(self.article_from_remote(settings, request, remote, started)),
            Err(err) => {
                tracing::warn!(
                    "{} synthesis failed, falling back to simulation: {}",
                    self.provider,
                    err
                );
                self.simulator
                    .simulate_synthesis(request, self.provider.as_ref())
            }
        }
    }

    pub async fn edit(
        &self,
        settings: &Settings,
        article: &SynthesizedArticle,
        instructions: &str,
    ) -> Result<SynthesizedArticle> {
        let Some(api_key) = self.usable_key(settings) else {
            tracing::info!(
                "No usable {} API key configured; editing locally",
                self.provider
            );
            return self
                .simulator
                .simulate_edit(article, instructions, self.provider.as_ref());
        };

        let started = Instant::now();
        match self.request_edit(settings, api_key, article, instructions).await {
            Ok(remote) => Ok(self.apply_remote_edit(settings, article, remote, started)),
            Err(err) => {
                tracing::warn!(
                    "{} edit failed, falling back to local editing: {}",
                    self.provider,
                    err
                );
                self.simulator
                    .simulate_edit(article, instructions, self.provider.as_ref())
            }
        }
    }

    async fn request_synthesis(
        &self,
        settings: &Settings,
        api_key: &str,
        request: &SynthesisRequest,
    ) -> Result<RemoteArticle> {
        let provider_settings = self.provider_settings(settings);
        let body = SynthesizeBody {
            request,
            target_words: request.length.target_words(),
            model: self.model(settings),
            temperature: provider_settings.temperature,
            max_tokens: provider_settings.max_tokens,
        };
        let envelope: ArticleEnvelope = self
            .http
            .post_json(&settings.backend, &self.route("synthesize"), Some(api_key), &body)
            .await?;
        envelope.into_article()
    }

    async fn request_edit(
        &self,
        settings: &Settings,
        api_key: &str,
        article: &SynthesizedArticle,
        instructions: &str,
    ) -> Result<RemoteArticle> {
        if instructions.trim().is_empty() {
            return Err(NewsforgeError::invalid_input("Edit instructions cannot be empty"));
        }
        let provider_settings = self.provider_settings(settings);
        let body = EditBody {
            title: &article.title,
            content: &article.content,
            instructions,
            topic: &article.topic,
            style: article.style.as_ref(),
            tone: article.tone.as_ref(),
            model: self.model(settings),
            temperature: provider_settings.temperature,
            max_tokens: provider_settings.max_tokens,
        };
        let envelope: ArticleEnvelope = self
            .http
            .post_json(&settings.backend, &self.route("edit"), Some(api_key), &body)
            .await?;
        envelope.into_article()
    }

    fn article_from_remote(
        &self,
        settings: &Settings,
        request: &SynthesisRequest,
        remote: RemoteArticle,
        started: Instant,
    ) -> SynthesizedArticle {
        let title = remote
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| request.topic.clone());
        let summary = remote
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| first_sentence(&remote.content));

        let mut article = SynthesizedArticle {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            content: remote.content,
            summary,
            topic: request.topic.clone(),
            word_count: 0,
            reading_time: 0,
            style: request.style,
            tone: request.tone,
            source_ids: request.sources.iter().map(|s| s.id.clone()).collect(),
            created_at: Utc::now(),
            processing_metrics: ProcessingMetrics {
                ai_model_used: remote
                    .ai_model_used
                    .unwrap_or_else(|| self.model(settings).to_string()),
                content_quality_score: quality_from(remote.quality_score),
                processing_time_ms: started.elapsed().as_millis() as u64,
                sources_processed: request.sources.len(),
            },
            seo_metadata: remote.seo_metadata,
            fact_check_results: remote.fact_check_results,
        };
        article.refresh_metrics();
        article
    }

    fn apply_remote_edit(
        &self,
        settings: &Settings,
        article: &SynthesizedArticle,
        remote: RemoteArticle,
        started: Instant,
    ) -> SynthesizedArticle {
        let mut edited = article.clone();
        if let Some(title) = remote.title.filter(|t| !t.trim().is_empty()) {
            edited.title = title;
        }
        if let Some(summary) = remote.summary.filter(|s| !s.trim().is_empty()) {
            edited.summary = summary;
        }
        edited.replace_content(remote.content);
        edited.processing_metrics.ai_model_used = remote
            .ai_model_used
            .unwrap_or_else(|| self.model(settings).to_string());
        if remote.quality_score.is_some() {
            edited.processing_metrics.content_quality_score = quality_from(remote.quality_score);
        }
        edited.processing_metrics.processing_time_ms = started.elapsed().as_millis() as u64;
        edited
    }
}

fn first_sentence(content: &str) -> String {
    split_sentences(content)
        .into_iter()
        .next()
        .map(|s| truncate_chars(&s, 200))
        .unwrap_or_default()
}

/// Clamps a backend-reported score into 0..=100.
pub(crate) fn quality_from(score: Option<f64>) -> u8 {
    match score {
        Some(value) if value.is_finite() => value.round().clamp(0.0, 100.0) as u8,
        _ => DEFAULT_REMOTE_QUALITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_accepts_wrapped_and_bare() {
        let wrapped: ArticleEnvelope =
            serde_json::from_str(r#"{"article":{"title":"T","content":"Body text."}}"#).unwrap();
        assert_eq!(wrapped.into_article().unwrap().content, "Body text.");

        let bare: ArticleEnvelope =
            serde_json::from_str(r#"{"content":"Body.","model":"gpt-4o","qualityScore":91.6}"#)
                .unwrap();
        let article = bare.into_article().unwrap();
        assert_eq!(article.ai_model_used.as_deref(), Some("gpt-4o"));
        assert_eq!(quality_from(article.quality_score), 92);
    }

    #[test]
    fn test_empty_content_is_rejected() {
        let envelope: ArticleEnvelope = serde_json::from_str(r#"{"title":"Only"}"#).unwrap();
        assert!(envelope.into_article().unwrap_err().is_serialization());
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(quality_from(Some(140.0)), 100);
        assert_eq!(quality_from(Some(-3.0)), 0);
        assert_eq!(quality_from(None), DEFAULT_REMOTE_QUALITY);
    }
}
