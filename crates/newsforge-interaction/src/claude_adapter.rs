//! ClaudeAdapter - article synthesis, editing, title suggestions and quality
//! review through `/api/claude/*`.

use std::sync::Arc;

use async_trait::async_trait;
use newsforge_core::article::{SynthesisRequest, SynthesizedArticle};
use newsforge_core::config::Settings;
use newsforge_core::error::Result;
use newsforge_core::synthesis::{AiProvider, ArticleAdapter, ArticleSimulator, QualityAssessment};
use serde::{Deserialize, Serialize};

use crate::http::BackendHttp;
use crate::remote::{RemoteArticleAdapter, quality_from};

pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArticleBody<'a> {
    title: &'a str,
    content: &'a str,
    topic: &'a str,
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

#[derive(Deserialize)]
struct TitlesResponse {
    #[serde(default)]
    titles: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QualityResponse {
    #[serde(alias = "qualityScore", alias = "overallScore")]
    score: Option<f64>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default, alias = "suggestions")]
    improvements: Vec<String>,
}

#[derive(Clone)]
pub struct ClaudeAdapter {
    inner: RemoteArticleAdapter,
}

impl ClaudeAdapter {
    pub fn new(http: BackendHttp, simulator: Arc<ArticleSimulator>) -> Self {
        Self {
            inner: RemoteArticleAdapter::new(
                AiProvider::Claude,
                DEFAULT_CLAUDE_MODEL,
                http,
                simulator,
            ),
        }
    }

    fn body<'a>(
        &self,
        settings: &'a Settings,
        article: &'a SynthesizedArticle,
        count: Option<usize>,
    ) -> ArticleBody<'a> {
        ArticleBody {
            title: &article.title,
            content: &article.content,
            topic: &article.topic,
            model: self.inner.model(settings),
            count,
        }
    }

    /// Up to `count` alternative headlines.
    pub async fn suggest_titles(
        &self,
        settings: &Settings,
        article: &SynthesizedArticle,
        count: usize,
    ) -> Result<Vec<String>> {
        let Some(api_key) = self.inner.usable_key(settings) else {
            return self.inner.simulator().simulate_titles(article, count);
        };

        let result: Result<TitlesResponse> = self
            .inner
            .http()
            .post_json(
                &settings.backend,
                &self.inner.route("titles"),
                Some(api_key),
                &self.body(settings, article, Some(count)),
            )
            .await;

        match result {
            Ok(response) if !response.titles.is_empty() => {
                Ok(response.titles.into_iter().take(count).collect())
            }
            Ok(_) => {
                tracing::warn!("Title suggestion returned no titles, using templates");
                self.inner.simulator().simulate_titles(article, count)
            }
            Err(err) => {
                tracing::warn!("Title suggestion failed, using templates: {}", err);
                self.inner.simulator().simulate_titles(article, count)
            }
        }
    }

    /// Editorial quality review; falls back to the local heuristic.
    pub async fn assess_quality(
        &self,
        settings: &Settings,
        article: &SynthesizedArticle,
    ) -> Result<QualityAssessment> {
        let Some(api_key) = self.inner.usable_key(settings) else {
            return Ok(self.inner.simulator().assess_quality(article));
        };

        let result: Result<QualityResponse> = self
            .inner
            .http()
            .post_json(
                &settings.backend,
                &self.inner.route("quality"),
                Some(api_key),
                &self.body(settings, article, None),
            )
            .await;

        match result {
            Ok(response) if response.score.is_some() => Ok(QualityAssessment {
                score: quality_from(response.score),
                strengths: response.strengths,
                improvements: response.improvements,
            }),
            Ok(_) => Ok(self.inner.simulator().assess_quality(article)),
            Err(err) => {
                tracing::warn!("Quality review failed, using heuristic: {}", err);
                Ok(self.inner.simulator().assess_quality(article))
            }
        }
    }
}

#[async_trait]
impl ArticleAdapter for ClaudeAdapter {
    fn provider(&self) -> AiProvider {
        self.inner.provider()
    }

    async fn synthesize(
        &self,
        settings: &Settings,
        request: &SynthesisRequest,
    ) -> Result<SynthesizedArticle> {
        self.inner.synthesize(settings, request).await
    }

    async fn edit(
        &self,
        settings: &Settings,
        article: &SynthesizedArticle,
        instructions: &str,
    ) -> Result<SynthesizedArticle> {
        self.inner.edit(settings, article, instructions).await
    }
}
