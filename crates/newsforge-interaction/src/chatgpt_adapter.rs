//! ChatGptAdapter - article synthesis and editing through `/api/openai/*`.

use std::sync::Arc;

use async_trait::async_trait;
use newsforge_core::article::{SynthesisRequest, SynthesizedArticle};
use newsforge_core::config::Settings;
use newsforge_core::error::Result;
use newsforge_core::synthesis::{AiProvider, ArticleAdapter, ArticleSimulator, ViralContent};
use serde::Serialize;

use crate::http::BackendHttp;
use crate::remote::RemoteArticleAdapter;

pub const DEFAULT_CHATGPT_MODEL: &str = "gpt-4o";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViralBody<'a> {
    title: &'a str,
    summary: &'a str,
    content: &'a str,
    topic: &'a str,
    model: &'a str,
}

/// Adapter for the OpenAI-backed routes.
#[derive(Clone)]
pub struct ChatGptAdapter {
    inner: RemoteArticleAdapter,
}

impl ChatGptAdapter {
    pub fn new(http: BackendHttp, simulator: Arc<ArticleSimulator>) -> Self {
        Self {
            inner: RemoteArticleAdapter::new(
                AiProvider::Chatgpt,
                DEFAULT_CHATGPT_MODEL,
                http,
                simulator,
            ),
        }
    }

    /// Social-media copy for `article`; simulated when the backend is not
    /// reachable.
    pub async fn generate_viral(
        &self,
        settings: &Settings,
        article: &SynthesizedArticle,
    ) -> Result<ViralContent> {
        let Some(api_key) = self.inner.usable_key(settings) else {
            return self.inner.simulator().simulate_viral(article);
        };

        let body = ViralBody {
            title: &article.title,
            summary: &article.summary,
            content: &article.content,
            topic: &article.topic,
            model: self.inner.model(settings),
        };
        let result: Result<ViralContent> = self
            .inner
            .http()
            .post_json(
                &settings.backend,
                &self.inner.route("generate-viral"),
                Some(api_key),
                &body,
            )
            .await;

        match result {
            Ok(viral) => Ok(viral),
            Err(err) => {
                tracing::warn!("Viral content generation failed, using templates: {}", err);
                self.inner.simulator().simulate_viral(article)
            }
        }
    }
}

#[async_trait]
impl ArticleAdapter for ChatGptAdapter {
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
