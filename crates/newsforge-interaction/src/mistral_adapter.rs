//! MistralAdapter - article synthesis and editing through `/api/mistral/*`.

use std::sync::Arc;

use async_trait::async_trait;
use newsforge_core::article::{SynthesisRequest, SynthesizedArticle};
use newsforge_core::config::Settings;
use newsforge_core::error::Result;
use newsforge_core::synthesis::{AiProvider, ArticleAdapter, ArticleSimulator};

use crate::http::BackendHttp;
use crate::remote::RemoteArticleAdapter;

pub const DEFAULT_MISTRAL_MODEL: &str = "mistral-large-latest";

#[derive(Clone)]
pub struct MistralAdapter {
    inner: RemoteArticleAdapter,
}

impl MistralAdapter {
    pub fn new(http: BackendHttp, simulator: Arc<ArticleSimulator>) -> Self {
        Self {
            inner: RemoteArticleAdapter::new(
                AiProvider::Mistral,
                DEFAULT_MISTRAL_MODEL,
                http,
                simulator,
            ),
        }
    }
}

#[async_trait]
impl ArticleAdapter for MistralAdapter {
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
