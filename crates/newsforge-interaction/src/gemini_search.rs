//! GeminiSearchClient - article search through `/api/gemini/search`.
//!
//! Without a usable key, or when the backend fails, mock results are built
//! from the search templates so callers always have something to show.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsforge_core::article::Article;
use newsforge_core::config::Settings;
use newsforge_core::error::Result;
use newsforge_core::search::{ArticleSearch, SearchOrigin, SearchQuery, SearchResponse};
use newsforge_core::synthesis::ArticleSimulator;
use serde::Deserialize;

use crate::http::BackendHttp;

const SEARCH_ROUTE: &str = "/api/gemini/search";

#[derive(Deserialize)]
#[serde(untagged)]
enum SearchEnvelope {
    Wrapped {
        #[serde(alias = "results")]
        articles: Vec<RemoteSearchArticle>,
    },
    Bare(Vec<RemoteSearchArticle>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteSearchArticle {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default, alias = "snippet")]
    content: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default, alias = "link")]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
}

impl RemoteSearchArticle {
    fn into_article(self) -> Article {
        let content = self
            .content
            .or_else(|| self.description.clone())
            .unwrap_or_default();
        let mut article = Article::new(self.title, content);
        if let Some(id) = self.id.filter(|id| !id.trim().is_empty()) {
            article.id = id;
        }
        article.description = self.description;
        article.source = self.source;
        article.url = self.url;
        article.published_at = self.published_at;
        article
    }
}

#[derive(Clone)]
pub struct GeminiSearchClient {
    http: BackendHttp,
    simulator: Arc<ArticleSimulator>,
}

impl GeminiSearchClient {
    pub fn new(http: BackendHttp, simulator: Arc<ArticleSimulator>) -> Self {
        Self { http, simulator }
    }

    fn mock_response(&self, query: &SearchQuery) -> Result<SearchResponse> {
        Ok(SearchResponse {
            query: query.query.clone(),
            articles: self.simulator.simulate_search(&query.query, query.max_results)?,
            origin: SearchOrigin::Mock,
        })
    }
}

#[async_trait]
impl ArticleSearch for GeminiSearchClient {
    async fn search(&self, settings: &Settings, query: &SearchQuery) -> Result<SearchResponse> {
        let Some(api_key) = settings.gemini_search.usable_key() else {
            tracing::info!("No usable Gemini API key configured; returning mock results");
            return self.mock_response(query);
        };

        let mut query = query.clone();
        if query.region.is_none() {
            query.region = settings.gemini_search.region.clone();
        }

        let result: Result<SearchEnvelope> = self
            .http
            .post_json(&settings.backend, SEARCH_ROUTE, Some(api_key), &query)
            .await;

        match result {
            Ok(envelope) => {
                let remote = match envelope {
                    SearchEnvelope::Wrapped { articles } | SearchEnvelope::Bare(articles) => {
                        articles
                    }
                };
                let articles = remote
                    .into_iter()
                    .take(query.max_results)
                    .map(RemoteSearchArticle::into_article)
                    .collect();
                Ok(SearchResponse {
                    query: query.query,
                    articles,
                    origin: SearchOrigin::Remote,
                })
            }
            Err(err) => {
                tracing::warn!("Gemini search failed, returning mock results: {}", err);
                self.mock_response(&query)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_article_conversion() {
        let envelope: SearchEnvelope = serde_json::from_str(
            r#"{"results":[{"title":"Rates hold","snippet":"The bank held rates.","link":"https://x.test/a","publishedAt":"2026-03-01T08:00:00Z"}]}"#,
        )
        .unwrap();
        let SearchEnvelope::Wrapped { articles } = envelope else {
            panic!("expected wrapped results");
        };
        let article = articles.into_iter().next().unwrap().into_article();
        assert_eq!(article.content, "The bank held rates.");
        assert_eq!(article.url.as_deref(), Some("https://x.test/a"));
        assert!(!article.id.is_empty());
    }
}
