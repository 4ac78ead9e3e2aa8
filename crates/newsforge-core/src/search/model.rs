//! Search domain models.

use serde::{Deserialize, Serialize};

use crate::article::Article;
use crate::error::{NewsforgeError, Result};

/// Default number of results requested from a search backend.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Body sent to `/api/gemini/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: String,
    pub max_results: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl SearchQuery {
    /// Trims `query` and rejects it when nothing is left.
    pub fn new(query: impl AsRef<str>) -> Result<Self> {
        let query = query.as_ref().trim();
        if query.is_empty() {
            return Err(NewsforgeError::invalid_input("Search query cannot be empty"));
        }
        Ok(Self {
            query: query.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            region: None,
        })
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Where a search response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrigin {
    #[default]
    Remote,
    /// Generated locally because the backend was unavailable.
    Mock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub origin: SearchOrigin,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// One row of `/api/article/most-viewed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostViewedEntry {
    pub article_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub views: u64,
}
