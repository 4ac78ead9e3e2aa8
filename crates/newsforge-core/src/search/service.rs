//! Search and view-tracking seams implemented by the HTTP clients.

use async_trait::async_trait;

use crate::config::Settings;
use crate::error::Result;
use crate::search::{MostViewedEntry, SearchQuery, SearchResponse};

/// Finds candidate source articles.
#[async_trait]
pub trait ArticleSearch: Send + Sync {
    async fn search(&self, settings: &Settings, query: &SearchQuery) -> Result<SearchResponse>;
}

/// Records article views and reports the most viewed articles.
#[async_trait]
pub trait ViewTracker: Send + Sync {
    async fn record_view(&self, settings: &Settings, article_id: &str) -> Result<()>;

    async fn most_viewed(&self, settings: &Settings, limit: usize)
    -> Result<Vec<MostViewedEntry>>;
}
