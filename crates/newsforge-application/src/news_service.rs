//! News search, input debouncing and view tracking.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use newsforge_core::config::Settings;
use newsforge_core::error::Result;
use newsforge_core::search::{
    ArticleSearch, MostViewedEntry, SearchQuery, SearchResponse, ViewTracker,
};

/// Delay applied to search-as-you-type input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Last-write-wins debouncer.
///
/// Every call takes a ticket and waits out the delay. A call whose ticket has
/// been superseded (before it starts or before it finishes) yields `None`.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn run<F, Fut, T>(&self, f: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            return None;
        }

        let output = f().await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            tracing::debug!("Discarding superseded search result");
            return None;
        }
        Some(output)
    }
}

pub struct NewsService {
    search: Arc<dyn ArticleSearch>,
    views: Arc<dyn ViewTracker>,
    debouncer: SearchDebouncer,
}

impl NewsService {
    pub fn new(search: Arc<dyn ArticleSearch>, views: Arc<dyn ViewTracker>) -> Self {
        Self {
            search,
            views,
            debouncer: SearchDebouncer::default(),
        }
    }

    pub fn with_debouncer(mut self, debouncer: SearchDebouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    /// Searches immediately. Blank queries are rejected.
    pub async fn search(&self, settings: &Settings, query: &str) -> Result<SearchResponse> {
        let mut query =
            SearchQuery::new(query)?.with_max_results(settings.gemini_search.max_results);
        if let Some(region) = &settings.gemini_search.region {
            query = query.with_region(region.clone());
        }
        self.search.search(settings, &query).await
    }

    /// Debounced search: `Ok(None)` when a newer call superseded this one.
    pub async fn search_debounced(
        &self,
        settings: &Settings,
        query: &str,
    ) -> Result<Option<SearchResponse>> {
        self.debouncer
            .run(|| self.search(settings, query))
            .await
            .transpose()
    }

    /// Records a view; failures are logged and otherwise ignored.
    pub async fn record_view(&self, settings: &Settings, article_id: &str) {
        if let Err(err) = self.views.record_view(settings, article_id).await {
            tracing::warn!("Failed to record view for {}: {}", article_id, err);
        }
    }

    /// Most viewed articles; empty when the backend call fails.
    pub async fn most_viewed(&self, settings: &Settings, limit: usize) -> Vec<MostViewedEntry> {
        match self.views.most_viewed(settings, limit).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("Failed to load most viewed articles: {}", err);
                Vec::new()
            }
        }
    }
}
