//! News search and view tracking.

pub mod model;
pub mod service;

pub use model::{MostViewedEntry, SearchOrigin, SearchQuery, SearchResponse};
pub use service::{ArticleSearch, ViewTracker};
