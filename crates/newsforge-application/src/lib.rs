//! Application layer for NEWSFORGE.
//!
//! Coordinates the domain types in `newsforge-core` with the HTTP adapters
//! and the settings storage.

pub mod dispatcher;
pub mod news_service;
pub mod publishing_service;

pub use dispatcher::{HYBRID_MIN_QUALITY, HYBRID_MODEL_TAG, Route, SynthesisDispatcher};
pub use news_service::{NewsService, SEARCH_DEBOUNCE, SearchDebouncer};
pub use publishing_service::{PublishReceipt, PublishingService};
