//! Article domain module.
//!
//! Source articles come from search backends or callers; synthesized articles
//! are produced by an adapter (remote or simulated) and mutated by edits.

mod model;
pub mod text;

pub use model::{
    Article, ArticleLength, FactCheckResult, ProcessingMetrics, SeoMetadata, SynthesisRequest,
    SynthesizedArticle, Tone, WritingStyle,
};
pub use text::{calculate_reading_time, count_words, extract_keywords};
