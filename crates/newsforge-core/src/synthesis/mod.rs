//! Provider adapters and the local fallback that backs them.

mod adapter;
mod insight;
mod simulator;
mod templates;

pub use adapter::{AiProvider, ArticleAdapter};
pub use insight::{QualityAssessment, ViralContent};
pub use simulator::{ArticleSimulator, SIMULATED_QUALITY_SCORE};
pub use templates::{ContentTemplates, SearchResultTemplate, StyleTemplates};
