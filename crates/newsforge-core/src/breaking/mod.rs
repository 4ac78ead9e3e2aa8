//! Breaking-news classification.
//!
//! Engagement numbers are simulated for demo purposes: every call draws new
//! random values unless the caller injects a seeded RNG.

mod badge;
mod classifier;
mod engagement;

pub use badge::{BadgeKind, BreakingNewsBadge, get_breaking_news_badge};
pub use classifier::{
    BREAKING_ENGAGEMENT_THRESHOLD, BREAKING_SCORE_THRESHOLD, BreakingNewsClassification,
    classify_breaking_news, classify_breaking_news_with, score_breaking_news,
};
pub use engagement::{EngagementMetrics, EngagementSignals, generate_engagement_metrics};
