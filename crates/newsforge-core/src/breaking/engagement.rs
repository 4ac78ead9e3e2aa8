use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::article::Article;

const SOURCE_TIERS: &[(f64, &[&str])] = &[
    (3.0, &["reuters", "bbc", "cnn", "associated press", "bloomberg"]),
    (
        2.5,
        &[
            "fox",
            "npr",
            "wsj",
            "wall street journal",
            "new york times",
            "nytimes",
            "washington post",
            "guardian",
        ],
    ),
    (2.0, &["techcrunch", "wired", "buzzfeed", "the verge", "engadget"]),
    (1.5, &["axios", "vox", "slate", "politico"]),
];

const HIGH_ENGAGEMENT_TOPICS: &[&str] = &[
    "election",
    "war",
    "attack",
    "crisis",
    "pandemic",
    "earthquake",
    "hurricane",
    "shooting",
    "scandal",
    "ai",
    "artificial intelligence",
    "bitcoin",
    "crash",
    "killed",
    "emergency",
];

const MEDIUM_ENGAGEMENT_TOPICS: &[&str] = &[
    "technology",
    "economy",
    "market",
    "stocks",
    "inflation",
    "climate",
    "health",
    "sports",
    "celebrity",
    "policy",
    "study",
    "launch",
];

const BREAKING_INDICATORS: &[&str] = &[
    "breaking",
    "urgent",
    "exclusive",
    "just in",
    "developing",
    "confirmed",
    "sources say",
    "alert",
    "live updates",
];

const BREAKING_BOOST: f64 = 2.5;
const MIN_VIEWS: f64 = 50_000.0;
const MAX_VIEWS: f64 = 550_000.0;
const DECAY_WINDOW_HOURS: f64 = 48.0;
const MIN_VELOCITY_HOURS: f64 = 0.5;

/// Deterministic inputs to the engagement simulation, derived from the
/// article alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSignals {
    pub hours_old: f64,
    pub source_multiplier: f64,
    pub topic_multiplier: f64,
    pub has_breaking_indicators: bool,
}

impl EngagementSignals {
    /// Missing or future `published_at` counts as zero hours old.
    pub fn from_article(article: &Article, now: DateTime<Utc>) -> Self {
        let hours_old = article
            .published_at
            .map(|published| (now - published).num_seconds() as f64 / 3600.0)
            .unwrap_or(0.0)
            .max(0.0);

        let text = article.headline_text().to_lowercase();

        Self {
            hours_old,
            source_multiplier: source_multiplier(article.source.as_deref()),
            topic_multiplier: topic_multiplier(&text),
            has_breaking_indicators: BREAKING_INDICATORS.iter().any(|i| text.contains(i)),
        }
    }

    pub fn time_decay(&self) -> f64 {
        (1.0 - self.hours_old / DECAY_WINDOW_HOURS).max(0.1)
    }
}

/// Simulated engagement counters. Never persisted, never compared across calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub views: u64,
    pub shares: u64,
    pub comments: u64,
    pub reactions: u64,
    pub total_engagement: u64,
    pub engagement_rate: f64,
    pub velocity_score: f64,
}

impl EngagementMetrics {
    /// Derives totals, rate and velocity from raw counters.
    pub fn from_counts(views: u64, shares: u64, comments: u64, reactions: u64, hours_old: f64) -> Self {
        let total_engagement = views + shares * 10 + comments * 15 + reactions * 5;
        let engagement_rate = if views == 0 {
            0.0
        } else {
            total_engagement as f64 / views as f64
        };
        let velocity_score = total_engagement as f64 / hours_old.max(MIN_VELOCITY_HOURS);

        Self {
            views,
            shares,
            comments,
            reactions,
            total_engagement,
            engagement_rate,
            velocity_score,
        }
    }
}

/// Draws a plausible set of engagement counters for `signals`.
pub fn generate_engagement_metrics<R: Rng + ?Sized>(
    signals: &EngagementSignals,
    rng: &mut R,
) -> EngagementMetrics {
    let mut views = rng.gen_range(MIN_VIEWS..MAX_VIEWS)
        * signals.source_multiplier
        * signals.topic_multiplier
        * signals.time_decay();

    if signals.has_breaking_indicators {
        views *= BREAKING_BOOST;
    }

    let shares = views * rng.gen_range(0.01..0.06);
    let comments = views * rng.gen_range(0.005..0.025);
    let reactions = views * rng.gen_range(0.02..0.10);

    EngagementMetrics::from_counts(
        views.round() as u64,
        shares.round() as u64,
        comments.round() as u64,
        reactions.round() as u64,
        signals.hours_old,
    )
}

fn source_multiplier(source: Option<&str>) -> f64 {
    let Some(source) = source else {
        return 1.0;
    };
    let source = source.to_lowercase();
    SOURCE_TIERS
        .iter()
        .find(|(_, outlets)| outlets.iter().any(|outlet| source.contains(outlet)))
        .map(|(multiplier, _)| *multiplier)
        .unwrap_or(1.0)
}

fn topic_multiplier(text: &str) -> f64 {
    let high = HIGH_ENGAGEMENT_TOPICS
        .iter()
        .filter(|topic| contains_term(text, topic))
        .count();
    let medium = MEDIUM_ENGAGEMENT_TOPICS
        .iter()
        .filter(|topic| contains_term(text, topic))
        .count();

    match (high, medium) {
        (h, _) if h >= 2 => 2.5,
        (1, _) => 2.0,
        (0, m) if m >= 2 => 1.5,
        (0, 1) => 1.3,
        _ => 1.0,
    }
}

/// Whole-term match so that short topics like "ai" do not hit "said".
fn contains_term(text: &str, term: &str) -> bool {
    text.match_indices(term).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + term.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
