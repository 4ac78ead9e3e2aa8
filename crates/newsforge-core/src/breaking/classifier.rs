use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::engagement::{EngagementMetrics, EngagementSignals, generate_engagement_metrics};
use crate::article::Article;

/// Total engagement at which an article counts as breaking on its own.
pub const BREAKING_ENGAGEMENT_THRESHOLD: f64 = 150_000.0;
/// Score at or above which `is_breaking` is set.
pub const BREAKING_SCORE_THRESHOLD: f64 = 100.0;

const VELOCITY_THRESHOLD: f64 = 1_000.0;
const MAX_VELOCITY_BONUS: f64 = 50.0;
const SUSTAINED_AGE_HOURS: f64 = 24.0;
const HIGH_RATE_THRESHOLD: f64 = 0.3;
const MAJOR_SOURCE_MULTIPLIER: f64 = 2.5;

/// Result of scoring one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakingNewsClassification {
    pub is_breaking: bool,
    pub breaking_score: f64,
    pub engagement_metrics: EngagementMetrics,
    pub breaking_reason: String,
    /// Minutes, only present when breaking with positive velocity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_breaking: Option<f64>,
}

/// Classifies `article` with the thread RNG and the current time.
///
/// Not reproducible: two calls on the same article may disagree.
pub fn classify_breaking_news(article: &Article) -> BreakingNewsClassification {
    classify_breaking_news_with(article, Utc::now(), &mut rand::thread_rng())
}

/// Classifies `article` as of `now` using the supplied random source.
pub fn classify_breaking_news_with<R: Rng + ?Sized>(
    article: &Article,
    now: DateTime<Utc>,
    rng: &mut R,
) -> BreakingNewsClassification {
    let signals = EngagementSignals::from_article(article, now);
    let metrics = generate_engagement_metrics(&signals, rng);
    let classification = score_breaking_news(&signals, &metrics);

    tracing::debug!(
        target: "breaking_news",
        article_id = %article.id,
        score = classification.breaking_score,
        is_breaking = classification.is_breaking,
        "Classified article"
    );

    classification
}

/// Applies the fixed additive bonus model to already-computed metrics.
pub fn score_breaking_news(
    signals: &EngagementSignals,
    metrics: &EngagementMetrics,
) -> BreakingNewsClassification {
    let mut score = 0.0;
    let mut reasons: Vec<String> = Vec::new();
    let total = metrics.total_engagement as f64;

    if total >= BREAKING_ENGAGEMENT_THRESHOLD {
        score += 100.0;
        reasons.push(format!(
            "High engagement: {} total interactions",
            metrics.total_engagement
        ));
    }

    if metrics.velocity_score >= VELOCITY_THRESHOLD {
        score += (metrics.velocity_score / 1_000.0 * 10.0).min(MAX_VELOCITY_BONUS);
        reasons.push(format!(
            "Rapid growth: {:.0} interactions per hour",
            metrics.velocity_score
        ));
    }

    if signals.hours_old > SUSTAINED_AGE_HOURS {
        let inflated = BREAKING_ENGAGEMENT_THRESHOLD * (1.0 + signals.hours_old / 24.0);
        if total > inflated {
            score += 75.0;
            reasons.push(format!(
                "Sustained engagement after {:.0} hours",
                signals.hours_old
            ));
        }
    }

    if signals.has_breaking_indicators {
        score += 25.0;
        reasons.push("Contains breaking news indicators".to_string());
    }

    if signals.source_multiplier >= MAJOR_SOURCE_MULTIPLIER {
        score += 20.0;
        reasons.push("Reported by a major news outlet".to_string());
    }

    if metrics.engagement_rate > HIGH_RATE_THRESHOLD {
        score += 30.0;
        reasons.push(format!(
            "High engagement rate: {:.2}",
            metrics.engagement_rate
        ));
    }

    let is_breaking = score >= BREAKING_SCORE_THRESHOLD;
    let time_to_breaking = (is_breaking && metrics.velocity_score > 0.0)
        .then(|| BREAKING_ENGAGEMENT_THRESHOLD / metrics.velocity_score * 60.0);

    let breaking_reason = if reasons.is_empty() {
        "No significant engagement signals".to_string()
    } else {
        reasons.join("; ")
    };

    BreakingNewsClassification {
        is_breaking,
        breaking_score: score,
        engagement_metrics: *metrics,
        breaking_reason,
        time_to_breaking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn quiet_signals(hours_old: f64) -> EngagementSignals {
        EngagementSignals {
            hours_old,
            source_multiplier: 1.0,
            topic_multiplier: 1.0,
            has_breaking_indicators: false,
        }
    }

    fn forced_metrics(total: u64, rate: f64, velocity: f64) -> EngagementMetrics {
        EngagementMetrics {
            views: total,
            shares: 0,
            comments: 0,
            reactions: 0,
            total_engagement: total,
            engagement_rate: rate,
            velocity_score: velocity,
        }
    }

    #[test]
    fn test_threshold_engagement_alone_is_breaking() {
        let result = score_breaking_news(
            &quiet_signals(2.0),
            &forced_metrics(150_000, 0.2, 500.0),
        );
        assert_eq!(result.breaking_score, 100.0);
        assert!(result.is_breaking);
        assert!(result.breaking_reason.contains("High engagement"));
        assert!((result.time_to_breaking.unwrap() - 18_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_below_threshold_is_not_breaking() {
        let result = score_breaking_news(
            &quiet_signals(2.0),
            &forced_metrics(149_999, 0.2, 500.0),
        );
        assert_eq!(result.breaking_score, 0.0);
        assert!(!result.is_breaking);
        assert!(result.time_to_breaking.is_none());
        assert_eq!(result.breaking_reason, "No significant engagement signals");
    }

    #[test]
    fn test_velocity_bonus_is_capped() {
        let result = score_breaking_news(
            &quiet_signals(2.0),
            &forced_metrics(10_000, 0.2, 1_000_000.0),
        );
        assert_eq!(result.breaking_score, 50.0);

        let result = score_breaking_news(
            &quiet_signals(2.0),
            &forced_metrics(10_000, 0.2, 2_000.0),
        );
        assert_eq!(result.breaking_score, 20.0);
    }

    #[test]
    fn test_sustained_engagement_bonus() {
        // 48h old: inflated threshold is 450,000.
        let result = score_breaking_news(
            &quiet_signals(48.0),
            &forced_metrics(450_001, 0.2, 0.0),
        );
        assert_eq!(result.breaking_score, 175.0);

        let result = score_breaking_news(
            &quiet_signals(48.0),
            &forced_metrics(450_000, 0.2, 0.0),
        );
        assert_eq!(result.breaking_score, 100.0);
    }

    #[test]
    fn test_indicator_source_and_rate_bonuses_add_up() {
        let signals = EngagementSignals {
            hours_old: 1.0,
            source_multiplier: 3.0,
            topic_multiplier: 1.0,
            has_breaking_indicators: true,
        };
        let result = score_breaking_news(&signals, &forced_metrics(1_000, 1.5, 10.0));
        assert_eq!(result.breaking_score, 75.0);
        assert!(!result.is_breaking);
    }

    #[test]
    fn test_is_breaking_matches_score_over_random_runs() {
        let now = Utc::now();
        let articles = vec![
            Article::new("Local bake sale", "").with_published_at(now - Duration::hours(30)),
            Article::new("BREAKING: election results confirmed", "")
                .with_source("Reuters")
                .with_published_at(now - Duration::minutes(20)),
            Article::new("Startup launch", "")
                .with_source("TechCrunch")
                .with_published_at(now - Duration::hours(6)),
            Article::new("No timestamp here", ""),
        ];
        let mut rng = StdRng::seed_from_u64(2026);

        for _ in 0..200 {
            for article in &articles {
                let result = classify_breaking_news_with(article, now, &mut rng);
                assert_eq!(result.is_breaking, result.breaking_score >= 100.0);
                if result.is_breaking {
                    assert!(result.time_to_breaking.is_some());
                }
            }
        }
    }

    #[test]
    fn test_default_entry_point_holds_invariant() {
        let article = Article::new("Markets rally", "").with_source("Bloomberg");
        for _ in 0..20 {
            let result = classify_breaking_news(&article);
            assert_eq!(result.is_breaking, result.breaking_score >= 100.0);
        }
    }
}
