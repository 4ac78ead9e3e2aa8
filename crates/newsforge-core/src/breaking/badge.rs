use serde::Serialize;

use super::classifier::BreakingNewsClassification;

const VIRAL_ENGAGEMENT: u64 = 1_000_000;
const MAJOR_ENGAGEMENT: u64 = 500_000;
const TRENDING_VELOCITY: f64 = 5_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BadgeKind {
    Viral,
    Major,
    Trending,
    Breaking,
}

impl BadgeKind {
    pub fn label(&self) -> &'static str {
        match self {
            BadgeKind::Viral => "VIRAL",
            BadgeKind::Major => "MAJOR",
            BadgeKind::Trending => "TRENDING",
            BadgeKind::Breaking => "BREAKING",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BadgeKind::Viral => "🔥",
            BadgeKind::Major => "⚡",
            BadgeKind::Trending => "📈",
            BadgeKind::Breaking => "🚨",
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            BadgeKind::Viral => "bg-red-600 text-white animate-pulse",
            BadgeKind::Major => "bg-orange-500 text-white",
            BadgeKind::Trending => "bg-blue-500 text-white",
            BadgeKind::Breaking => "bg-red-500 text-white",
        }
    }
}

/// What the UI should render next to an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakingNewsBadge {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<BadgeKind>,
    pub label: &'static str,
    pub icon: &'static str,
    pub class_name: &'static str,
}

impl BreakingNewsBadge {
    /// The "don't show" sentinel.
    pub fn hidden() -> Self {
        Self {
            show: false,
            kind: None,
            label: "",
            icon: "",
            class_name: "",
        }
    }

    fn of(kind: BadgeKind) -> Self {
        Self {
            show: true,
            kind: Some(kind),
            label: kind.label(),
            icon: kind.icon(),
            class_name: kind.class_name(),
        }
    }
}

/// Picks the most prominent badge: VIRAL, then MAJOR, then TRENDING, else BREAKING.
pub fn get_breaking_news_badge(classification: &BreakingNewsClassification) -> BreakingNewsBadge {
    if !classification.is_breaking {
        return BreakingNewsBadge::hidden();
    }

    let metrics = &classification.engagement_metrics;
    let kind = if metrics.total_engagement >= VIRAL_ENGAGEMENT {
        BadgeKind::Viral
    } else if metrics.total_engagement >= MAJOR_ENGAGEMENT {
        BadgeKind::Major
    } else if metrics.velocity_score >= TRENDING_VELOCITY {
        BadgeKind::Trending
    } else {
        BadgeKind::Breaking
    };

    BreakingNewsBadge::of(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaking::EngagementMetrics;

    fn classification(is_breaking: bool, total: u64, velocity: f64) -> BreakingNewsClassification {
        BreakingNewsClassification {
            is_breaking,
            breaking_score: if is_breaking { 100.0 } else { 0.0 },
            engagement_metrics: EngagementMetrics {
                views: total,
                shares: 0,
                comments: 0,
                reactions: 0,
                total_engagement: total,
                engagement_rate: 1.0,
                velocity_score: velocity,
            },
            breaking_reason: String::new(),
            time_to_breaking: None,
        }
    }

    #[test]
    fn test_hidden_when_not_breaking() {
        let badge = get_breaking_news_badge(&classification(false, 2_000_000, 20_000.0));
        assert!(!badge.show);
        assert_eq!(badge, BreakingNewsBadge::hidden());
    }

    #[test]
    fn test_priority_order() {
        let badge = get_breaking_news_badge(&classification(true, 2_000_000, 20_000.0));
        assert_eq!(badge.label, "VIRAL");

        let badge = get_breaking_news_badge(&classification(true, 600_000, 20_000.0));
        assert_eq!(badge.kind, Some(BadgeKind::Major));

        let badge = get_breaking_news_badge(&classification(true, 200_000, 5_000.0));
        assert_eq!(badge.kind, Some(BadgeKind::Trending));

        let badge = get_breaking_news_badge(&classification(true, 200_000, 4_999.0));
        assert_eq!(badge.kind, Some(BadgeKind::Breaking));
        assert_eq!(badge.icon, "🚨");
    }
}
