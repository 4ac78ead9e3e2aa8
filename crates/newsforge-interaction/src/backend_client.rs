//! BackendClient - view tracking, affiliate links, newsletter subscription and
//! logout.

use async_trait::async_trait;
use newsforge_core::config::Settings;
use newsforge_core::error::{NewsforgeError, Result};
use newsforge_core::search::{MostViewedEntry, ViewTracker};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::http::BackendHttp;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewBody<'a> {
    article_id: &'a str,
}

#[derive(Serialize)]
struct SubscribeBody<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MostViewedEnvelope {
    Wrapped {
        #[serde(alias = "items")]
        articles: Vec<MostViewedEntry>,
    },
    Bare(Vec<MostViewedEntry>),
}

/// Partner link offered next to an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLink {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AffiliateStats {
    pub clicks: u64,
    pub conversions: u64,
    pub revenue: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AffiliateLinkEnvelope {
    Wrapped { link: AffiliateLink },
    Bare(AffiliateLink),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AffiliateStatsEnvelope {
    Wrapped { stats: AffiliateStats },
    Bare(AffiliateStats),
}

/// Validates an email address the way the subscribe form does.
pub fn validate_email(email: &str) -> Result<&str> {
    let email = email.trim();
    if EMAIL_RE.is_match(email) {
        Ok(email)
    } else {
        Err(NewsforgeError::invalid_input(format!(
            "'{}' is not a valid email address",
            email
        )))
    }
}

#[derive(Clone, Default)]
pub struct BackendClient {
    http: BackendHttp,
}

impl BackendClient {
    pub fn new(http: BackendHttp) -> Self {
        Self { http }
    }

    pub async fn subscribe(&self, settings: &Settings, email: &str) -> Result<()> {
        let email = validate_email(email)?;
        self.http
            .post_unit(&settings.backend, "/api/subscribe", &SubscribeBody { email })
            .await?;
        tracing::info!("Newsletter subscription submitted");
        Ok(())
    }

    /// Partner link for `topic`. `None` when the backend has none or the call
    /// fails; failures are only logged.
    pub async fn affiliate_link(&self, settings: &Settings, topic: &str) -> Option<AffiliateLink> {
        let query = [("topic", topic.trim().to_string())];
        let result: Result<AffiliateLinkEnvelope> = self
            .http
            .get_json(&settings.backend, "/api/affiliate/link", &query)
            .await;
        match result {
            Ok(AffiliateLinkEnvelope::Wrapped { link } | AffiliateLinkEnvelope::Bare(link))
                if !link.url.trim().is_empty() =>
            {
                Some(link)
            }
            Ok(_) => None,
            Err(err) => {
                tracing::warn!("Failed to load affiliate link: {}", err);
                None
            }
        }
    }

    /// Aggregate affiliate counters; zeroes when the call fails.
    pub async fn affiliate_stats(&self, settings: &Settings) -> AffiliateStats {
        let result: Result<AffiliateStatsEnvelope> = self
            .http
            .get_json(&settings.backend, "/api/affiliate/stats", &[])
            .await;
        match result {
            Ok(AffiliateStatsEnvelope::Wrapped { stats } | AffiliateStatsEnvelope::Bare(stats)) => {
                stats
            }
            Err(err) => {
                tracing::warn!("Failed to load affiliate stats: {}", err);
                AffiliateStats::default()
            }
        }
    }

    pub async fn logout(&self, settings: &Settings) -> Result<()> {
        self.http
            .post_unit(&settings.backend, "/api/logout", &serde_json::json!({}))
            .await
    }
}

#[async_trait]
impl ViewTracker for BackendClient {
    async fn record_view(&self, settings: &Settings, article_id: &str) -> Result<()> {
        if article_id.trim().is_empty() {
            return Err(NewsforgeError::invalid_input("Article id cannot be empty"));
        }
        self.http
            .post_unit(&settings.backend, "/api/article/view", &ViewBody { article_id })
            .await
    }

    async fn most_viewed(
        &self,
        settings: &Settings,
        limit: usize,
    ) -> Result<Vec<MostViewedEntry>> {
        let query = [("limit", limit.to_string())];
        let envelope: MostViewedEnvelope = self
            .http
            .get_json(&settings.backend, "/api/article/most-viewed", &query)
            .await?;
        let entries = match envelope {
            MostViewedEnvelope::Wrapped { articles } | MostViewedEnvelope::Bare(articles) => {
                articles
            }
        };
        Ok(entries.into_iter().take(limit).collect())
    }
}
