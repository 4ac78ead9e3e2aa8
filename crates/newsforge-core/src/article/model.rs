use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::text::{calculate_reading_time, count_words};

/// A candidate source article, as returned by a search backend or supplied by
/// the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Opaque identifier, unique per article instance.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Creates an article with a freshly generated id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            description: None,
            source: None,
            url: None,
            published_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Title and description joined, used by keyword heuristics.
    pub fn headline_text(&self) -> String {
        match &self.description {
            Some(description) => format!("{} {}", self.title, description),
            None => self.title.clone(),
        }
    }
}

/// Writing style of a synthesized article.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WritingStyle {
    Academic,
    #[default]
    Journalistic,
    Blog,
    Technical,
    Creative,
    Business,
    Opinion,
}

/// Tone requested for synthesis.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Formal,
    Friendly,
    Authoritative,
    Neutral,
}

impl Tone {
    /// Short adverbial phrase used by the content templates.
    pub fn phrase(&self) -> &'static str {
        match self {
            Tone::Professional => "In practical terms",
            Tone::Casual => "Put simply",
            Tone::Formal => "It should be noted that",
            Tone::Friendly => "The good news is that",
            Tone::Authoritative => "The evidence is clear:",
            Tone::Neutral => "On balance",
        }
    }
}

/// Requested article length.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ArticleLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl ArticleLength {
    /// Approximate word target communicated to the backend.
    pub fn target_words(&self) -> usize {
        match self {
            ArticleLength::Short => 300,
            ArticleLength::Medium => 600,
            ArticleLength::Long => 1000,
        }
    }

    /// Number of body paragraphs produced by the local simulator.
    pub fn body_paragraphs(&self) -> usize {
        match self {
            ArticleLength::Short => 2,
            ArticleLength::Medium => 4,
            ArticleLength::Long => 7,
        }
    }
}

/// Which backend produced an article and how good it is believed to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingMetrics {
    pub ai_model_used: String,
    /// 0..=100
    pub content_quality_score: u8,
    pub processing_time_ms: u64,
    pub sources_processed: usize,
}

impl ProcessingMetrics {
    /// Suffix stamped on `ai_model_used` by the local fallback simulator.
    pub const SIMULATED_SUFFIX: &'static str = "-simulated";

    /// Whether the article came from the local fallback instead of a real model.
    pub fn is_simulated(&self) -> bool {
        self.ai_model_used.ends_with(Self::SIMULATED_SUFFIX)
    }
}

/// Display-only SEO fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    pub meta_title: String,
    pub meta_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub slug: String,
}

/// Cosmetic fact-check entry. Nothing here is verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactCheckResult {
    pub claim: String,
    pub verdict: String,
    pub confidence: f64,
}

/// An article produced by synthesis and refined by edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedArticle {
    pub id: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub topic: String,
    pub word_count: usize,
    /// Minutes at 200 words per minute, never below 1.
    pub reading_time: u32,
    pub style: WritingStyle,
    pub tone: Tone,
    #[serde(default)]
    pub source_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub processing_metrics: ProcessingMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_metadata: Option<SeoMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_check_results: Option<Vec<FactCheckResult>>,
}

impl SynthesizedArticle {
    /// Recomputes `word_count` and `reading_time` from the current content.
    pub fn refresh_metrics(&mut self) {
        self.word_count = count_words(&self.content);
        self.reading_time = calculate_reading_time(self.word_count);
    }

    /// Substitutes new content and refreshes derived counters.
    pub fn replace_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.refresh_metrics();
    }
}

/// Body sent to `/api/<provider>/synthesize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisRequest {
    pub sources: Vec<Article>,
    pub topic: String,
    pub style: WritingStyle,
    pub tone: Tone,
    pub length: ArticleLength,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_style_parses_case_insensitively() {
        assert_eq!(
            WritingStyle::from_str("Technical").unwrap(),
            WritingStyle::Technical
        );
        assert_eq!(WritingStyle::Opinion.as_ref(), "opinion");
        assert!(WritingStyle::from_str("poetry").is_err());
    }

    #[test]
    fn test_article_json_uses_camel_case() {
        let article = Article::new("Title", "Body").with_source("Reuters");
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["source"], "Reuters");
        assert!(json.get("publishedAt").is_none());

        let parsed: Article = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "title": "Storm hits coast",
            "publishedAt": "2026-01-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(parsed.content, "");
        assert!(parsed.published_at.is_some());
    }

    #[test]
    fn test_simulated_suffix_detection() {
        let metrics = ProcessingMetrics {
            ai_model_used: "chatgpt-simulated".to_string(),
            content_quality_score: 70,
            processing_time_ms: 0,
            sources_processed: 1,
        };
        assert!(metrics.is_simulated());
    }
}
