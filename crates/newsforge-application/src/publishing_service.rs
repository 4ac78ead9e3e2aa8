//! Publishing is a log entry plus a receipt; nothing leaves the process.

use chrono::{DateTime, Utc};
use newsforge_core::article::SynthesizedArticle;
use newsforge_core::error::{NewsforgeError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    pub receipt_id: String,
    pub article_id: String,
    pub title: String,
    pub word_count: usize,
    pub ai_model_used: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct PublishingService;

impl PublishingService {
    pub fn new() -> Self {
        Self
    }

    pub fn publish(&self, article: &SynthesizedArticle) -> Result<PublishReceipt> {
        if article.content.trim().is_empty() {
            return Err(NewsforgeError::invalid_input(
                "Cannot publish an article without content",
            ));
        }

        let receipt = PublishReceipt {
            receipt_id: uuid::Uuid::new_v4().to_string(),
            article_id: article.id.clone(),
            title: article.title.clone(),
            word_count: article.word_count,
            ai_model_used: article.processing_metrics.ai_model_used.clone(),
            published_at: Utc::now(),
        };
        tracing::info!(
            "Published article {} '{}' ({} words, {})",
            receipt.article_id,
            receipt.title,
            receipt.word_count,
            receipt.ai_model_used
        );
        Ok(receipt)
    }
}
