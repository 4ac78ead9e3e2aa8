//! Secondary outputs derived from a finished article: quality reports and
//! social-media copy.

use serde::{Deserialize, Serialize};

use crate::article::SynthesizedArticle;
use crate::article::text::{count_words, split_paragraphs, split_sentences};

/// Result of `/api/claude/quality`, or of the local heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    /// 0..=100
    pub score: u8,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

impl QualityAssessment {
    /// Scores an article on length, paragraphing, sentence length and
    /// source coverage.
    pub fn heuristic(article: &SynthesizedArticle) -> Self {
        let mut score: u32 = 40;
        let mut strengths = Vec::new();
        let mut improvements = Vec::new();

        let words = count_words(&article.content);
        if words >= 300 {
            score += 20;
            strengths.push("Substantial length".to_string());
        } else if words >= 150 {
            score += 10;
            improvements.push("Expand the body with more detail".to_string());
        } else {
            improvements.push("Article is too short to cover the topic".to_string());
        }

        let paragraphs = split_paragraphs(&article.content);
        if paragraphs.len() >= 3 {
            score += 15;
            strengths.push("Clear paragraph structure".to_string());
        } else {
            improvements.push("Break the text into more paragraphs".to_string());
        }

        let sentences: Vec<String> = paragraphs.iter().flat_map(|p| split_sentences(p)).collect();
        if !sentences.is_empty() {
            let average = words as f64 / sentences.len() as f64;
            if (8.0..=25.0).contains(&average) {
                score += 15;
                strengths.push("Readable sentence length".to_string());
            } else {
                improvements.push(format!(
                    "Average sentence length is {:.0} words; aim for 8 to 25",
                    average
                ));
            }
        }

        match article.processing_metrics.sources_processed {
            0 => improvements.push("No sources were used".to_string()),
            1 => {
                score += 5;
                improvements.push("Add more sources for balance".to_string());
            }
            _ => {
                score += 10;
                strengths.push("Draws on multiple sources".to_string());
            }
        }

        Self {
            score: score.min(100) as u8,
            strengths,
            improvements,
        }
    }
}

/// Short-form promotional copy for an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViralContent {
    pub hook: String,
    pub body: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}
