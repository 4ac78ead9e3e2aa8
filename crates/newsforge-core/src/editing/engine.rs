use std::time::Instant;

use super::intent::{EditIntent, LengthDirection, ToneTarget, classify_instruction};
use super::operation::{DeleteTarget, EditOperation, InsertPosition, RestructureKind};
use crate::article::SynthesizedArticle;
use crate::article::text::split_paragraphs;
use crate::error::{NewsforgeError, Result};

/// `ai_model_used` stamped on articles edited locally.
pub const LOCAL_ENGINE_MODEL: &str = "advanced-editing-engine";

const FORMAL_DICTIONARY: &[(&str, &str)] = &[
    ("don't", "do not"),
    ("can't", "cannot"),
    ("won't", "will not"),
    ("it's", "it is"),
    ("get", "obtain"),
    ("show", "demonstrate"),
    ("big", "significant"),
    ("help", "assist"),
    ("buy", "purchase"),
    ("need", "require"),
    ("lots of", "numerous"),
];

const CASUAL_DICTIONARY: &[(&str, &str)] = &[
    ("however", "but"),
    ("therefore", "so"),
    ("utilize", "use"),
    ("demonstrate", "show"),
    ("purchase", "buy"),
    ("require", "need"),
    ("approximately", "about"),
    ("do not", "don't"),
    ("it is", "it's"),
];

const CLARITY_DICTIONARY: &[(&str, &str)] = &[
    ("in order to", "to"),
    ("due to the fact that", "because"),
    ("at this point in time", "now"),
    ("in the event that", "if"),
    ("a large number of", "many"),
    ("prior to", "before"),
    ("utilize", "use"),
    ("commence", "start"),
];

const FILLER_DICTIONARY: &[(&str, &str)] = &[
    ("very", ""),
    ("really", ""),
    ("basically", ""),
    ("actually", ""),
    ("quite", ""),
];

const KEEP_SENTENCES_WHEN_SHORTENING: usize = 2;
const MAX_SENTENCES_PER_PARAGRAPH: usize = 3;

/// Best-effort local editor: classifies an instruction, plans primitive text
/// operations and applies them in order.
#[derive(Debug, Clone, Default)]
pub struct AdvancedEditingEngine;

impl AdvancedEditingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Plans the operations for `instructions` against `article`.
    pub fn plan(&self, article: &SynthesizedArticle, instructions: &str) -> Vec<EditOperation> {
        classify_instruction(instructions)
            .into_iter()
            .flat_map(|intent| self.operations_for(article, intent))
            .collect()
    }

    /// Edits `article` according to `instructions`.
    ///
    /// Errors are returned to the caller as-is; nothing is swallowed here.
    pub fn edit(
        &self,
        article: &SynthesizedArticle,
        instructions: &str,
    ) -> Result<SynthesizedArticle> {
        if instructions.trim().is_empty() {
            return Err(NewsforgeError::editing("Edit instructions cannot be empty"));
        }
        if article.content.trim().is_empty() {
            return Err(NewsforgeError::editing("Article has no content to edit"));
        }

        let started = Instant::now();
        let operations = self.plan(article, instructions);
        tracing::debug!(
            "Applying {} edit operations to article {}",
            operations.len(),
            article.id
        );

        let mut content = article.content.clone();
        let mut title = article.title.clone();
        for operation in &operations {
            content = operation.apply(&content)?;
            if operation.touches_title() {
                title = operation.apply(&title)?;
            }
        }

        if content.trim().is_empty() {
            return Err(NewsforgeError::editing(
                "Edit would leave the article without content",
            ));
        }

        let mut edited = article.clone();
        if !title.trim().is_empty() {
            edited.title = title;
        }
        edited.replace_content(content);
        edited.processing_metrics.ai_model_used = LOCAL_ENGINE_MODEL.to_string();
        edited.processing_metrics.processing_time_ms = started.elapsed().as_millis() as u64;
        Ok(edited)
    }

    fn operations_for(&self, article: &SynthesizedArticle, intent: EditIntent) -> Vec<EditOperation> {
        match intent {
            EditIntent::ToneChange(ToneTarget::Formal) => vec![EditOperation::Rephrase {
                dictionary: FORMAL_DICTIONARY,
            }],
            EditIntent::ToneChange(ToneTarget::Casual) => vec![EditOperation::Rephrase {
                dictionary: CASUAL_DICTIONARY,
            }],
            EditIntent::LengthChange(LengthDirection::Shorten) => vec![EditOperation::Delete {
                target: DeleteTarget::SentencesBeyond(KEEP_SENTENCES_WHEN_SHORTENING),
            }],
            EditIntent::LengthChange(LengthDirection::Expand) => vec![EditOperation::Insert {
                text: format!(
                    "Looking more closely at {}, the details matter: each development builds on earlier reporting and shapes what comes next. Readers following the story should watch how these threads connect over the coming weeks.",
                    article.topic
                ),
                position: InsertPosition::BeforeConclusion,
            }],
            EditIntent::ContentAddition(text) => vec![EditOperation::Insert {
                text,
                position: InsertPosition::BeforeConclusion,
            }],
            EditIntent::ContentRemoval(target) => vec![EditOperation::Delete {
                target: DeleteTarget::Literal(target),
            }],
            EditIntent::ContentReplacement {
                target,
                replacement,
            } => vec![EditOperation::Replace {
                target,
                replacement,
            }],
            EditIntent::StructureChange => vec![EditOperation::Restructure(
                RestructureKind::SplitParagraphs {
                    max_sentences: MAX_SENTENCES_PER_PARAGRAPH,
                },
            )],
            EditIntent::ClarityImprovement => vec![EditOperation::Rephrase {
                dictionary: CLARITY_DICTIONARY,
            }],
            EditIntent::FactualEnhancement => vec![EditOperation::Insert {
                text: factual_sentence(article),
                position: InsertPosition::AfterParagraph(0),
            }],
            EditIntent::FlowImprovement => {
                vec![EditOperation::Restructure(RestructureKind::AddTransitions)]
            }
            EditIntent::GeneralImprovement => {
                let mut ops = vec![EditOperation::Rephrase {
                    dictionary: FILLER_DICTIONARY,
                }];
                if split_paragraphs(&article.content).len() > 2 {
                    ops.push(EditOperation::Restructure(RestructureKind::AddTransitions));
                }
                ops
            }
        }
    }
}

fn factual_sentence(article: &SynthesizedArticle) -> String {
    match article.source_ids.len() {
        0 => format!(
            "According to available reporting on {}, these points are consistent with published accounts.",
            article.topic
        ),
        1 => format!(
            "According to the source reporting on {}, these points are supported by the original coverage.",
            article.topic
        ),
        n => format!(
            "According to {} independent sources on {}, these points are corroborated across the coverage.",
            n, article.topic
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{ProcessingMetrics, Tone, WritingStyle};
    use chrono::Utc;

    fn sample_article() -> SynthesizedArticle {
        let mut article = SynthesizedArticle {
            id: "art-1".to_string(),
            title: "Grid upgrades accelerate".to_string(),
            content: "Utilities are really investing in the grid. Demand is rising fast. Regulators approved new plans. Costs remain a concern.\n\nThe CEO said upgrades will help customers.\n\nIn conclusion, the grid is changing.".to_string(),
            summary: "Utilities invest in the grid.".to_string(),
            topic: "grid modernization".to_string(),
            word_count: 0,
            reading_time: 0,
            style: WritingStyle::Journalistic,
            tone: Tone::Professional,
            source_ids: vec!["s1".to_string(), "s2".to_string()],
            created_at: Utc::now(),
            processing_metrics: ProcessingMetrics {
                ai_model_used: "gpt-4o".to_string(),
                content_quality_score: 88,
                processing_time_ms: 1200,
                sources_processed: 2,
            },
            seo_metadata: None,
            fact_check_results: None,
        };
        article.refresh_metrics();
        article
    }

    #[test]
    fn test_add_quoted_text_lands_in_content() {
        let engine = AdvancedEditingEngine::new();
        let edited = engine
            .edit(&sample_article(), r#"add "Crews start work in March.""#)
            .unwrap();

        assert!(edited.content.contains("Crews start work in March."));
        assert_eq!(edited.processing_metrics.ai_model_used, LOCAL_ENGINE_MODEL);
        assert_eq!(edited.word_count, sample_article().word_count + 5);
    }

    #[test]
    fn test_added_text_is_not_reformatted() {
        let engine = AdvancedEditingEngine::new();
        let mut article = sample_article();
        article.content = "Bonjour !  Ça va ?\n\nEnd.".to_string();

        let edited = engine
            .edit(&article, r#"add "Q1  results beat forecasts : 3-1.""#)
            .unwrap();

        assert!(edited.content.contains("Q1  results beat forecasts : 3-1."));
        assert!(edited.content.starts_with("Bonjour !  Ça va ?\n\n"));
    }

    #[test]
    fn test_replacement_applies_to_title_and_body() {
        let engine = AdvancedEditingEngine::new();
        let edited = engine
            .edit(&sample_article(), r#"replace "grid" with "network""#)
            .unwrap();
        assert_eq!(edited.title, "Network upgrades accelerate");
        assert!(!edited.content.contains("grid"));
    }

    #[test]
    fn test_shorten_reduces_word_count() {
        let engine = AdvancedEditingEngine::new();
        let original = sample_article();
        let edited = engine.edit(&original, "Make it shorter").unwrap();
        assert!(edited.word_count < original.word_count);
        assert!(!edited.content.contains("Costs remain a concern."));
    }

    #[test]
    fn test_formal_tone_rephrases() {
        let engine = AdvancedEditingEngine::new();
        let edited = engine.edit(&sample_article(), "make it more formal").unwrap();
        assert!(edited.content.contains("will assist customers"));
    }

    #[test]
    fn test_factual_enhancement_mentions_sources() {
        let engine = AdvancedEditingEngine::new();
        let edited = engine.edit(&sample_article(), "back it up with evidence").unwrap();
        let paragraphs = split_paragraphs(&edited.content);
        assert!(paragraphs[1].starts_with("According to 2 independent sources"));
    }

    #[test]
    fn test_general_improvement_drops_filler() {
        let engine = AdvancedEditingEngine::new();
        let edited = engine.edit(&sample_article(), "polish it").unwrap();
        assert!(edited.content.starts_with("Utilities are investing in the grid."));
    }

    #[test]
    fn test_empty_instruction_is_an_error() {
        let engine = AdvancedEditingEngine::new();
        let err = engine.edit(&sample_article(), "   ").unwrap_err();
        assert!(err.is_editing());
    }

    #[test]
    fn test_removing_everything_is_an_error() {
        let engine = AdvancedEditingEngine::new();
        let mut article = sample_article();
        article.content = "Only this.".to_string();
        let err = engine.edit(&article, r#"remove "Only this.""#).unwrap_err();
        assert!(err.is_editing());
    }
}
