//! Primitive text operations applied by the editing engine.

use regex::{Regex, RegexBuilder};

use crate::article::text::{join_paragraphs, split_paragraphs, split_sentences};
use crate::error::{NewsforgeError, Result};

const TRANSITIONS: &[&str] = &["Furthermore", "In addition", "Moreover", "Meanwhile"];

/// Where an insertion lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertPosition {
    /// New paragraph after the paragraph at this index (clamped).
    AfterParagraph(usize),
    /// New paragraph before the last paragraph, or at the end when there is
    /// only one.
    BeforeConclusion,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// Every case-insensitive occurrence of the literal text.
    Literal(String),
    /// Keep only the first `n` sentences of each paragraph.
    SentencesBeyond(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestructureKind {
    /// Split paragraphs longer than `max_sentences` sentences.
    SplitParagraphs { max_sentences: usize },
    /// Prefix middle paragraphs with transition words.
    AddTransitions,
}

/// A single transformation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    /// Case-insensitive literal replacement of every occurrence; a capitalized
    /// match gets a capitalized replacement.
    Replace { target: String, replacement: String },
    Insert { text: String, position: InsertPosition },
    Delete { target: DeleteTarget },
    /// Whole-word dictionary substitution preserving leading capitals.
    Rephrase {
        dictionary: &'static [(&'static str, &'static str)],
    },
    Restructure(RestructureKind),
}

impl EditOperation {
    /// Applies the operation to `content`, returning the new content.
    ///
    /// Text outside the matched or inserted spans is left as it was.
    pub fn apply(&self, content: &str) -> Result<String> {
        let updated = match self {
            EditOperation::Replace {
                target,
                replacement,
            } => replace_literal(content, target, replacement)?,
            EditOperation::Insert { text, position } => insert_paragraph(content, text, position),
            EditOperation::Delete {
                target: DeleteTarget::Literal(target),
            } => replace_literal(content, target, "")?,
            EditOperation::Delete {
                target: DeleteTarget::SentencesBeyond(keep),
            } => keep_leading_sentences(content, *keep),
            EditOperation::Rephrase { dictionary } => rephrase(content, dictionary)?,
            EditOperation::Restructure(RestructureKind::SplitParagraphs { max_sentences }) => {
                split_long_paragraphs(content, *max_sentences)
            }
            EditOperation::Restructure(RestructureKind::AddTransitions) => add_transitions(content),
        };
        Ok(updated)
    }

    /// Whether this operation also applies to the article title.
    pub fn touches_title(&self) -> bool {
        matches!(self, EditOperation::Replace { .. })
    }
}

fn replace_literal(content: &str, target: &str, replacement: &str) -> Result<String> {
    if target.trim().is_empty() {
        return Err(NewsforgeError::editing("Cannot match an empty text fragment"));
    }
    let re = RegexBuilder::new(&regex::escape(target))
        .case_insensitive(true)
        .build()
        .map_err(|e| NewsforgeError::editing(format!("Invalid target '{}': {}", target, e)))?;

    if !re.is_match(content) {
        tracing::debug!("Edit target '{}' not found in content", target);
    }
    Ok(substitute(content, &re, |matched| match_case(matched, replacement)))
}

fn insert_paragraph(content: &str, text: &str, position: &InsertPosition) -> String {
    let mut paragraphs = split_paragraphs(content);
    let text = text.trim().to_string();
    let index = match position {
        InsertPosition::AfterParagraph(i) => (*i + 1).min(paragraphs.len()),
        InsertPosition::BeforeConclusion if paragraphs.len() >= 2 => paragraphs.len() - 1,
        InsertPosition::BeforeConclusion | InsertPosition::End => paragraphs.len(),
    };
    paragraphs.insert(index, text);
    join_paragraphs(&paragraphs)
}

fn keep_leading_sentences(content: &str, keep: usize) -> String {
    let keep = keep.max(1);
    let paragraphs: Vec<String> = split_paragraphs(content)
        .into_iter()
        .map(|paragraph| {
            let sentences = split_sentences(&paragraph);
            if sentences.len() <= keep {
                paragraph
            } else {
                sentences[..keep].join(" ")
            }
        })
        .collect();
    join_paragraphs(&paragraphs)
}

fn rephrase(content: &str, dictionary: &[(&str, &str)]) -> Result<String> {
    let mut updated = content.to_string();
    for (from, to) in dictionary {
        let pattern = format!(r"\b{}\b", regex::escape(from));
        let re = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| NewsforgeError::editing(format!("Invalid dictionary entry '{}': {}", from, e)))?;
        updated = substitute(&updated, &re, |matched| match_case(matched, to));
    }
    Ok(updated)
}

fn match_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn split_long_paragraphs(content: &str, max_sentences: usize) -> String {
    let max_sentences = max_sentences.max(1);
    let mut paragraphs = Vec::new();
    for paragraph in split_paragraphs(content) {
        let sentences = split_sentences(&paragraph);
        if sentences.len() <= max_sentences {
            paragraphs.push(paragraph);
            continue;
        }
        paragraphs.extend(sentences.chunks(max_sentences).map(|chunk| chunk.join(" ")));
    }
    join_paragraphs(&paragraphs)
}

fn add_transitions(content: &str) -> String {
    let mut paragraphs = split_paragraphs(content);
    let last = paragraphs.len().saturating_sub(1);
    let mut transition = TRANSITIONS.iter().cycle();

    for paragraph in paragraphs.iter_mut().take(last).skip(1) {
        if TRANSITIONS.iter().any(|t| paragraph.starts_with(t)) {
            continue;
        }
        let Some(word) = transition.next() else {
            break;
        };
        *paragraph = format!("{}, {}", word, lowercase_first(paragraph));
    }
    join_paragraphs(&paragraphs)
}

/// Lowercases the first letter unless the first word looks like an acronym.
fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_lowercase() => {
            first.to_lowercase().chain(text.chars().skip(1)).collect()
        }
        _ => text.to_string(),
    }
}

/// Replaces every match of `re`. A match replaced by nothing takes its
/// surrounding spaces with it, and paragraphs left empty are dropped.
fn substitute<F>(content: &str, re: &Regex, mut replacement: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    let mut removed = false;

    for m in re.find_iter(content) {
        if m.start() < cursor {
            continue;
        }
        out.push_str(&content[cursor..m.start()]);
        cursor = m.end();

        let replaced = replacement(m.as_str());
        if !replaced.is_empty() {
            out.push_str(&replaced);
            continue;
        }

        removed = true;
        let rest = &content[cursor..];
        let after = rest.trim_start_matches([' ', '\t']);
        cursor += rest.len() - after.len();
        out.truncate(out.trim_end_matches([' ', '\t']).len());
        if joins_words(out.chars().last(), after.chars().next()) {
            out.push(' ');
        }
    }
    out.push_str(&content[cursor..]);

    if removed {
        join_paragraphs(&split_paragraphs(&out))
    } else {
        out
    }
}

/// Whether the text on both sides of a removed span needs a separating space.
fn joins_words(before: Option<char>, after: Option<char>) -> bool {
    let opens = |c: char| c.is_whitespace() || matches!(c, '(' | '[' | '"' | '“');
    let closes = |c: char| {
        c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '!' | '?' | ')' | ']' | '"' | '”')
    };
    matches!((before, after), (Some(b), Some(a)) if !opens(b) && !closes(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Intro sentence one. Intro sentence two. Intro three.\n\nThe middle part is here.\n\nIn conclusion, it ends.";

    #[test]
    fn test_replace_is_case_insensitive_and_literal() {
        let op = EditOperation::Replace {
            target: "intro".to_string(),
            replacement: "$1 Opening".to_string(),
        };
        let out = op.apply(SAMPLE).unwrap();
        assert!(out.starts_with("$1 Opening sentence one."));
        assert!(!out.to_lowercase().contains("intro"));
    }

    #[test]
    fn test_insert_before_conclusion() {
        let op = EditOperation::Insert {
            text: "A new point.".to_string(),
            position: InsertPosition::BeforeConclusion,
        };
        let out = op.apply(SAMPLE).unwrap();
        let paragraphs = split_paragraphs(&out);
        assert_eq!(paragraphs.len(), 4);
        assert_eq!(paragraphs[2], "A new point.");
    }

    #[test]
    fn test_delete_literal_cleans_spacing() {
        let op = EditOperation::Delete {
            target: DeleteTarget::Literal("part".to_string()),
        };
        let out = op.apply(SAMPLE).unwrap();
        assert!(out.contains("The middle is here."));
    }

    #[test]
    fn test_keep_leading_sentences() {
        let op = EditOperation::Delete {
            target: DeleteTarget::SentencesBeyond(1),
        };
        let out = op.apply(SAMPLE).unwrap();
        assert!(out.starts_with("Intro sentence one.\n\n"));
    }

    #[test]
    fn test_rephrase_preserves_capitalization() {
        static DICT: &[(&str, &str)] = &[("use", "utilize"), ("help", "assist")];
        let op = EditOperation::Rephrase { dictionary: DICT };
        let out = op.apply("Use tools that help. Users use them.").unwrap();
        assert_eq!(out, "Utilize tools that assist. Users utilize them.");
    }

    #[test]
    fn test_split_long_paragraphs() {
        let op = EditOperation::Restructure(RestructureKind::SplitParagraphs { max_sentences: 2 });
        let out = op.apply(SAMPLE).unwrap();
        assert_eq!(split_paragraphs(&out).len(), 4);
    }

    #[test]
    fn test_transitions_only_touch_middle_paragraphs() {
        let content = "First.\n\nSecond point.\n\nThird point.\n\nLast.";
        let op = EditOperation::Restructure(RestructureKind::AddTransitions);
        let out = op.apply(content).unwrap();
        assert_eq!(
            out,
            "First.\n\nFurthermore, second point.\n\nIn addition, third point.\n\nLast."
        );
    }

    #[test]
    fn test_insert_keeps_text_verbatim() {
        let content = "Bonjour !  Ça va ?\n\nFin.";
        let op = EditOperation::Insert {
            text: "Score : 3-1,  final.".to_string(),
            position: InsertPosition::End,
        };
        assert_eq!(
            op.apply(content).unwrap(),
            "Bonjour !  Ça va ?\n\nFin.\n\nScore : 3-1,  final."
        );
    }

    #[test]
    fn test_delete_only_touches_the_removed_span() {
        let content = "Keep  this : as is.\n\nDrop the word here.";
        let op = EditOperation::Delete {
            target: DeleteTarget::Literal("word".to_string()),
        };
        assert_eq!(
            op.apply(content).unwrap(),
            "Keep  this : as is.\n\nDrop the here."
        );
    }

    #[test]
    fn test_delete_before_punctuation_leaves_no_gap() {
        let op = EditOperation::Delete {
            target: DeleteTarget::Literal("now".to_string()),
        };
        assert_eq!(op.apply("It ends now.").unwrap(), "It ends.");
    }

    #[test]
    fn test_deleting_a_whole_paragraph_drops_it() {
        let op = EditOperation::Delete {
            target: DeleteTarget::Literal("Gone.".to_string()),
        };
        assert_eq!(op.apply("First.\n\nGone.\n\nLast.").unwrap(), "First.\n\nLast.");
    }

    #[test]
    fn test_empty_target_is_an_error() {
        let op = EditOperation::Replace {
            target: "  ".to_string(),
            replacement: "x".to_string(),
        };
        assert!(op.apply(SAMPLE).unwrap_err().is_editing());
    }
}
