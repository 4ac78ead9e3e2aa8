//! Plain-text helpers shared by the simulator, the editing engine and the
//! quality heuristics.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Reading speed used for `reading_time`.
pub const WORDS_PER_MINUTE: usize = 200;

static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[^.!?]+[.!?]+["')\]]*\s*"#).expect("valid sentence regex"));

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z'-]+").expect("valid word regex"));

const STOPWORDS: &[&str] = &[
    "about", "after", "again", "also", "because", "been", "before", "being", "between", "both",
    "could", "does", "doing", "down", "during", "each", "from", "further", "have", "having",
    "here", "into", "itself", "just", "more", "most", "other", "over", "said", "same", "should",
    "some", "such", "than", "that", "their", "them", "then", "there", "these", "they", "this",
    "those", "through", "under", "until", "very", "were", "what", "when", "where", "which",
    "while", "will", "with", "would", "your", "says", "according", "year", "years",
];

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `word_count` words, rounded up, at least one.
pub fn calculate_reading_time(word_count: usize) -> u32 {
    let minutes = word_count.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Most frequent non-stopword terms across `texts`, highest count first.
///
/// Ties are broken alphabetically so the output is stable.
pub fn extract_keywords<'a, I>(texts: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for word in WORD_RE.find_iter(text) {
            let lower = word.as_str().to_lowercase();
            if lower.len() <= 3 || STOPWORDS.contains(&lower.as_str()) {
                continue;
            }
            *counts.entry(lower).or_default() += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(word, _)| word).collect()
}

/// Splits a paragraph into sentences, keeping terminal punctuation.
/// Trailing text without punctuation becomes its own sentence.
pub fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut consumed = 0;
    for m in SENTENCE_RE.find_iter(paragraph) {
        let sentence = m.as_str().trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        consumed = m.end();
    }
    let rest = paragraph[consumed..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

/// Paragraphs separated by blank lines, trimmed, empties dropped.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_paragraphs(paragraphs: &[String]) -> String {
    paragraphs.join("\n\n")
}

/// Lowercase, hyphen-separated slug for SEO metadata.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_dash = true;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Truncates at a char boundary and appends an ellipsis when shortened.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", truncated.trim_end())
}
