//! Instruction classification.
//!
//! Free-text edit instructions are matched against a fixed set of patterns.
//! Quoted fragments are captured verbatim for addition/removal/replacement and
//! are masked out before the keyword categories run, so quoted text cannot
//! trigger a category by accident.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use strum::{AsRefStr, Display};

static QUOTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["“”]([^"“”]+)["“”]"#).expect("valid quoted regex"));

static REPLACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:replace|change|swap)\s+["“]([^"“”]+)["”]\s+(?:with|to|for|into)\s+["“]([^"“”]+)["”]"#)
        .expect("valid replace regex")
});

static REMOVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:remove|delete|drop|cut)\s+(?:the\s+(?:word|phrase|sentence|text)\s+)?["“]([^"“”]+)["”]"#)
        .expect("valid remove regex")
});

static ADD_QUOTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:add|include|insert|append|mention)\b[^"“”]*?["“]([^"“”]+)["”]"#)
        .expect("valid add regex")
});

static ADD_TOPIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\badd\s+(?:a\s+|an\s+)?(?:section|paragraph|sentence|note)\s+(?:about|on)\s+([^.,;]+)")
        .expect("valid add-topic regex")
});

static TONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:(more|less)\s+)?(formal|professional|academic|casual|friendly|conversational|informal|relaxed)\b")
        .expect("valid tone regex")
});

static SHORTEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:shorten|shorter|condense|trim|reduce|concise|cut down|brief|briefer|tighten)\b")
        .expect("valid shorten regex")
});

static EXPAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:expand|longer|lengthen|elaborate|more details?|more detailed|flesh out)\b")
        .expect("valid expand regex")
});

static STRUCTURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:restructure|reorgani[sz]e|structure|paragraphs?|split|break up)\b")
        .expect("valid structure regex")
});

static CLARITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:clear|clearer|clarity|clarify|simplify|simpler|easier to (?:read|understand)|plain (?:english|language)|readab\w*)\b")
        .expect("valid clarity regex")
});

static FACTUAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:facts?|factual|statistics?|stats|data|evidence|citations?|sources?|accura\w*)\b")
        .expect("valid factual regex")
});

static FLOW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:flow|transitions?|smooth(?:er)?|coheren\w*|connect\w*)\b")
        .expect("valid flow regex")
});

/// Instruction category, in the order operations are planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EditCategory {
    ToneChange,
    LengthChange,
    ContentAddition,
    ContentRemoval,
    ContentReplacement,
    StructureChange,
    ClarityImprovement,
    FactualEnhancement,
    FlowImprovement,
    GeneralImprovement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneTarget {
    Formal,
    Casual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthDirection {
    Shorten,
    Expand,
}

/// One recognized request inside an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditIntent {
    ToneChange(ToneTarget),
    LengthChange(LengthDirection),
    ContentAddition(String),
    ContentRemoval(String),
    ContentReplacement { target: String, replacement: String },
    StructureChange,
    ClarityImprovement,
    FactualEnhancement,
    FlowImprovement,
    GeneralImprovement,
}

impl EditIntent {
    pub fn category(&self) -> EditCategory {
        match self {
            EditIntent::ToneChange(_) => EditCategory::ToneChange,
            EditIntent::LengthChange(_) => EditCategory::LengthChange,
            EditIntent::ContentAddition(_) => EditCategory::ContentAddition,
            EditIntent::ContentRemoval(_) => EditCategory::ContentRemoval,
            EditIntent::ContentReplacement { .. } => EditCategory::ContentReplacement,
            EditIntent::StructureChange => EditCategory::StructureChange,
            EditIntent::ClarityImprovement => EditCategory::ClarityImprovement,
            EditIntent::FactualEnhancement => EditCategory::FactualEnhancement,
            EditIntent::FlowImprovement => EditCategory::FlowImprovement,
            EditIntent::GeneralImprovement => EditCategory::GeneralImprovement,
        }
    }
}

/// Classifies `instructions` into an ordered list of intents.
///
/// Falls back to a single `GeneralImprovement` when nothing else matches.
pub fn classify_instruction(instructions: &str) -> Vec<EditIntent> {
    let mut intents = Vec::new();
    let unquoted = QUOTED_RE.replace_all(instructions, " ");
    let unquoted = ADD_TOPIC_RE.replace_all(&unquoted, " ").into_owned();

    if let Some(tone) = detect_tone(&unquoted) {
        intents.push(EditIntent::ToneChange(tone));
    }

    if SHORTEN_RE.is_match(&unquoted) {
        intents.push(EditIntent::LengthChange(LengthDirection::Shorten));
    } else if EXPAND_RE.is_match(&unquoted) {
        intents.push(EditIntent::LengthChange(LengthDirection::Expand));
    }

    // Replacement and removal consume their quoted spans first so that a
    // trailing "add" clause only sees its own quotes.
    let mut remaining = instructions.to_string();

    let replacements: Vec<(String, String)> = REPLACE_RE
        .captures_iter(instructions)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect();
    remaining = REPLACE_RE.replace_all(&remaining, " ").into_owned();

    let removals: Vec<String> = REMOVE_RE
        .captures_iter(&remaining)
        .map(|caps| caps[1].to_string())
        .collect();
    remaining = REMOVE_RE.replace_all(&remaining, " ").into_owned();

    let mut additions: Vec<String> = ADD_QUOTED_RE
        .captures_iter(&remaining)
        .map(|caps| caps[1].to_string())
        .collect();
    if additions.is_empty() {
        additions.extend(
            ADD_TOPIC_RE
                .captures_iter(&remaining)
                .map(|caps| format!("It is also worth considering {}.", caps[1].trim())),
        );
    }

    intents.extend(additions.into_iter().map(EditIntent::ContentAddition));
    intents.extend(removals.into_iter().map(EditIntent::ContentRemoval));
    intents.extend(
        replacements
            .into_iter()
            .map(|(target, replacement)| EditIntent::ContentReplacement { target, replacement }),
    );

    if STRUCTURE_RE.is_match(&unquoted) {
        intents.push(EditIntent::StructureChange);
    }
    if CLARITY_RE.is_match(&unquoted) {
        intents.push(EditIntent::ClarityImprovement);
    }
    if FACTUAL_RE.is_match(&unquoted) {
        intents.push(EditIntent::FactualEnhancement);
    }
    if FLOW_RE.is_match(&unquoted) {
        intents.push(EditIntent::FlowImprovement);
    }

    if intents.is_empty() {
        intents.push(EditIntent::GeneralImprovement);
    }

    intents
}

fn detect_tone(text: &str) -> Option<ToneTarget> {
    let caps = TONE_RE.captures(text)?;
    let base = match caps[2].to_lowercase().as_str() {
        "formal" | "professional" | "academic" => ToneTarget::Formal,
        _ => ToneTarget::Casual,
    };
    let less = caps
        .get(1)
        .is_some_and(|m| m.as_str().eq_ignore_ascii_case("less"));

    Some(match (base, less) {
        (ToneTarget::Formal, true) => ToneTarget::Casual,
        (ToneTarget::Casual, true) => ToneTarget::Formal,
        (target, false) => target,
    })
}
