use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::language_utils;

// @module: Text preprocessing for the synthesis collaborator

// @const: Emoji and pictograph ranges stripped before synthesis
static EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "[\u{1F600}-\u{1F64F}\
         \u{1F300}-\u{1F5FF}\
         \u{1F680}-\u{1F6FF}\
         \u{1F700}-\u{1F77F}\
         \u{1F780}-\u{1F7FF}\
         \u{1F800}-\u{1F8FF}\
         \u{1F900}-\u{1F9FF}\
         \u{1FA00}-\u{1FA6F}\
         \u{1FA70}-\u{1FAFF}\
         \u{2600}-\u{26FF}\
         \u{2700}-\u{27BF}\
         \u{1F1E6}-\u{1F1FF}]+",
    )
    .unwrap()
});

// @const: Symbols dropped outright
static DROPPED_SYMBOLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[♥☆♡©\\]").unwrap());

// @const: Whitespace runs
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// @const: Acceptable final characters - anything else gets a closing period
static FINAL_PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?;:,'")\]}…。」』】〉》›»]$"#).unwrap()
});

/// Typographic characters replaced with plain ASCII equivalents
const REPLACEMENTS: &[(&str, &str)] = &[
    ("–", "-"),
    ("‑", "-"),
    ("—", "-"),
    ("_", " "),
    ("\u{201c}", "\""),
    ("\u{201d}", "\""),
    ("\u{2018}", "'"),
    ("\u{2019}", "'"),
    ("´", "'"),
    ("`", "'"),
    ("[", " "),
    ("]", " "),
    ("|", " "),
    ("/", " "),
    ("#", " "),
    ("→", " "),
    ("←", " "),
];

/// Written expressions expanded to their spoken form
const SPOKEN_EXPANSIONS: &[(&str, &str)] = &[
    ("@", " at "),
    ("e.g.,", "for example, "),
    ("i.e.,", "that is, "),
];

/// Space-before-punctuation pairs collapsed after the replacements above
const PUNCTUATION_SPACING: &[(&str, &str)] = &[
    (" ,", ","),
    (" .", "."),
    (" !", "!"),
    (" ?", "?"),
    (" ;", ";"),
    (" :", ":"),
    (" '", "'"),
];

/// Clean a chunk of text and wrap it in the language tag the synthesis
/// collaborator expects.
///
/// Returns a hard error for an unsupported language code: that is a caller
/// contract violation, not a data-quality issue.
pub fn preprocess_for_synthesis(text: &str, language: &str) -> Result<String> {
    let language = language_utils::ensure_supported(language)?;

    let mut text = EMOJI.replace_all(text, "").into_owned();

    for (from, to) in REPLACEMENTS {
        text = text.replace(from, to);
    }

    text = DROPPED_SYMBOLS.replace_all(&text, "").into_owned();

    for (from, to) in SPOKEN_EXPANSIONS {
        text = text.replace(from, to);
    }

    for (from, to) in PUNCTUATION_SPACING {
        text = text.replace(from, to);
    }

    while text.contains("\"\"") {
        text = text.replace("\"\"", "\"");
    }
    while text.contains("''") {
        text = text.replace("''", "'");
    }

    let mut text = WHITESPACE.replace_all(&text, " ").trim().to_string();

    if !text.is_empty() && !FINAL_PUNCTUATION.is_match(&text) {
        text.push('.');
    }

    Ok(format!("<{language}>{text}</{language}>"))
}
