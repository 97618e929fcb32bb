use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for the synthesis and timing pipeline
///
/// This module validates ISO 639-1 language codes against the set of
/// languages the synthesis collaborator supports, and exposes the
/// per-language chunk budget used by the text chunker.
/// Languages the synthesis collaborator accepts
pub const SUPPORTED_LANGUAGES: [&str; 5] = ["en", "ko", "es", "pt", "fr"];

/// Maximum chunk length for languages whose script packs more syllables
/// per character (currently Korean)
const WIDE_CHAR_MAX_LEN: usize = 120;

/// Maximum chunk length for Latin-script languages
const NARROW_CHAR_MAX_LEN: usize = 300;

/// Validate that a code is a well-formed ISO 639-1 language code and
/// return it normalized to lowercase
pub fn validate_language_code(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    if normalized.len() == 2 && Language::from_639_1(&normalized).is_some() {
        return Ok(normalized);
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Check whether a language is supported by the synthesis collaborator
pub fn is_supported(code: &str) -> bool {
    let normalized = code.trim().to_lowercase();
    SUPPORTED_LANGUAGES.contains(&normalized.as_str())
}

/// Validate and normalize a language code, and require it to be one of the
/// supported synthesis languages.
///
/// Passing an unsupported code is a caller contract violation, so unlike
/// alignment-quality problems this surfaces as a hard error.
pub fn ensure_supported(code: &str) -> Result<String> {
    let normalized = validate_language_code(code)?;

    if !SUPPORTED_LANGUAGES.contains(&normalized.as_str()) {
        return Err(anyhow!(
            "Unsupported synthesis language: {} (supported: {})",
            code,
            SUPPORTED_LANGUAGES.join(", ")
        ));
    }

    Ok(normalized)
}

/// Maximum chunk length in characters for a supported language
pub fn max_chunk_len(code: &str) -> Result<usize> {
    let normalized = ensure_supported(code)?;

    if normalized == "ko" {
        Ok(WIDE_CHAR_MAX_LEN)
    } else {
        Ok(NARROW_CHAR_MAX_LEN)
    }
}

/// Get the English name of a language from its ISO code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    if normalized.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized) {
            return Ok(lang.to_name().to_string());
        }
    } else if normalized.len() == 3 {
        if let Some(lang) = Language::from_639_3(&normalized) {
            return Ok(lang.to_name().to_string());
        }
    }

    Err(anyhow!("Cannot get language name for invalid code: {}", code))
}

/// Check if two language codes refer to the same language, regardless of
/// whether they are 2-letter or 3-letter codes
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    let norm1 = code1.trim().to_lowercase();
    let norm2 = code2.trim().to_lowercase();

    if norm1 == norm2 {
        return true;
    }

    let lang1 = match norm1.len() {
        2 => Language::from_639_1(&norm1),
        3 => Language::from_639_3(&norm1),
        _ => None,
    };
    let lang2 = match norm2.len() {
        2 => Language::from_639_1(&norm2),
        3 => Language::from_639_3(&norm2),
        _ => None,
    };

    match (lang1, lang2) {
        (Some(l1), Some(l2)) => l1 == l2,
        _ => false,
    }
}
