use once_cell::sync::Lazy;
use regex::Regex;

// @module: Paragraph- and sentence-aware text chunking for synthesis

// @const: Blank-line paragraph boundary
static PARAGRAPH_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n+").unwrap()
});

// @const: Candidate sentence boundary - a terminator followed by whitespace
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]\s+").unwrap()
});

/// Abbreviations that end with a period but never end a sentence.
///
/// Checked case-sensitively as suffixes of the text leading up to a
/// candidate boundary. Extend per deployment via
/// `SentenceSplitter::with_extra_abbreviations`.
pub const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "Sr.", "Jr.", "Ph.D.",
    "etc.", "e.g.", "i.e.", "vs.",
    "Inc.", "Ltd.", "Co.", "Corp.",
    "St.", "Ave.", "Blvd.",
];

/// Rule-based sentence boundary detector.
///
/// The regex crate has no lookbehind, so candidate boundaries (a `.`, `!`
/// or `?` followed by whitespace) are found first and then vetoed when the
/// text before the boundary ends in a known abbreviation or a
/// single-capital-letter initial ("J. K. Rowling").
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    abbreviations: Vec<String>,
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSplitter {
    /// Create a splitter with the default abbreviation list
    pub fn new() -> Self {
        SentenceSplitter {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create a splitter with extra abbreviations on top of the defaults
    pub fn with_extra_abbreviations(extra: &[String]) -> Self {
        let mut splitter = Self::new();
        splitter.abbreviations.extend(extra.iter().cloned());
        splitter
    }

    /// Split a paragraph into sentences, keeping terminators attached
    pub fn split_sentences<'a>(&self, paragraph: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut last_split = 0;

        for m in SENTENCE_BOUNDARY.find_iter(paragraph) {
            // The match starts at the terminator (1 byte), so the head of
            // the text up to and including it is a valid slice boundary
            let head = &paragraph[..m.start() + 1];

            if head.ends_with('.') && self.ends_with_abbreviation(head) {
                continue;
            }

            let sentence = paragraph[last_split..m.start() + 1].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            last_split = m.end();
        }

        if last_split < paragraph.len() {
            let tail = paragraph[last_split..].trim();
            if !tail.is_empty() {
                sentences.push(tail);
            }
        }

        sentences
    }

    /// Check whether text ending in a period ends with an abbreviation or
    /// a single-capital initial
    fn ends_with_abbreviation(&self, head: &str) -> bool {
        if self.abbreviations.iter().any(|a| head.ends_with(a.as_str())) {
            return true;
        }

        // Single-capital initial: ".<ws or start>X." where X is uppercase
        let mut rev = head.chars().rev();
        rev.next(); // the period itself
        match rev.next() {
            Some(c) if c.is_ascii_uppercase() => {
                rev.next().is_none_or(|before| !before.is_alphanumeric())
            }
            _ => false,
        }
    }
}

/// Split free-form text into synthesis-ready chunks of at most `max_len`
/// characters, using the default abbreviation list.
///
/// Paragraph boundaries always force a chunk flush; sentences are packed
/// greedily inside a paragraph. A single sentence longer than `max_len`
/// becomes its own oversized chunk rather than being truncated.
pub fn chunk_text(text: &str, max_len: usize) -> Vec<String> {
    chunk_text_with(text, max_len, &SentenceSplitter::new())
}

/// Split free-form text into chunks using a caller-provided splitter
pub fn chunk_text_with(text: &str, max_len: usize, splitter: &SentenceSplitter) -> Vec<String> {
    let mut chunks = Vec::new();

    for paragraph in PARAGRAPH_BOUNDARY.split(text.trim()) {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        let mut current_chunk = String::new();

        for sentence in splitter.split_sentences(paragraph) {
            // Character count, not byte length - budgets are written for
            // wide scripts like Hangul too
            let current_len = current_chunk.chars().count();
            let sentence_len = sentence.chars().count();

            if current_len + sentence_len + 1 <= max_len {
                if !current_chunk.is_empty() {
                    current_chunk.push(' ');
                }
                current_chunk.push_str(sentence);
            } else {
                if !current_chunk.is_empty() {
                    chunks.push(current_chunk);
                }
                current_chunk = sentence.to_string();
            }
        }

        // Paragraph end always flushes - chunks never span paragraphs
        if !current_chunk.is_empty() {
            chunks.push(current_chunk);
        }
    }

    chunks
}
