/*!
 * Caption timing engine.
 *
 * Maps recognized-word timestamps from the alignment collaborator onto
 * author-provided caption lines, producing a monotonic, non-overlapping
 * timeline that spans exactly the audio duration:
 * - `matcher`: character-count proportional word grouping
 * - `repair`: overlap resolution and final-end clamping
 * - `pipeline`: the three-tier fallback driver around an `Aligner`
 */

pub mod matcher;
pub mod pipeline;
pub mod repair;

/// One recognized word with its time bounds, as produced by the
/// alignment/transcription collaborator. Spans may be sparse or cover only
/// part of the audio.
#[derive(Debug, Clone, PartialEq)]
pub struct WordSpan {
    /// Recognized word text
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,
}

impl WordSpan {
    /// Create a new word span
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        WordSpan {
            text: text.into(),
            start,
            end,
        }
    }
}

/// One timed caption line, the output of the timing engine
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRecord {
    /// Caption line text, exactly as authored
    pub text: String,

    /// Display start in seconds
    pub start: f64,

    /// Display end in seconds
    pub end: f64,
}

impl TimingRecord {
    /// Create a new timing record
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        TimingRecord {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Extract the non-empty trimmed caption lines from caption source text.
/// Order is display order; lines are author-controlled and independent of
/// synthesis chunk boundaries.
pub fn caption_lines(caption_text: &str) -> Vec<String> {
    caption_text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}
