/*!
 * Aligner implementations for recognized-word timestamp collaborators.
 *
 * An aligner is an opaque capability the timing pipeline consumes:
 * - forced alignment of a known transcript against audio
 * - free transcription with word-level timestamps
 *
 * The `CommandAligner` drives a user-configured external tool; the
 * `MockAligner` simulates collaborator behavior for tests.
 */

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::AlignerError;
use crate::timing::WordSpan;

/// Common trait for alignment/transcription collaborators
///
/// Implementations must be stateless between calls from the pipeline's
/// point of view: each invocation gets its own inputs and returns a fresh
/// result.
#[async_trait]
pub trait Aligner: Send + Sync + Debug {
    /// Forced alignment: recover per-word timestamps for a transcript
    /// the caller already knows
    ///
    /// # Arguments
    /// * `audio_path` - Path to the audio file to align against
    /// * `transcript` - The expected transcript text
    /// * `language` - ISO 639-1 language code
    async fn align(
        &self,
        audio_path: &Path,
        transcript: &str,
        language: &str,
    ) -> Result<Vec<WordSpan>, AlignerError>;

    /// Free transcription: infer both the words and their timestamps
    ///
    /// # Arguments
    /// * `audio_path` - Path to the audio file to transcribe
    /// * `language` - ISO 639-1 language code
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<Vec<WordSpan>, AlignerError>;
}

/// JSON document emitted by alignment tools: a list of segments, each
/// optionally carrying word-level detail
#[derive(Debug, Deserialize)]
pub struct AlignmentOutput {
    /// Recognized segments in audio order
    #[serde(default)]
    pub segments: Vec<AlignmentSegment>,
}

/// One recognized segment
#[derive(Debug, Deserialize)]
pub struct AlignmentSegment {
    /// Segment text, used as a single span when word detail is missing
    #[serde(default)]
    pub text: String,

    /// Segment start in seconds
    pub start: f64,

    /// Segment end in seconds
    pub end: f64,

    /// Word-level timestamps, when the tool provides them
    #[serde(default)]
    pub words: Vec<AlignmentWord>,
}

/// One recognized word inside a segment
#[derive(Debug, Deserialize)]
pub struct AlignmentWord {
    /// Word text (some tools call this field "word")
    #[serde(alias = "word")]
    pub text: String,

    /// Word start in seconds, falling back to the segment start when absent
    pub start: Option<f64>,

    /// Word end in seconds, falling back to the segment end when absent
    pub end: Option<f64>,
}

/// Flatten an alignment document into an ordered list of word spans.
///
/// Words with missing timestamps inherit their segment's bounds; a segment
/// without word detail contributes its whole text as one span; empty texts
/// are skipped.
pub fn collect_word_spans(output: &AlignmentOutput) -> Vec<WordSpan> {
    let mut spans = Vec::new();

    for segment in &output.segments {
        if segment.words.is_empty() {
            let text = segment.text.trim();
            if !text.is_empty() {
                spans.push(WordSpan::new(text, segment.start, segment.end));
            }
            continue;
        }

        for word in &segment.words {
            let text = word.text.trim();
            if text.is_empty() {
                continue;
            }
            spans.push(WordSpan::new(
                text,
                word.start.unwrap_or(segment.start),
                word.end.unwrap_or(segment.end),
            ));
        }
    }

    spans
}

pub mod command;
pub mod mock;
