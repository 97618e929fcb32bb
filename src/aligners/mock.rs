/*!
 * Mock aligner implementations for testing.
 *
 * Behavior modes simulate the collaborator failure shapes the pipeline
 * must survive:
 * - `MockAligner::working(..)` - both operations succeed
 * - `MockAligner::fail_alignment(..)` - forced alignment fails, free
 *   transcription succeeds (exercises the Tier 2 fallback)
 * - `MockAligner::failing()` - every operation fails (exercises Tier 3)
 * - `MockAligner::empty()` - succeeds but returns no word spans
 */

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Aligner;
use crate::errors::AlignerError;
use crate::timing::WordSpan;

/// Behavior mode for the mock aligner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Both align and transcribe succeed with the configured words
    Working,

    /// Align fails, transcribe succeeds with the configured words
    FailAlignment,

    /// Every operation fails
    Failing,

    /// Operations succeed but produce no word spans
    Empty,
}

/// Mock aligner for testing pipeline fallback behavior
#[derive(Debug)]
pub struct MockAligner {
    /// Behavior mode
    behavior: MockBehavior,

    /// Word spans returned by succeeding operations
    words: Vec<WordSpan>,

    /// Number of align calls observed
    align_calls: AtomicUsize,

    /// Number of transcribe calls observed
    transcribe_calls: AtomicUsize,
}

impl MockAligner {
    /// Create a mock with an explicit behavior and word fixture
    pub fn new(behavior: MockBehavior, words: Vec<WordSpan>) -> Self {
        MockAligner {
            behavior,
            words,
            align_calls: AtomicUsize::new(0),
            transcribe_calls: AtomicUsize::new(0),
        }
    }

    /// Mock whose operations all succeed
    pub fn working(words: Vec<WordSpan>) -> Self {
        Self::new(MockBehavior::Working, words)
    }

    /// Mock whose forced alignment fails but transcription works
    pub fn fail_alignment(words: Vec<WordSpan>) -> Self {
        Self::new(MockBehavior::FailAlignment, words)
    }

    /// Mock whose operations all fail
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing, Vec::new())
    }

    /// Mock whose operations succeed with zero word spans
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty, Vec::new())
    }

    /// Number of align calls made against this mock
    pub fn align_call_count(&self) -> usize {
        self.align_calls.load(Ordering::SeqCst)
    }

    /// Number of transcribe calls made against this mock
    pub fn transcribe_call_count(&self) -> usize {
        self.transcribe_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Aligner for MockAligner {
    async fn align(
        &self,
        _audio_path: &Path,
        _transcript: &str,
        _language: &str,
    ) -> Result<Vec<WordSpan>, AlignerError> {
        self.align_calls.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.words.clone()),
            MockBehavior::FailAlignment | MockBehavior::Failing => Err(
                AlignerError::AlignmentFailed("mock forced alignment failure".to_string()),
            ),
            MockBehavior::Empty => Ok(Vec::new()),
        }
    }

    async fn transcribe(
        &self,
        _audio_path: &Path,
        _language: &str,
    ) -> Result<Vec<WordSpan>, AlignerError> {
        self.transcribe_calls.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working | MockBehavior::FailAlignment => Ok(self.words.clone()),
            MockBehavior::Failing => Err(AlignerError::TranscriptionFailed(
                "mock transcription failure".to_string(),
            )),
            MockBehavior::Empty => Ok(Vec::new()),
        }
    }
}
