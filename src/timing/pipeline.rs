use anyhow::Result;
use log::{debug, info, warn};
use std::fmt;
use std::path::Path;

use super::matcher;
use super::repair::RepairMode;
use super::{TimingRecord, caption_lines};
use crate::aligners::Aligner;
use crate::errors::{AlignerError, TimingError};
use crate::language_utils;

// @module: Three-tier fallback driver for caption timing

/// Coarse progress callback: percentage and human-readable message.
/// Purely for UI feedback; absence changes no behavior.
pub type ProgressFn<'a> = dyn Fn(u8, &str) + Send + Sync + 'a;

/// One ranked strategy in the fallback chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    /// Align the exact caption text against the audio (most accurate)
    ForcedAlignment,

    /// Unconstrained transcription, matched by character proportion
    Transcription,

    /// Equal-duration division with no alignment data at all
    UniformDivision,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::ForcedAlignment => write!(f, "forced alignment"),
            Tier::Transcription => write!(f, "transcription"),
            Tier::UniformDivision => write!(f, "uniform division"),
        }
    }
}

/// Strict attempt order; the driver stops at the first success
const TIER_ORDER: [Tier; 3] = [
    Tier::ForcedAlignment,
    Tier::Transcription,
    Tier::UniformDivision,
];

/// Inputs for one timing run
#[derive(Debug, Clone)]
pub struct TimingRequest<'a> {
    /// Concatenated narration audio to time against
    pub audio_path: &'a Path,

    /// Caption source text; one display line per non-empty line
    pub caption_text: &'a str,

    /// ISO 639-1 language code of the narration
    pub language: &'a str,

    /// Total audio duration in seconds
    pub audio_duration: f64,
}

/// Stateless driver for the tiered timing strategy.
///
/// Holds a caller-owned aligner by reference; no state is retained
/// between invocations and each call operates only on its own inputs.
#[derive(Debug)]
pub struct TimingPipeline<'a, A: Aligner + ?Sized> {
    /// The alignment collaborator
    aligner: &'a A,

    /// Overlap repair strategy applied after matching
    repair_mode: RepairMode,
}

impl<'a, A: Aligner + ?Sized> TimingPipeline<'a, A> {
    /// Create a pipeline with the default single-pass repair
    pub fn new(aligner: &'a A) -> Self {
        Self::with_repair_mode(aligner, RepairMode::default())
    }

    /// Create a pipeline with an explicit repair strategy
    pub fn with_repair_mode(aligner: &'a A, repair_mode: RepairMode) -> Self {
        TimingPipeline {
            aligner,
            repair_mode,
        }
    }

    /// Produce one timing record per non-empty caption line, covering
    /// `[0, audio_duration]` with no gaps or overlaps.
    ///
    /// Poor alignment quality never fails the call: each tier's failure is
    /// logged and the next tier attempted, down to uniform division. The
    /// two structural failures that do surface are an unsupported language
    /// code and a non-positive audio duration. Zero caption lines return
    /// an empty result, signaling the caller to skip captioning.
    pub async fn generate(
        &self,
        request: &TimingRequest<'_>,
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<Vec<TimingRecord>> {
        let language = language_utils::ensure_supported(request.language)?;

        if request.audio_duration <= 0.0 {
            return Err(TimingError::InvalidDuration(request.audio_duration).into());
        }

        let lines = caption_lines(request.caption_text);
        if lines.is_empty() {
            warn!("No caption lines, skipping caption timing");
            return Ok(Vec::new());
        }

        report(progress, 40, "Loading alignment model...");

        for tier in TIER_ORDER {
            match self
                .attempt(tier, request, &language, &lines, progress)
                .await
            {
                Ok(records) => {
                    info!(
                        "Caption timing complete via {}: {} records over {:.2}s",
                        tier,
                        records.len(),
                        request.audio_duration
                    );
                    return Ok(records);
                }
                Err(err) => {
                    warn!("{} tier failed, falling through: {}", tier, err);
                }
            }
        }

        // The uniform-division tier in TIER_ORDER cannot fail once lines
        // exist, so this is never reached; kept as a plain fallback rather
        // than a panic
        Ok(matcher::uniform_division(&lines, request.audio_duration))
    }

    /// Run a single tier; every tier shares this signature so the driver
    /// can walk them uniformly
    async fn attempt(
        &self,
        tier: Tier,
        request: &TimingRequest<'_>,
        language: &str,
        lines: &[String],
        progress: Option<&ProgressFn<'_>>,
    ) -> Result<Vec<TimingRecord>, AlignerError> {
        match tier {
            Tier::ForcedAlignment => {
                report(progress, 45, "Running forced alignment...");
                let transcript = lines.join("\n");
                let words = self
                    .aligner
                    .align(request.audio_path, &transcript, language)
                    .await?;

                report(progress, 55, "Matching caption lines...");
                Ok(matcher::match_lines(
                    &words,
                    lines,
                    request.audio_duration,
                    self.repair_mode,
                ))
            }
            Tier::Transcription => {
                report(progress, 48, "Transcribing audio...");
                let words = self
                    .aligner
                    .transcribe(request.audio_path, language)
                    .await?;

                report(progress, 55, "Matching caption lines...");
                Ok(matcher::match_lines(
                    &words,
                    lines,
                    request.audio_duration,
                    self.repair_mode,
                ))
            }
            Tier::UniformDivision => {
                debug!("Dividing {:.2}s evenly across {} lines", request.audio_duration, lines.len());
                Ok(matcher::uniform_division(lines, request.audio_duration))
            }
        }
    }
}

fn report(progress: Option<&ProgressFn<'_>>, percent: u8, message: &str) {
    if let Some(callback) = progress {
        callback(percent, message);
    }
}
