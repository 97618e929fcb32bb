/*!
 * Error types for the narravox application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised by the external alignment/transcription collaborator.
///
/// These are recoverable at the pipeline level: a failed tier falls through
/// to the next one, so none of these reach the caller unless every tier is
/// exhausted.
#[derive(Error, Debug)]
pub enum AlignerError {
    /// Forced alignment of a known transcript failed
    #[error("forced alignment failed: {0}")]
    AlignmentFailed(String),

    /// Free transcription failed
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),

    /// The aligner produced output that could not be parsed
    #[error("failed to parse aligner output: {0}")]
    ParseError(String),

    /// The aligner process did not finish within the configured timeout
    #[error("aligner command timed out after {0} seconds")]
    Timeout(u64),

    /// The aligner program could not be started at all
    #[error("aligner is unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while producing a caption timeline
#[derive(Error, Debug)]
pub enum TimingError {
    /// Error from the alignment collaborator
    #[error("aligner error: {0}")]
    Aligner(#[from] AlignerError),

    /// The audio duration is not usable for timing
    #[error("invalid audio duration: {0} seconds")]
    InvalidDuration(f64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// A caller contract violation, e.g. an unsupported language code
    #[error("configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("file error: {0}")]
    File(String),

    /// Error from the alignment collaborator
    #[error("aligner error: {0}")]
    Aligner(#[from] AlignerError),

    /// Error from timing generation
    #[error("timing error: {0}")]
    Timing(#[from] TimingError),

    /// Any other error
    #[error("unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
