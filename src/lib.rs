/*!
 * # narravox
 *
 * A Rust library for turning narration scripts into timed caption tracks.
 *
 * ## Features
 *
 * - Paragraph- and sentence-aware chunking of scripts for synthesis,
 *   with an abbreviation-safe sentence splitter and per-language budgets
 * - Caption timing from recognized-word timestamps via character-count
 *   proportional grouping, with overlap repair and audio-duration clamping
 * - Three-tier fallback: forced alignment, free transcription, uniform
 *   division - poor alignment quality degrades, it never fails the run
 * - Bit-exact SRT serialization
 * - Pluggable alignment collaborators (external command tools, mocks)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `chunker`: Sentence splitting and chunk packing
 * - `text_prep`: Text cleanup for the synthesis collaborator
 * - `timing`: The caption timing engine:
 *   - `timing::matcher`: Character-proportional word grouping
 *   - `timing::repair`: Overlap resolution and final-end clamping
 *   - `timing::pipeline`: The tiered fallback driver
 * - `aligners`: Alignment collaborator implementations
 * - `subtitle_format`: SRT serialization
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod aligners;
pub mod app_config;
pub mod app_controller;
pub mod chunker;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod subtitle_format;
pub mod text_prep;
pub mod timing;

// Re-export main types for easier usage
pub use aligners::Aligner;
pub use app_config::Config;
pub use chunker::{SentenceSplitter, chunk_text};
pub use errors::{AlignerError, AppError, TimingError};
pub use subtitle_format::{SubtitleEntry, SubtitleTrack};
pub use timing::pipeline::{TimingPipeline, TimingRequest};
pub use timing::{TimingRecord, WordSpan};
