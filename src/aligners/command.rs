use async_trait::async_trait;
use log::{debug, error};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::process::Command;

use super::{Aligner, AlignmentOutput, collect_word_spans};
use crate::errors::AlignerError;
use crate::timing::WordSpan;

/// Aligner backed by an external command-line tool (typically a
/// stable-ts/whisper wrapper).
///
/// The tool contract:
/// ```text
/// <program> [extra args] align --audio <wav> --transcript <txt> --language <code>
/// <program> [extra args] transcribe --audio <wav> --language <code>
/// ```
/// and it prints the `AlignmentOutput` JSON document on stdout. The
/// transcript is handed over through a temporary file so arbitrary caption
/// text never has to survive shell quoting.
#[derive(Debug, Clone)]
pub struct CommandAligner {
    /// Program name or path
    program: String,

    /// Arguments inserted before the subcommand (model selection etc.)
    extra_args: Vec<String>,

    /// Seconds to wait for the tool before giving up
    timeout_secs: u64,
}

impl CommandAligner {
    /// Create an aligner for the given program
    pub fn new(program: impl Into<String>, extra_args: Vec<String>, timeout_secs: u64) -> Self {
        CommandAligner {
            program: program.into(),
            extra_args,
            timeout_secs,
        }
    }

    /// Run the tool with the given subcommand arguments and parse its
    /// JSON output into word spans
    async fn run(&self, args: &[&str]) -> Result<Vec<WordSpan>, AlignerError> {
        debug!("Running aligner: {} {}", self.program, args.join(" "));

        let command_future = Command::new(&self.program)
            .args(&self.extra_args)
            .args(args)
            .output();

        let timeout = Duration::from_secs(self.timeout_secs);
        let output = tokio::select! {
            result = command_future => {
                result.map_err(|e| {
                    AlignerError::Unavailable(format!("failed to execute {}: {}", self.program, e))
                })?
            },
            _ = tokio::time::sleep(timeout) => {
                return Err(AlignerError::Timeout(self.timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Aligner command failed: {}", stderr.trim());
            return Err(AlignerError::AlignmentFailed(stderr.trim().to_string()));
        }

        let parsed: AlignmentOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| AlignerError::ParseError(e.to_string()))?;

        Ok(collect_word_spans(&parsed))
    }
}

#[async_trait]
impl Aligner for CommandAligner {
    async fn align(
        &self,
        audio_path: &Path,
        transcript: &str,
        language: &str,
    ) -> Result<Vec<WordSpan>, AlignerError> {
        let mut transcript_file = NamedTempFile::new().map_err(|e| {
            AlignerError::Unavailable(format!("failed to create transcript file: {e}"))
        })?;
        transcript_file.write_all(transcript.as_bytes()).map_err(|e| {
            AlignerError::Unavailable(format!("failed to write transcript file: {e}"))
        })?;
        transcript_file.flush().map_err(|e| {
            AlignerError::Unavailable(format!("failed to write transcript file: {e}"))
        })?;

        let audio = audio_path.to_string_lossy();
        let transcript_path = transcript_file.path().to_string_lossy().into_owned();

        // transcript_file must stay alive until the command has finished
        self.run(&[
            "align",
            "--audio",
            &audio,
            "--transcript",
            &transcript_path,
            "--language",
            language,
        ])
        .await
    }

    async fn transcribe(
        &self,
        audio_path: &Path,
        language: &str,
    ) -> Result<Vec<WordSpan>, AlignerError> {
        let audio = audio_path.to_string_lossy();

        self.run(&["transcribe", "--audio", &audio, "--language", language])
            .await
            .map_err(|e| match e {
                AlignerError::AlignmentFailed(msg) => AlignerError::TranscriptionFailed(msg),
                other => other,
            })
    }
}
