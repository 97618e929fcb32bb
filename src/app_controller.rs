use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::aligners::command::CommandAligner;
use crate::app_config::Config;
use crate::chunker::{SentenceSplitter, chunk_text_with};
use crate::file_utils::FileManager;
use crate::subtitle_format::SubtitleTrack;
use crate::text_prep;
use crate::timing::pipeline::{TimingPipeline, TimingRequest};

// @module: Application controller for narration captioning

/// Main application controller for chunking and caption timing
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.language.is_empty()
    }

    /// Split a script file into synthesis-ready chunks.
    ///
    /// The chunk budget comes from the configured override or the
    /// per-language default; extra abbreviations from the config extend
    /// the sentence-split exception list.
    pub fn run_chunk(
        &self,
        input_file: &Path,
        max_len_override: Option<usize>,
        preprocess: bool,
    ) -> Result<Vec<String>> {
        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let text = FileManager::read_to_string(input_file)?;

        let max_len = match max_len_override {
            Some(max_len) => max_len,
            None => self.config.effective_max_chunk_len()?,
        };

        let splitter =
            SentenceSplitter::with_extra_abbreviations(&self.config.chunking.extra_abbreviations);
        let mut chunks = chunk_text_with(&text, max_len, &splitter);

        if preprocess {
            chunks = chunks
                .iter()
                .map(|chunk| text_prep::preprocess_for_synthesis(chunk, &self.config.language))
                .collect::<Result<Vec<String>>>()?;
        }

        info!(
            "Split {:?} into {} chunks (max {} chars, language {})",
            input_file.file_name().unwrap_or_default(),
            chunks.len(),
            max_len,
            self.config.language
        );

        Ok(chunks)
    }

    /// Generate an SRT caption file for a narration audio file.
    ///
    /// Reads the caption lines, probes the audio duration when not given,
    /// runs the tiered timing pipeline against the configured aligner and
    /// writes the result next to the audio unless an explicit output path
    /// is provided. Returns the output path.
    pub async fn run_time(
        &self,
        audio_file: PathBuf,
        captions_file: PathBuf,
        duration_override: Option<f64>,
        output_path: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<PathBuf> {
        let start_time = std::time::Instant::now();

        if !audio_file.exists() {
            return Err(anyhow!("Audio file does not exist: {:?}", audio_file));
        }
        if !captions_file.exists() {
            return Err(anyhow!("Caption file does not exist: {:?}", captions_file));
        }

        let output_path =
            output_path.unwrap_or_else(|| FileManager::sibling_with_extension(&audio_file, "srt"));

        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, caption track already exists (use -f to force overwrite)");
            return Ok(output_path);
        }

        let audio_duration = match duration_override {
            Some(duration) if duration > 0.0 => duration,
            Some(duration) => {
                return Err(anyhow!("Audio duration must be positive, got {}", duration));
            }
            None => FileManager::probe_audio_duration(&audio_file)
                .await
                .context("Failed to determine audio duration")?,
        };

        let caption_text = FileManager::read_to_string(&captions_file)?;

        let aligner = CommandAligner::new(
            self.config.aligner.program.clone(),
            self.config.aligner.args.clone(),
            self.config.aligner.timeout_secs,
        );
        let pipeline = TimingPipeline::with_repair_mode(&aligner, self.config.timing.repair);

        // Progress bar for alignment tracking
        let progress_bar = ProgressBar::new(100);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result);

        let progress_clone = progress_bar.clone();
        let progress_callback = move |percent: u8, message: &str| {
            progress_clone.set_position(percent as u64);
            progress_clone.set_message(message.to_string());
        };

        let request = TimingRequest {
            audio_path: &audio_file,
            caption_text: &caption_text,
            language: &self.config.language,
            audio_duration,
        };

        info!(
            "Timing captions for {:?} ({:.2}s of audio)",
            audio_file.file_name().unwrap_or_default(),
            audio_duration
        );

        let records = pipeline.generate(&request, Some(&progress_callback)).await?;
        progress_bar.finish_and_clear();

        if records.is_empty() {
            warn!("Caption source has no lines; nothing to write");
            return Ok(output_path);
        }

        let track = SubtitleTrack::from_timing_records(&records);
        track
            .write_to_srt(&output_path)
            .with_context(|| format!("Failed to write caption track to {:?}", output_path))?;

        info!(
            "Wrote {} caption entries to {:?} in {:.1}s",
            track.entries.len(),
            output_path,
            start_time.elapsed().as_secs_f64()
        );

        Ok(output_path)
    }
}
