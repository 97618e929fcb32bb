// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod aligners;
mod app_config;
mod app_controller;
mod chunker;
mod errors;
mod file_utils;
mod language_utils;
mod subtitle_format;
mod text_prep;
mod timing;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a narration script into synthesis-ready chunks
    Chunk(ChunkArgs),

    /// Generate an SRT caption track for a narration audio file
    Time(TimeArgs),

    /// Generate shell completions for narravox
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ChunkArgs {
    /// Script text file to split
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Narration language code (e.g., 'en', 'ko', 'es')
    #[arg(short, long)]
    language: Option<String>,

    /// Override the per-language maximum chunk length
    #[arg(long)]
    max_len: Option<usize>,

    /// Preprocess chunks for the synthesis collaborator (text cleanup
    /// plus language tag wrapping)
    #[arg(short = 's', long)]
    synthesis: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "narravox.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TimeArgs {
    /// Narration audio file to time against
    #[arg(value_name = "AUDIO")]
    audio: PathBuf,

    /// Caption source text file, one display line per line
    #[arg(value_name = "CAPTIONS")]
    captions: PathBuf,

    /// Audio duration in seconds (probed with ffprobe when omitted)
    #[arg(short, long)]
    duration: Option<f64>,

    /// Output SRT path (defaults to the audio path with .srt extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Narration language code (e.g., 'en', 'ko', 'es')
    #[arg(short, long)]
    language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "narravox.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// narravox - narration chunking and caption timing
///
/// Splits scripts into synthesis-ready chunks and times author-provided
/// caption lines against narration audio, producing SRT caption tracks.
#[derive(Parser, Debug)]
#[command(name = "narravox")]
#[command(version = "0.1.0")]
#[command(about = "Narration chunking and caption timing tool")]
#[command(long_about = "narravox splits narration scripts into synthesis-ready chunks and aligns
author-provided caption lines against the narrated audio, writing standard
SRT caption tracks.

EXAMPLES:
    narravox chunk script.txt                      # Split using default config
    narravox chunk -l ko script.txt                # Korean chunk budget (120 chars)
    narravox time narration.wav captions.txt       # Write narration.srt
    narravox time -d 42.5 narration.wav captions.txt   # Skip the ffprobe duration probe
    narravox time -o out/captions.srt narration.wav captions.txt
    narravox completions bash > narravox.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in narravox.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

ALIGNMENT:
    The timing pipeline calls the external alignment tool configured under
    \"aligner\" (default: stable-ts-align). When forced alignment fails it
    falls back to free transcription, then to uniform division - a poor
    alignment never fails the run.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load or create the configuration, apply CLI overrides and set the
/// effective log level
fn load_config(
    config_path: &str,
    language: Option<&String>,
    log_level: Option<&CliLogLevel>,
) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(language) = language {
        config.language = language.clone();
    }
    if let Some(log_level) = log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "narravox", &mut std::io::stdout());
            Ok(())
        }
        Commands::Chunk(args) => run_chunk(args),
        Commands::Time(args) => run_time(args).await,
    }
}

fn run_chunk(args: ChunkArgs) -> Result<()> {
    let config = load_config(
        &args.config_path,
        args.language.as_ref(),
        args.log_level.as_ref(),
    )?;

    let controller = Controller::with_config(config)?;
    let chunks = controller.run_chunk(&args.script, args.max_len, args.synthesis)?;

    // Chunks go to stdout, blank-line separated, so a synthesis driver
    // can consume them the same way the chunker consumes paragraphs
    let mut stdout = std::io::stdout();
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }
        writeln!(stdout, "{}", chunk)?;
    }

    Ok(())
}

async fn run_time(args: TimeArgs) -> Result<()> {
    let config = load_config(
        &args.config_path,
        args.language.as_ref(),
        args.log_level.as_ref(),
    )?;

    let controller = Controller::with_config(config)?;
    controller
        .run_time(
            args.audio,
            args.captions,
            args.duration,
            args.output,
            args.force_overwrite,
        )
        .await?;

    Ok(())
}
