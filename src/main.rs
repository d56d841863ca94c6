// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use clap::{Args, Parser, CommandFactory, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, OutputFormat};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod chat_source;
mod errors;
mod file_utils;
mod layout;
mod subtitle_renderer;
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
    /// Convert a chat transcript into plain timed captions (SRT)
    Srt(ConvertArgs),

    /// Convert a chat transcript into styled, stacking captions (ASS)
    Ass(AssArgs),

    /// Generate shell completions for chatsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input transcript file (chat downloader JSON export) or directory
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output file stem
    #[arg(short, long)]
    title: Option<String>,

    /// Longest time a caption stays on screen, in seconds
    #[arg(short, long)]
    max_seconds_onscreen: Option<f64>,

    /// Width of the timestamp smoothing windows, in seconds
    #[arg(short, long)]
    smoothing_interval_seconds: Option<f64>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct AssArgs {
    #[command(flatten)]
    convert: ConvertArgs,

    /// Width of the density grouping windows, in seconds
    #[arg(short, long)]
    grouping_interval_seconds: Option<f64>,

    /// Most captions kept on screen at once
    #[arg(short = 'n', long)]
    max_subtitles_onscreen: Option<u32>,
}

/// chatsub - Chat Transcript Subtitle Converter
///
/// Converts a recorded chat transcript into a display-ready subtitle track,
/// smoothing bursty timestamps so captions stay readable.
#[derive(Parser, Debug)]
#[command(name = "chatsub")]
#[command(version = "1.0.0")]
#[command(about = "Convert chat transcripts into subtitle tracks")]
#[command(long_about = "chatsub converts a recorded chat transcript (a chat downloader JSON export)
into a subtitle track. Message timestamps are smoothed inside fixed windows so
bursts stay readable, then captions are laid out as plain one-at-a-time SRT
blocks or as styled ASS events that stack under a density bound.

EXAMPLES:
    chatsub srt chat.json                      # Plain captions next to the input
    chatsub srt -t stream_chat chat.json       # Choose the output file stem
    chatsub ass -n 8 chat.json                 # Styled captions, 8 on screen at most
    chatsub ass -m 4 -s 10 chat.json           # Shorter captions, wider smoothing
    chatsub srt /recordings/                   # Convert every transcript in a folder
    chatsub completions bash > chatsub.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. Command-line flags override the file.")]
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

    // @returns: ANSI colour and marker for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, marker) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                colour,
                now,
                marker,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
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
            generate(shell, &mut cmd, "chatsub", &mut std::io::stdout());
            Ok(())
        }
        Commands::Srt(args) => run_convert(args, OutputFormat::Srt, None, None).await,
        Commands::Ass(args) => {
            run_convert(
                args.convert,
                OutputFormat::Ass,
                args.grouping_interval_seconds,
                args.max_subtitles_onscreen,
            )
            .await
        }
    }
}

async fn run_convert(
    options: ConvertArgs,
    format: OutputFormat,
    grouping_interval_seconds: Option<f64>,
    max_subtitles_onscreen: Option<u32>,
) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    config.format = format;

    if let Some(max_seconds) = options.max_seconds_onscreen {
        config.max_seconds_onscreen = max_seconds;
    }
    if let Some(smoothing_interval) = options.smoothing_interval_seconds {
        config.smoothing_interval_seconds = smoothing_interval;
    }
    if let Some(grouping_interval) = grouping_interval_seconds {
        config.grouping_interval_seconds = grouping_interval;
    }
    if let Some(max_subtitles) = max_subtitles_onscreen {
        config.max_subtitles_onscreen = max_subtitles;
    }
    if let Some(title) = &options.title {
        config.title = title.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(level_filter_for(&config.log_level));
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    // Run the controller with the input file(s) and output directory
    if options.input_path.is_file() {
        // Process a single file
        controller
            .run(
                options.input_path.clone(),
                options
                    .output_dir
                    .unwrap_or_else(|| {
                        options
                            .input_path
                            .parent()
                            .unwrap_or(Path::new("."))
                            .to_path_buf()
                    }),
                options.force_overwrite,
            )
            .await
    } else if options.input_path.is_dir() {
        // Process a directory
        controller
            .run_folder(options.input_path.clone(), options.force_overwrite)
            .await
    } else {
        Err(anyhow::anyhow!(
            "Input path does not exist: {:?}",
            options.input_path
        ))
    }
}

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
