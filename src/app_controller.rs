use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::{Config, OutputFormat};
use crate::chat_source::ChatTranscript;
use crate::file_utils::FileManager;
use crate::layout::{CaptionLine, layout_adaptive_groups, layout_fixed_duration};
use crate::subtitle_renderer::{AssRenderer, SrtRenderer};
use crate::timing::smooth_timestamps;

// @module: Application controller for transcript conversion

/// Main application controller for converting chat transcripts into subtitles
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

    /// Run the conversion for a single transcript file.
    ///
    /// The output file name comes from the configured title and format; an
    /// existing output is left alone unless `force_overwrite` is set.
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        self.run_with_title(input_file, output_dir, &self.config.title, force_overwrite)
            .await
    }

    /// Run the conversion for every transcript file under a directory.
    ///
    /// Each output is named after its transcript's file stem so sibling
    /// transcripts never collide on the configured title. A failing file is
    /// logged and skipped; the rest of the folder still converts.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        info!("Converting transcripts in directory: {:?}", input_dir);

        let transcripts = FileManager::find_transcript_files(&input_dir)?;
        if transcripts.is_empty() {
            warn!("No transcript files found in directory: {:?}", input_dir);
            return Ok(());
        }

        let mut processed_count = 0;
        for transcript in transcripts {
            let output_dir = transcript
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf();
            let title = transcript
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_else(|| self.config.title.clone());

            info!("Processing transcript: {:?}", transcript);
            if let Err(e) = self
                .run_with_title(transcript, output_dir, &title, force_overwrite)
                .await
            {
                error!("Error processing file: {}", e);
            } else {
                processed_count += 1;
            }
        }

        info!("Finished processing {} transcript(s)", processed_count);
        Ok(())
    }

    async fn run_with_title(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        title: &str,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(&output_dir)?;

        let output_path =
            FileManager::generate_output_path(&output_dir, title, self.config.format.extension());
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, output already exists (use -f to force overwrite)");
            return Ok(());
        }

        // Read through tokio so a large export doesn't block the runtime,
        // then decode and lay out synchronously; the core is pure CPU work.
        let content = tokio::fs::read_to_string(&input_file)
            .await
            .with_context(|| format!("Failed to read transcript file: {:?}", input_file))?;
        let mut messages = ChatTranscript::parse_json_string(&content)?;
        if messages.is_empty() {
            warn!("Transcript contains no messages, writing an empty subtitle track");
        }

        smooth_timestamps(&mut messages, self.config.smoothing_interval_seconds)?;
        debug!(
            "Smoothed {} message timestamps over {}s windows",
            messages.len(),
            self.config.smoothing_interval_seconds
        );

        let lines = match self.config.format {
            OutputFormat::Srt => layout_fixed_duration(&messages, self.config.max_seconds_onscreen)?,
            OutputFormat::Ass => layout_adaptive_groups(
                &messages,
                self.config.max_seconds_onscreen,
                self.config.grouping_interval_seconds,
                self.config.max_subtitles_onscreen,
            )?,
        };

        let document = self.render_with_progress(&lines);
        if let Some(parent) = output_path.parent() {
            FileManager::ensure_dir(parent)?;
        }
        std::fs::write(&output_path, document)
            .with_context(|| format!("Failed to write subtitle file: {:?}", output_path))?;

        info!(
            "Wrote {} {} caption(s) to {:?} in {}",
            lines.len(),
            self.config.format.display_name(),
            output_path,
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Render all caption lines with a progress bar for large transcripts
    fn render_with_progress(&self, lines: &[CaptionLine]) -> String {
        let progress_bar = ProgressBar::new(lines.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} captions ({percent}%)")
            .or_else(|_| ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} ({percent}%)"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let mut document = String::new();
        match self.config.format {
            OutputFormat::Srt => {
                let renderer = SrtRenderer::new(self.config.srt_style.clone());
                for (position, line) in lines.iter().enumerate() {
                    document.push_str(&renderer.render_line(line, position));
                    progress_bar.inc(1);
                }
            }
            OutputFormat::Ass => {
                let renderer = AssRenderer::new(self.config.ass_style.clone());
                document.push_str(&renderer.header());
                for line in lines {
                    document.push_str(&renderer.render_line(line));
                    progress_bar.inc(1);
                }
            }
        }
        progress_bar.finish_and_clear();

        document
    }

    /// Format a duration for completion log lines
    fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{:.2}s", duration.as_secs_f64())
        }
    }
}
