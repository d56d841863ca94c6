use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Longest time a caption may stay on screen, in seconds
    #[serde(default = "default_max_seconds_onscreen")]
    pub max_seconds_onscreen: f64,

    /// Width of the timestamp smoothing windows, in seconds
    #[serde(default = "default_smoothing_interval_seconds")]
    pub smoothing_interval_seconds: f64,

    /// Width of the density grouping windows for the styled format, in seconds
    #[serde(default = "default_grouping_interval_seconds")]
    pub grouping_interval_seconds: f64,

    /// Most captions the styled format may keep on screen at once
    #[serde(default = "default_max_subtitles_onscreen")]
    pub max_subtitles_onscreen: u32,

    /// Output file stem
    #[serde(default = "default_title")]
    pub title: String,

    /// Output subtitle format
    #[serde(default)]
    pub format: OutputFormat,

    /// Plain caption styling
    #[serde(default)]
    pub srt_style: SrtStyle,

    /// Styled caption appearance
    #[serde(default)]
    pub ass_style: AssStyle,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Output subtitle format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    // @format: Plain timed captions, one visible at a time
    #[default]
    Srt,
    // @format: Styled captions with motion and fade, stacked by density
    Ass,
}

impl OutputFormat {
    // @returns: Capitalized format name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Srt => "SRT",
            Self::Ass => "ASS",
        }
    }

    // @returns: Output file extension
    pub fn extension(&self) -> &str {
        match self {
            Self::Srt => "srt",
            Self::Ass => "ass",
        }
    }
}

// Implement Display trait for OutputFormat
impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

// Implement FromStr trait for OutputFormat
impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "srt" => Ok(Self::Srt),
            "ass" => Ok(Self::Ass),
            _ => Err(anyhow!("Invalid output format: {}", s)),
        }
    }
}

/// Styling for the plain caption format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SrtStyle {
    /// Author name tint as an HTML hex colour
    #[serde(default = "default_srt_author_colour")]
    pub author_colour: String,
}

impl Default for SrtStyle {
    fn default() -> Self {
        Self {
            author_colour: default_srt_author_colour(),
        }
    }
}

/// Appearance of the styled caption format.
///
/// The motion effect is derived from the playback resolution: captions rise
/// from the bottom edge to three quarters of the frame height, centered
/// horizontally.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AssStyle {
    /// Script playback width
    #[serde(default = "default_play_res_x")]
    pub play_res_x: u32,

    /// Script playback height
    #[serde(default = "default_play_res_y")]
    pub play_res_y: u32,

    /// Font name for the default style
    #[serde(default = "default_font_name")]
    pub font_name: String,

    /// Font size for the default style
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Author name colour as an ASS colour override
    #[serde(default = "default_ass_author_colour")]
    pub author_colour: String,

    /// Message text colour as an ASS colour override
    #[serde(default = "default_ass_text_colour")]
    pub text_colour: String,
}

impl Default for AssStyle {
    fn default() -> Self {
        Self {
            play_res_x: default_play_res_x(),
            play_res_y: default_play_res_y(),
            font_name: default_font_name(),
            font_size: default_font_size(),
            author_colour: default_ass_author_colour(),
            text_colour: default_ass_text_colour(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_max_seconds_onscreen() -> f64 {
    5.0
}

fn default_smoothing_interval_seconds() -> f64 {
    5.0
}

fn default_grouping_interval_seconds() -> f64 {
    5.0
}

fn default_max_subtitles_onscreen() -> u32 {
    5
}

fn default_title() -> String {
    "subtitles".to_string()
}

fn default_srt_author_colour() -> String {
    "#00FF00".to_string()
}

fn default_play_res_x() -> u32 {
    640
}

fn default_play_res_y() -> u32 {
    480
}

fn default_font_name() -> String {
    "Myriad Web Pro Condensed".to_string()
}

fn default_font_size() -> u32 {
    26
}

fn default_ass_author_colour() -> String {
    "&H00FF00&".to_string()
}

fn default_ass_text_colour() -> String {
    "&HFFFFFF&".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.max_seconds_onscreen <= 0.0 {
            return Err(anyhow!(
                "max_seconds_onscreen must be positive, but was {}",
                self.max_seconds_onscreen
            ));
        }
        if self.smoothing_interval_seconds <= 0.0 {
            return Err(anyhow!(
                "smoothing_interval_seconds must be positive, but was {}",
                self.smoothing_interval_seconds
            ));
        }
        if self.grouping_interval_seconds <= 0.0 {
            return Err(anyhow!(
                "grouping_interval_seconds must be positive, but was {}",
                self.grouping_interval_seconds
            ));
        }
        if self.max_subtitles_onscreen == 0 {
            return Err(anyhow!(
                "max_subtitles_onscreen must be positive, but was {}",
                self.max_subtitles_onscreen
            ));
        }
        if self.title.trim().is_empty() {
            return Err(anyhow!("title must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            max_seconds_onscreen: default_max_seconds_onscreen(),
            smoothing_interval_seconds: default_smoothing_interval_seconds(),
            grouping_interval_seconds: default_grouping_interval_seconds(),
            max_subtitles_onscreen: default_max_subtitles_onscreen(),
            title: default_title(),
            format: OutputFormat::default(),
            srt_style: SrtStyle::default(),
            ass_style: AssStyle::default(),
            log_level: LogLevel::default(),
        }
    }
}
