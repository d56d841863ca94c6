use std::fs;
use std::path::Path;
use anyhow::{Result, Context};
use crate::app_config::{AssStyle, SrtStyle};
use crate::layout::CaptionLine;

// @module: Caption rendering into SRT and ASS documents

// @const: Fade-in/out time as a fraction of caption duration
const FADE_DURATION_DIVISOR: f64 = 20.0;

/// Format seconds as an SRT timestamp (HH:MM:SS,mmm).
///
/// Zero-padded, millisecond precision. A negative timestamp carries a single
/// sign prefix for the whole value; not expected in practice, but the format
/// stays well-defined if a caller feeds one in.
pub fn format_srt_timestamp(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total_millis = (seconds.abs() * 1000.0).round() as u64;

    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1_000;
    let millis = total_millis % 1_000;

    format!("{}{:02}:{:02}:{:02},{:03}", sign, hours, minutes, secs, millis)
}

/// Format seconds as an ASS timestamp (H:MM:SS.cc), centisecond precision
pub fn format_ass_timestamp(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total_centis = (seconds.abs() * 100.0).round() as u64;

    let hours = total_centis / 360_000;
    let minutes = (total_centis % 360_000) / 6_000;
    let secs = (total_centis % 6_000) / 100;
    let centis = total_centis % 100;

    format!("{}{}:{:02}:{:02}.{:02}", sign, hours, minutes, secs, centis)
}

/// Renders caption lines as a plain SRT document
#[derive(Debug, Clone, Default)]
pub struct SrtRenderer {
    style: SrtStyle,
}

impl SrtRenderer {
    pub fn new(style: SrtStyle) -> Self {
        SrtRenderer { style }
    }

    /// Render one caption as an SRT block.
    ///
    /// Blocks are 1-indexed; the caption's own sequence index wins when the
    /// layout engine assigned one, otherwise the position in the rendered
    /// document is used.
    pub fn render_line(&self, line: &CaptionLine, fallback_index: usize) -> String {
        let index = line.sequence_index.unwrap_or(fallback_index) + 1;
        format!(
            "{}\n{} --> {}\n<font color=\"{}\">{}</font>: {}\n\n",
            index,
            format_srt_timestamp(line.start_seconds),
            format_srt_timestamp(line.end_seconds),
            self.style.author_colour,
            line.author,
            line.text
        )
    }

    /// Render a whole caption sequence as one SRT document
    pub fn render_document(&self, lines: &[CaptionLine]) -> String {
        let mut document = String::new();
        for (position, line) in lines.iter().enumerate() {
            document.push_str(&self.render_line(line, position));
        }
        document
    }

    /// Write the rendered document to a file, creating parent directories
    pub fn write_to_file<P: AsRef<Path>>(&self, lines: &[CaptionLine], path: P) -> Result<()> {
        write_document(&self.render_document(lines), path.as_ref())
    }
}

/// Renders caption lines as a styled ASS document
#[derive(Debug, Clone, Default)]
pub struct AssRenderer {
    style: AssStyle,
}

impl AssRenderer {
    pub fn new(style: AssStyle) -> Self {
        AssRenderer { style }
    }

    /// Script preamble: script info, the one named style, and the event format
    pub fn header(&self) -> String {
        format!(
            "[Script Info]\n\
             ScriptType: v4.00+\n\
             Collisions: Normal\n\
             PlayResX: {}\n\
             PlayResY: {}\n\
             Timer: 100.0000\n\
             \n\
             [V4+ Styles]\n\
             Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n\
             Style: Default,{},{},&H00ffffff,&H0000ffff,&H0025253a,&H96000000,0,0,0,0,100,100,0,0.00,1,2,1,2,15,15,20,1\n\
             \n\
             [Events]\n\
             Format: Layer, Start, End, Style, Actor, MarginL, MarginR, MarginV, Effect, Text\n",
            self.style.play_res_x, self.style.play_res_y, self.style.font_name, self.style.font_size
        )
    }

    /// Render one caption as a Dialogue event.
    ///
    /// The motion tag floats the caption from the bottom edge up to three
    /// quarters of the frame height; the fade time scales with the caption's
    /// on-screen duration.
    pub fn render_line(&self, line: &CaptionLine) -> String {
        let fade_millis =
            (1000.0 * line.duration_seconds() / FADE_DURATION_DIVISOR).round() as i64;
        let center_x = self.style.play_res_x / 2;
        let rise_to_y = self.style.play_res_y * 3 / 4;

        format!(
            "Dialogue: 0,{},{},,,0000,0000,0000,,{{\\move({},{},{},{})}}{{\\fad({},{})}}{{\\1c{}}}{}: {{\\1c{}}}{}\n",
            format_ass_timestamp(line.start_seconds),
            format_ass_timestamp(line.end_seconds),
            center_x,
            self.style.play_res_y,
            center_x,
            rise_to_y,
            fade_millis,
            fade_millis,
            self.style.author_colour,
            line.author,
            self.style.text_colour,
            line.text
        )
    }

    /// Render a whole caption sequence as one ASS document, preamble included
    pub fn render_document(&self, lines: &[CaptionLine]) -> String {
        let mut document = self.header();
        for line in lines {
            document.push_str(&self.render_line(line));
        }
        document
    }

    /// Write the rendered document to a file, creating parent directories
    pub fn write_to_file<P: AsRef<Path>>(&self, lines: &[CaptionLine], path: P) -> Result<()> {
        write_document(&self.render_document(lines), path.as_ref())
    }
}

fn write_document(document: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    fs::write(path, document)
        .with_context(|| format!("Failed to create subtitle file: {}", path.display()))
}
