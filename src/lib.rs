/*!
 * # chatsub - Chat Transcript Subtitle Converter
 *
 * A Rust library for converting recorded chat transcripts into subtitle tracks.
 *
 * ## Features
 *
 * - Load chat downloader JSON exports into an ordered message sequence
 * - Resolve emote shortcuts to their UTF replacements
 * - Smooth bursty message timestamps into evenly-spaced windows
 * - Lay out captions with a fixed on-screen duration (SRT) or with
 *   density-adaptive durations and bounded stacking (ASS)
 * - Render and write both textual subtitle encodings
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `chat_source`: Transcript loading and message preparation
 * - `timing`: Fixed-width timeline windowing and timestamp smoothing
 * - `layout`: Fixed-duration and adaptive group caption layout engines
 * - `subtitle_renderer`: SRT and ASS document rendering
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
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
pub mod app_config;
pub mod app_controller;
pub mod chat_source;
pub mod errors;
pub mod file_utils;
pub mod layout;
pub mod subtitle_renderer;
pub mod timing;

// Re-export main types for easier usage
pub use app_config::{Config, OutputFormat};
pub use chat_source::{ChatMessage, ChatTranscript};
pub use layout::{CaptionLine, layout_adaptive_groups, layout_fixed_duration};
pub use subtitle_renderer::{AssRenderer, SrtRenderer};
pub use timing::{WindowBuckets, smooth_timestamps};
pub use errors::{AppError, ChatSourceError, LayoutError, RenderError};
