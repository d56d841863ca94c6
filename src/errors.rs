/*!
 * Error types for the chatsub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when reading or decoding a chat transcript
#[derive(Error, Debug)]
pub enum ChatSourceError {
    /// Error when reading the transcript file fails
    #[error("Failed to read transcript: {0}")]
    ReadFailed(String),

    /// Error when the transcript content is not valid JSON
    #[error("Failed to parse transcript JSON: {0}")]
    ParseError(String),

    /// Error when a transcript decodes to zero usable messages
    #[error("No usable chat messages found in transcript")]
    NoMessages,
}

/// Errors that can occur during caption layout
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Error for a layout parameter outside its valid range
    #[error("{name} must be positive, but was {value}")]
    NonPositiveParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Value the caller supplied
        value: f64,
    },
}

/// Errors that can occur while rendering subtitle output
#[derive(Error, Debug)]
pub enum RenderError {
    /// Error when writing the rendered document fails
    #[error("Failed to write subtitle file: {0}")]
    WriteFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from transcript loading
    #[error("Chat source error: {0}")]
    ChatSource(#[from] ChatSourceError),

    /// Error from caption layout
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Error from subtitle rendering
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Any other error
    #[error("Unknown error: {0}")]
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
