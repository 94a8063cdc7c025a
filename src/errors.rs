/*!
 * Error types for the subalign application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to the punctuation restoration service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when reading the service response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the service itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
}

/// Errors that can occur while reading subtitle input
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The requested input file does not exist
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The input contained no subtitle text at all
    #[error("No subtitle text found in: {}", .0.display())]
    EmptySubtitle(PathBuf),
}

/// Errors that can occur when loading an alignment record
#[derive(Error, Debug)]
pub enum RecordError {
    /// The record does not deserialize
    #[error("Malformed alignment record: {0}")]
    Malformed(String),

    /// A sentence declares a member count that disagrees with its cues
    #[error("Sentence {destination_index} declares {declared} cues but holds {actual}")]
    Inconsistent {
        /// 1-based sentence index
        destination_index: usize,
        /// Member count stored in the record
        declared: usize,
        /// Number of cues actually present
        actual: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the punctuation service
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle input handling
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the alignment record
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Whether this error means a requested input file was absent
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::Subtitle(SubtitleError::MissingInput(_)))
    }
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

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Record(RecordError::Malformed(error.to_string()))
    }
}
