//! Tool error types.

use std::io;
use std::path::Path;

use statline_core::error::ConversionError;
use thiserror::Error;

/// Errors raised by the command-line tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Reading or listing a file failed.
    #[error("IO error at '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Conversion or record parsing failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// JSON output could not be produced.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A conversion options file did not parse.
    #[error("Invalid options file '{path}': {message}")]
    Options {
        /// Options file path.
        path: String,
        /// Parser message.
        message: String,
    },
}

impl ToolError {
    /// Wrap an IO error with the path it happened at.
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Result type for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;
