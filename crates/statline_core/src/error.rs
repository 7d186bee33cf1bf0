//! Error types for statline conversion.

use thiserror::Error;

use crate::ability::CatalogError;

/// Result type alias using [`ConversionError`].
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Top-level error type for all conversion failures.
///
/// Every variant is a local, synchronous failure. Nothing is retried and
/// nothing is downgraded to a default; a failed conversion yields no element.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The source record belongs to a kind with no statline equivalent.
    #[error("Unit '{unit}' cannot be converted: {kind} has no statline equivalent")]
    UnconvertibleCategory {
        /// Display name of the unit.
        unit: String,
        /// Source kind that has no category.
        kind: String,
    },

    /// The undamaged reference copy of the unit could not be obtained.
    #[error("No undamaged snapshot available for '{unit}': {reason}")]
    SnapshotUnavailable {
        /// Display name of the unit.
        unit: String,
        /// Why the snapshot could not be produced.
        reason: String,
    },

    /// Export text did not match any known ability or damage grammar.
    #[error("Malformed export text at '{token}': {reason}")]
    MalformedExportText {
        /// The offending token.
        token: String,
        /// What was expected.
        reason: String,
    },

    /// An ability payload did not match the shape its tag declares.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Record text could not be deserialized.
    #[error("Failed to parse record '{path}': {message}")]
    DataParse {
        /// Path or label of the record source.
        path: String,
        /// Error message.
        message: String,
    },
}

impl ConversionError {
    /// Build a [`ConversionError::MalformedExportText`] error.
    pub(crate) fn malformed(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedExportText {
            token: token.into(),
            reason: reason.into(),
        }
    }
}
