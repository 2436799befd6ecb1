//! Error types for the export crate.

use thiserror::Error;

use crate::format::ExportFormat;

/// Errors that can occur while building or delivering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The delivery mechanism cannot take this artifact.
    ///
    /// The selected data is untouched; only delivery failed. An export never
    /// falls back to a different format.
    #[error("{format} export unavailable: {reason}")]
    ExportUnavailable {
        format: ExportFormat,
        reason: String,
    },

    /// Two columns would share a header, which a JSON object cannot hold.
    #[error("duplicate export column '{name}'")]
    DuplicateColumn { name: String },

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Builds an [`ExportError::ExportUnavailable`].
    pub fn unavailable(format: ExportFormat, reason: impl Into<String>) -> Self {
        ExportError::ExportUnavailable {
            format,
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`ExportError::ExportUnavailable`].
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ExportError::ExportUnavailable { .. })
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
