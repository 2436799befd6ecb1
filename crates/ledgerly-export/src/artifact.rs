use serde::Serialize;

use crate::format::ExportFormat;

/// A generated flat-file payload for a full (unpaginated) result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    /// Suggested download name, such as `orders.csv`.
    pub filename: String,
    /// Encoding of `body`.
    pub format: ExportFormat,
    /// Encoded content.
    pub body: String,
}

impl ExportArtifact {
    /// Content as bytes, for writers and download handlers.
    pub fn as_bytes(&self) -> &[u8] {
        self.body.as_bytes()
    }

    /// Content as text.
    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Size of the body in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns `true` if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// MIME type of the body.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}
