//! Delivery targets for export artifacts.
//!
//! This module provides the [`ExportSink`] trait, which abstracts over the
//! write or download mechanism an artifact is handed to, so callers can
//! swap the real target for an in-memory one in tests or report an
//! unavailable one explicitly.

use std::path::{Path, PathBuf};

use crate::artifact::ExportArtifact;
use crate::error::{ExportError, Result};
use crate::format::ExportFormat;

/// Abstraction over an artifact delivery mechanism.
pub trait ExportSink {
    /// Whether this sink can take artifacts in `format`.
    fn supports(&self, format: ExportFormat) -> bool;

    /// Hands one artifact over.
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()>;

    /// Fails with [`ExportError::ExportUnavailable`] unless `format` is
    /// supported.
    fn check(&self, format: ExportFormat) -> Result<()> {
        if self.supports(format) {
            Ok(())
        } else {
            Err(ExportError::unavailable(
                format,
                "sink does not accept this format",
            ))
        }
    }
}

// === File system ===

/// Writes each artifact to `<dir>/<filename>`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    formats: Vec<ExportFormat>,
}

impl DirectorySink {
    /// Creates a sink writing into `dir`, accepting every format.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            formats: ExportFormat::ALL.to_vec(),
        }
    }

    /// Restricts the accepted formats.
    pub fn accepting(mut self, formats: impl IntoIterator<Item = ExportFormat>) -> Self {
        self.formats = formats.into_iter().collect();
        self
    }

    /// The target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `artifact` is (or would be) written.
    pub fn path_for(&self, artifact: &ExportArtifact) -> PathBuf {
        self.dir.join(&artifact.filename)
    }
}

impl ExportSink for DirectorySink {
    fn supports(&self, format: ExportFormat) -> bool {
        self.formats.contains(&format)
    }

    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
        self.check(artifact.format)?;
        if !self.dir.is_dir() {
            return Err(ExportError::unavailable(
                artifact.format,
                format!("{} is not a directory", self.dir.display()),
            ));
        }
        std::fs::write(self.path_for(artifact), artifact.as_bytes())?;
        Ok(())
    }
}

// === In memory ===

/// Collects delivered artifacts in memory.
#[derive(Debug, Clone)]
pub struct MemorySink {
    artifacts: Vec<ExportArtifact>,
    formats: Vec<ExportFormat>,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink {
    /// Creates an empty sink accepting every format.
    pub fn new() -> Self {
        Self::accepting(ExportFormat::ALL)
    }

    /// Creates an empty sink accepting only `formats`.
    pub fn accepting(formats: impl IntoIterator<Item = ExportFormat>) -> Self {
        Self {
            artifacts: Vec::new(),
            formats: formats.into_iter().collect(),
        }
    }

    /// Artifacts delivered so far, oldest first.
    pub fn artifacts(&self) -> &[ExportArtifact] {
        &self.artifacts
    }

    /// The most recent artifact.
    pub fn last(&self) -> Option<&ExportArtifact> {
        self.artifacts.last()
    }

    /// Removes and returns every delivered artifact.
    pub fn take(&mut self) -> Vec<ExportArtifact> {
        std::mem::take(&mut self.artifacts)
    }
}

impl ExportSink for MemorySink {
    fn supports(&self, format: ExportFormat) -> bool {
        self.formats.contains(&format)
    }

    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
        self.check(artifact.format)?;
        self.artifacts.push(artifact.clone());
        Ok(())
    }
}

// === Unavailable ===

/// A sink for environments without any write or download mechanism.
///
/// Every delivery fails with [`ExportError::ExportUnavailable`] carrying the
/// configured reason.
#[derive(Debug, Clone)]
pub struct UnavailableSink {
    reason: String,
}

impl UnavailableSink {
    /// Creates a sink that refuses everything with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ExportSink for UnavailableSink {
    fn supports(&self, _format: ExportFormat) -> bool {
        false
    }

    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
        self.check(artifact.format)
    }

    fn check(&self, format: ExportFormat) -> Result<()> {
        Err(ExportError::unavailable(format, self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(format: ExportFormat) -> ExportArtifact {
        ExportArtifact {
            filename: format!("orders.{}", format.extension()),
            format,
            body: "\"id\"\n\"o-1\"".to_string(),
        }
    }

    #[test]
    fn directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let csv = artifact(ExportFormat::Csv);

        sink.deliver(&csv).unwrap();

        let written = std::fs::read_to_string(dir.path().join("orders.csv")).unwrap();
        assert_eq!(written, csv.body);
        assert_eq!(sink.path_for(&csv), dir.path().join("orders.csv"));
    }

    #[test]
    fn directory_sink_missing_dir_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path().join("nope"));
        let err = sink.deliver(&artifact(ExportFormat::Csv)).unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn directory_sink_format_restriction() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path()).accepting([ExportFormat::Csv]);
        assert!(sink.supports(ExportFormat::Csv));
        assert!(!sink.supports(ExportFormat::Json));

        let err = sink.deliver(&artifact(ExportFormat::Json)).unwrap_err();
        assert!(err.is_unavailable());
        assert!(!dir.path().join("orders.json").exists());
    }

    #[test]
    fn memory_sink_collects() {
        let mut sink = MemorySink::new();
        sink.deliver(&artifact(ExportFormat::Csv)).unwrap();
        sink.deliver(&artifact(ExportFormat::Json)).unwrap();
        assert_eq!(sink.artifacts().len(), 2);
        assert_eq!(sink.last().map(|a| a.format), Some(ExportFormat::Json));
        assert_eq!(sink.take().len(), 2);
        assert!(sink.artifacts().is_empty());
    }

    #[test]
    fn unavailable_sink_refuses_with_reason() {
        let mut sink = UnavailableSink::new("no download mechanism");
        assert!(!sink.supports(ExportFormat::Csv));
        let err = sink.deliver(&artifact(ExportFormat::Csv)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "CSV export unavailable: no download mechanism"
        );
    }
}
