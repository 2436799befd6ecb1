//! Error types for list screens, collection sources and configuration.

use std::path::PathBuf;

use ledgerly_export::ExportError;
use ledgerly_query::QueryError;
use thiserror::Error;

/// Errors reported by a [`CollectionSource`](crate::CollectionSource).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source has no collection for this entity kind.
    #[error("unknown entity kind '{kind}'")]
    UnknownKind { kind: String },

    /// The backing store could not be reached or refused the request.
    #[error("failed to fetch '{kind}': {message}")]
    Fetch { kind: String, message: String },
}

/// Errors that can occur on a list screen.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors that can occur while loading list defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be parsed.
    #[error("failed to parse list defaults{}: {message}", path_suffix(.path))]
    Parse {
        /// Source file, when loaded from disk.
        path: Option<PathBuf>,
        /// Parser message.
        message: String,
    },

    /// A setting is out of range.
    #[error("invalid list defaults: {field} {message}")]
    Invalid {
        field: &'static str,
        message: &'static str,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" in {}", p.display()),
        None => String::new(),
    }
}
