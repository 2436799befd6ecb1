//! Ledgerly Export - flat-file artifacts for query results.
//!
//! Turns a full (unpaginated) record sequence into a downloadable artifact
//! in one of two encodings:
//!
//! | Format | Layout |
//! |--------|--------|
//! | CSV | header row first, every value double-quoted, `""` for missing |
//! | JSON | pretty-printed array of flat objects, `""` for missing |
//!
//! Columns are dot-paths resolved the same way as in `ledgerly-query`, and
//! both formats flatten them identically (see [`cell_text`] and
//! [`cell_json`]).
//!
//! Artifacts are handed to an [`ExportSink`]. When the sink cannot take the
//! requested format the export fails with
//! [`ExportError::ExportUnavailable`]; it never switches formats.
//!
//! # Example
//!
//! ```rust
//! use ledgerly_export::{ExportFormat, Exporter, MemorySink};
//! use ledgerly_query::{QuerySpec, Record};
//!
//! let orders = vec![
//!     Record::new().with("id", "o-1").with("status", "paid"),
//!     Record::new().with("id", "o-2").with("status", "pending"),
//! ];
//! let rows = QuerySpec::new().equals("status", "paid").select(&orders);
//!
//! let mut sink = MemorySink::new();
//! let artifact = Exporter::new("orders")
//!     .fields(["id", "status"])
//!     .format(ExportFormat::Csv)
//!     .export_to(&rows, &mut sink)
//!     .unwrap();
//!
//! assert_eq!(artifact.filename, "orders.csv");
//! assert_eq!(artifact.body, "\"id\",\"status\"\n\"o-1\",\"paid\"");
//! ```

mod artifact;
mod cell;
mod error;
mod exporter;
mod format;
mod sink;

// Re-export public API
pub use artifact::ExportArtifact;
pub use cell::{cell_json, cell_text, row_text};
pub use error::{ExportError, Result};
pub use exporter::{export_flat, to_csv, to_json, Exporter};
pub use format::ExportFormat;
pub use sink::{DirectorySink, ExportSink, MemorySink, UnavailableSink};
