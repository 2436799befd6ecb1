//! # Ledgerly - List Screen Query Engine
//!
//! Ledgerly turns a full collection of business records into what a list
//! screen shows: the current page of a searched, filtered and sorted table,
//! plus on-demand CSV or JSON exports of the whole result set.
//!
//! The work is split across two crates, both re-exported here:
//!
//! - [`query`] (`ledgerly-query`): records, dot-paths, search, filters,
//!   sorting, pagination and the [`QuerySpec`] pipeline
//! - [`export`] (`ledgerly-export`): export artifacts and delivery sinks
//!
//! This crate adds the glue every list screen shares:
//!
//! - [`CollectionSource`]: the collaborator that fetches a collection
//! - [`ListScreen`]: one entity kind's snapshot, queries and exports
//! - [`ListDefaults`]: page size, page window, export format and search
//!   fields, loaded from YAML or JSON
//! - [`LatestResult`]: last-write-wins slot for results of overlapping
//!   evaluations
//!
//! ## Quick Start
//!
//! ```rust
//! use ledgerly::{ExportFormat, InMemorySource, ListScreen, MemorySink, QuerySpec};
//! use serde_json::json;
//!
//! let source = InMemorySource::new().with_json("orders", json!([
//!     {"id": "o-1", "status": "paid", "total": 120.0, "createdAt": "2024-01-03"},
//!     {"id": "o-2", "status": "pending", "total": 80.0},
//!     {"id": "o-3", "status": "paid", "total": 45.5, "createdAt": "2024-01-20"},
//! ]));
//!
//! let mut screen = ListScreen::new(source, "orders", "user-42");
//! screen.refresh().unwrap();
//!
//! let spec = QuerySpec::new().equals("status", "paid").sort_desc("total");
//! let page = screen.query(&spec).unwrap();
//! assert_eq!(page.total_items, 2);
//!
//! let mut downloads = MemorySink::new();
//! let artifact = screen
//!     .export_to(&spec, &["id", "total"], Some(ExportFormat::Csv), &mut downloads)
//!     .unwrap();
//! assert_eq!(artifact.filename, "orders.csv");
//! assert_eq!(artifact.body, "\"id\",\"total\"\n\"o-1\",\"120\"\n\"o-3\",\"45.5\"");
//! ```
//!
//! ## Results Are Values
//!
//! [`ListScreen::query`] returns a [`PageResult`] and keeps nothing about
//! it. A caller that runs overlapping evaluations keeps the newest with a
//! [`LatestResult`]:
//!
//! ```rust
//! use ledgerly::LatestResult;
//!
//! let mut slot = LatestResult::new();
//! let slow = slot.begin();
//! let fast = slot.begin();
//! assert!(slot.publish(fast, "page for 'lam'"));
//! assert!(!slot.publish(slow, "page for 'la'"));
//! assert_eq!(slot.get(), Some(&"page for 'lam'"));
//! ```

pub mod config;
mod error;
mod screen;
mod slot;
mod source;

pub use ledgerly_export as export;
pub use ledgerly_query as query;

pub use config::{ListDefaults, DEFAULT_WINDOW_SIZE};
pub use error::{ConfigError, ScreenError, SourceError};
pub use screen::ListScreen;
pub use slot::{LatestResult, Ticket};
pub use source::{CallerIdentity, CollectionSource, EntityKind, InMemorySource};

// Re-export the types most screens touch
pub use ledgerly_export::{
    export_flat, DirectorySink, ExportArtifact, ExportError, ExportFormat, ExportSink, Exporter,
    MemorySink, UnavailableSink,
};
pub use ledgerly_query::{
    page_window, paginate, DateRange, Dir, FilterSpec, NumericRange, PageResult, Predicate,
    QueryError, QuerySpec, Record, SortKey, Timestamp, Value,
};
