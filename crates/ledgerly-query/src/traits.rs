//! The [`Seekable`] trait lets every stage work on owned records or on
//! borrowed views of them.

use crate::path;
use crate::record::Record;
use crate::value::Value;

/// Anything that exposes a [`Record`] to the query stages.
///
/// Implemented for `Record` itself and for references to any `Seekable`,
/// so the stages accept `&[Record]` (cloning rows into the result) as well
/// as `&[&Record]` (copying only references). Wrapper types that carry a
/// record alongside other data can implement it too.
///
/// # Example
///
/// ```
/// use ledgerly_query::{search, Record, Seekable};
///
/// struct Row {
///     record: Record,
///     selected: bool,
/// }
///
/// impl Seekable for Row {
///     fn record(&self) -> &Record {
///         &self.record
///     }
/// }
///
/// let rows = vec![
///     Row { record: Record::new().with("name", "Ada"), selected: false },
///     Row { record: Record::new().with("name", "Grace"), selected: true },
/// ];
/// let refs: Vec<&Row> = rows.iter().collect();
/// let hits = search(&refs, "gra", &[] as &[&str]);
/// assert!(hits[0].selected);
/// ```
pub trait Seekable {
    /// Returns the record backing this item.
    fn record(&self) -> &Record;

    /// Resolves a dot-path against the backing record.
    fn lookup(&self, path: &str) -> Option<&Value> {
        path::resolve(self.record(), path)
    }
}

impl Seekable for Record {
    fn record(&self) -> &Record {
        self
    }
}

impl<T: Seekable + ?Sized> Seekable for &T {
    fn record(&self) -> &Record {
        (**self).record()
    }
}
