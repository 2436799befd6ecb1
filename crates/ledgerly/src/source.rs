//! The collection-fetching collaborator.
//!
//! A [`CollectionSource`] returns the full, unfiltered collection for one
//! entity kind, already authorized for the caller. The engine performs no
//! access control of its own.

use std::collections::BTreeMap;
use std::fmt;

use ledgerly_query::Record;

use crate::error::SourceError;

/// Names a kind of business record, such as `"orders"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityKind(String);

impl EntityKind {
    /// Creates an entity kind.
    pub fn new(name: impl Into<String>) -> Self {
        EntityKind(name.into())
    }

    /// The kind name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityKind {
    fn from(name: &str) -> Self {
        EntityKind::new(name)
    }
}

impl From<String> for EntityKind {
    fn from(name: String) -> Self {
        EntityKind(name)
    }
}

/// Identifies who a collection is fetched for. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallerIdentity(String);

impl CallerIdentity {
    /// Creates a caller identity.
    pub fn new(id: impl Into<String>) -> Self {
        CallerIdentity(id.into())
    }

    /// The identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CallerIdentity {
    fn from(id: &str) -> Self {
        CallerIdentity::new(id)
    }
}

/// Abstraction over the remote persistence layer.
pub trait CollectionSource {
    /// Returns every record of `kind` visible to `caller`.
    fn fetch_collection(
        &self,
        kind: &EntityKind,
        caller: &CallerIdentity,
    ) -> Result<Vec<Record>, SourceError>;
}

impl<F> CollectionSource for F
where
    F: Fn(&EntityKind, &CallerIdentity) -> Result<Vec<Record>, SourceError>,
{
    fn fetch_collection(
        &self,
        kind: &EntityKind,
        caller: &CallerIdentity,
    ) -> Result<Vec<Record>, SourceError> {
        self(kind, caller)
    }
}

/// A source holding fixed collections in memory.
///
/// Returns the same snapshot to every caller.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    collections: BTreeMap<EntityKind, Vec<Record>>,
}

impl InMemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collection.
    pub fn with(mut self, kind: impl Into<EntityKind>, records: Vec<Record>) -> Self {
        self.insert(kind, records);
        self
    }

    /// Adds or replaces a collection.
    pub fn insert(&mut self, kind: impl Into<EntityKind>, records: Vec<Record>) {
        self.collections.insert(kind.into(), records);
    }

    /// Adds a collection from a JSON array of objects. Non-object elements
    /// are skipped.
    pub fn with_json(self, kind: impl Into<EntityKind>, documents: serde_json::Value) -> Self {
        let records = match documents {
            serde_json::Value::Array(items) => {
                items.into_iter().filter_map(Record::from_json).collect()
            }
            other => Record::from_json(other).into_iter().collect(),
        };
        self.with(kind, records)
    }

    /// Mutable access to a stored collection, for simulating remote edits.
    pub fn collection_mut(&mut self, kind: &EntityKind) -> Option<&mut Vec<Record>> {
        self.collections.get_mut(kind)
    }
}

impl CollectionSource for InMemorySource {
    fn fetch_collection(
        &self,
        kind: &EntityKind,
        _caller: &CallerIdentity,
    ) -> Result<Vec<Record>, SourceError> {
        self.collections
            .get(kind)
            .cloned()
            .ok_or_else(|| SourceError::UnknownKind {
                kind: kind.to_string(),
            })
    }
}
