//! Identity-keyed record pools.

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use crate::error::MockError;

/// An insertion-ordered store of records keyed by identity.
///
/// Records can be added once and never removed. Insertion order is kept so
/// random picks from a seeded mocker are reproducible.
#[derive(Debug)]
pub struct Pool<T> {
    kind: &'static str,
    records: IndexMap<String, T>,
}

impl<T: Clone> Pool<T> {
    /// Create an empty pool. `kind` names the records in errors and logs.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            records: IndexMap::new(),
        }
    }

    /// Name of the records held in this pool.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Get the record for `id`.
    pub fn load(&self, id: &str) -> Result<T, MockError> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| MockError::NotFound {
                kind: self.kind,
                id: id.to_string(),
            })
    }

    /// Get the record for `id`, if any.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.get(id)
    }

    /// Store a record under a new identity.
    ///
    /// Fails without touching the pool if `id` is already taken.
    pub fn insert(&mut self, id: impl Into<String>, record: T) -> Result<(), MockError> {
        match self.records.entry(id.into()) {
            Entry::Occupied(entry) => Err(MockError::AlreadyExists {
                kind: self.kind,
                id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!("{} pool: registered {}", self.kind, entry.key());
                entry.insert(record);
                Ok(())
            }
        }
    }

    /// Check if an identity is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Record at a position in insertion order.
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.records.get_index(index).map(|(_, record)| record)
    }

    /// Registered identities, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(|id| id.as_str())
    }

    /// Registered records, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
