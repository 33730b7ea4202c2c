//! Whole-collection record stores.
//!
//! A store owns the persistence of one kind of record (books or loans) and
//! deals only in whole collections: `load_all` reads everything,
//! `replace_all` atomically swaps in everything. There are no partial
//! updates and no transaction log; the engine's mutual exclusion makes the
//! load-mutate-replace cycle safe.

mod in_memory;
mod json;

pub use in_memory::InMemoryStore;
pub use json::JsonFileStore;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The underlying device failed.
    Io(String),
    /// Persisted bytes do not decode into the expected record shape.
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(message) => write!(f, "io failure: {}", message),
            StoreError::Corrupt(message) => write!(f, "corrupt store: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

/// Durable load/replace persistence for one collection of records.
pub trait RecordStore<R> {
    /// Read the whole collection. A store that has never been written is
    /// the empty collection, not an error. Decode failures surface as
    /// `StoreError::Corrupt`, never as an empty result.
    fn load_all(&self) -> Result<Vec<R>, StoreError>;

    /// Replace the whole collection. Atomic from the reader's perspective:
    /// a concurrent `load_all` observes either the old collection or the
    /// new one, never a partial write.
    fn replace_all(&self, records: &[R]) -> Result<(), StoreError>;
}
