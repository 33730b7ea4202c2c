//! InMemoryStore - RwLock-backed record store for testing and development.

use std::sync::{Arc, RwLock};

use super::{RecordStore, StoreError};

/// In-memory record store backed by a `Vec`.
///
/// Clone-friendly via `Arc`: clones share the same storage, so an engine
/// and a test can watch the same collection.
#[derive(Clone)]
pub struct InMemoryStore<R> {
    records: Arc<RwLock<Vec<R>>>,
}

impl<R> InMemoryStore<R> {
    pub fn new() -> Self {
        InMemoryStore {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone> RecordStore<R> for InMemoryStore<R> {
    fn load_all(&self) -> Result<Vec<R>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Io("store lock poisoned during read".to_string()))?;
        Ok(records.clone())
    }

    fn replace_all(&self, records: &[R]) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StoreError::Io("store lock poisoned during write".to_string()))?;
        *guard = records.to_vec();
        Ok(())
    }
}
