//! JsonFileStore - one JSON file per collection.
//!
//! The replace cycle writes the whole collection to a sibling temp file and
//! renames it over the real one. Rename within a directory is atomic on
//! POSIX, so a reader never observes a half-written file.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{RecordStore, StoreError};

pub struct JsonFileStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R> JsonFileStore<R> {
    /// Create a store persisting to `path`. The file is created lazily on
    /// the first `replace_all`; until then the store reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl<R: Serialize + DeserializeOwned> RecordStore<R> for JsonFileStore<R> {
    fn load_all(&self) -> Result<Vec<R>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(err.to_string())),
        };
        serde_json::from_slice(&bytes).map_err(|err| StoreError::Corrupt(err.to_string()))
    }

    fn replace_all(&self, records: &[R]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|err| StoreError::Io(err.to_string()))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, bytes).map_err(|err| StoreError::Io(err.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|err| StoreError::Io(err.to_string()))?;
        Ok(())
    }
}
