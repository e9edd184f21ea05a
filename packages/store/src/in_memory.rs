//! In-memory snapshots for tests and ephemeral stores.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::snapshot::{PersistenceError, SnapshotReader, SnapshotWriter};

/// Holds the snapshot blob as an owned JSON value.
///
/// Useful in tests and wherever durability is not wanted; the blob dies
/// with the store.
pub struct InMemorySnapshotStore {
    blob: Option<JsonValue>,
}

impl InMemorySnapshotStore {
    /// Create an empty store: the first read reports no data.
    pub fn new() -> Self {
        InMemorySnapshotStore { blob: None }
    }

    /// Create a store pre-seeded with a blob.
    pub fn with_blob(blob: JsonValue) -> Self {
        InMemorySnapshotStore { blob: Some(blob) }
    }

    /// The currently held blob, if any.
    pub fn blob(&self) -> Option<&JsonValue> {
        self.blob.as_ref()
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotWriter for InMemorySnapshotStore {
    fn write<T: Serialize>(&mut self, data: &T) -> Result<(), PersistenceError> {
        self.blob = Some(serde_json::to_value(data)?);
        Ok(())
    }
}

impl SnapshotReader for InMemorySnapshotStore {
    fn read<T: DeserializeOwned>(&mut self) -> Result<Option<T>, PersistenceError> {
        match &self.blob {
            Some(blob) => Ok(Some(serde_json::from_value(blob.clone())?)),
            None => Ok(None),
        }
    }
}
