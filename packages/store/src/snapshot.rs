//! Snapshot persistence traits.
//!
//! A snapshot target durably holds exactly one serialized blob: the whole
//! tree graph, rewritten wholesale after every successful mutation. The
//! traits below are the seam between the store and whatever medium holds
//! that blob.

use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors from reading or writing a snapshot target.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("failed to access snapshot file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("{0}")]
    Serialization(#[from] serde_json::Error),
}

/// Write the whole blob to the snapshot target.
pub trait SnapshotWriter {
    /// Serialize `data` and replace whatever the target held before.
    fn write<T: Serialize>(&mut self, data: &T) -> Result<(), PersistenceError>;
}

/// Read the whole blob back from the snapshot target.
pub trait SnapshotReader {
    /// Deserialize the target's blob.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - The target holds no data yet.
    /// * `Ok(Some(data))` - The deserialized blob.
    /// * `Err(PersistenceError)` - I/O or (de)serialization failure.
    fn read<T: DeserializeOwned>(&mut self) -> Result<Option<T>, PersistenceError>;
}

/// Combined snapshot read/write.
pub trait SnapshotStore: SnapshotReader + SnapshotWriter {}
impl<T: SnapshotReader + SnapshotWriter> SnapshotStore for T {}
