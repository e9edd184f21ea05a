//! File-backed JSON snapshots.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::snapshot::{PersistenceError, SnapshotReader, SnapshotWriter};

/// Persists the snapshot as a single JSON file on local disk.
///
/// The file is rewritten wholesale on every write; a missing file reads as
/// "no data yet". There is no atomic rename and no crash-consistency
/// guarantee for a write interrupted mid-flight.
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Create a store backed by the given file path.
    ///
    /// The file itself need not exist yet; the first write creates it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonSnapshotStore { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, error: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source: error,
        }
    }
}

impl SnapshotWriter for JsonSnapshotStore {
    fn write<T: Serialize>(&mut self, data: &T) -> Result<(), PersistenceError> {
        log::debug!("Writing snapshot {}...", self.path.display());

        let file = fs::File::create(&self.path).map_err(|error| self.io_error(error))?;
        let mut writer = io::BufWriter::new(file);
        serde_json::to_writer(&mut writer, data)?;
        writer.flush().map_err(|error| self.io_error(error))?;
        Ok(())
    }
}

impl SnapshotReader for JsonSnapshotStore {
    fn read<T: DeserializeOwned>(&mut self) -> Result<Option<T>, PersistenceError> {
        log::debug!("Reading snapshot {}...", self.path.display());

        if !self.path.exists() {
            return Ok(None);
        }
        let file = fs::File::open(&self.path).map_err(|error| self.io_error(error))?;
        let data = serde_json::from_reader(io::BufReader::new(file))?;
        Ok(Some(data))
    }
}
