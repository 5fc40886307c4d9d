use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{BuildSnapshot, SnapshotError};

/// Where the snapshot of the last build is kept.
///
/// The presence of a snapshot is what makes a pipeline run in update mode,
/// see [`PipelineMode::select`](super::PipelineMode::select).
pub trait SnapshotStore {
    /// Reads the stored snapshot, if any.
    fn load(&self) -> Result<Option<BuildSnapshot>, SnapshotError>;
    /// Replaces the stored snapshot.
    fn store(&mut self, snapshot: &BuildSnapshot) -> Result<(), SnapshotError>;
    /// Removes the stored snapshot, so that the next build starts from scratch.
    fn clear(&mut self) -> Result<(), SnapshotError>;
}

/// A snapshot store kept in memory, as JSON.
#[derive(Clone, Debug, Default)]
pub struct MemorySnapshotStore {
    json: Option<String>,
}

impl MemorySnapshotStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The encoded snapshot, if any.
    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<BuildSnapshot>, SnapshotError> {
        self.json.as_deref().map(BuildSnapshot::from_json).transpose()
    }

    fn store(&mut self, snapshot: &BuildSnapshot) -> Result<(), SnapshotError> {
        self.json = Some(snapshot.to_json()?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SnapshotError> {
        self.json = None;
        Ok(())
    }
}

/// A snapshot store backed by a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    /// A store reading and writing the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> Result<Option<BuildSnapshot>, SnapshotError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => BuildSnapshot::from_json(&json).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&mut self, snapshot: &BuildSnapshot) -> Result<(), SnapshotError> {
        let json = snapshot.to_json()?;
        // A failed write never truncates the previous snapshot.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SnapshotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
