//! Compiled interfaces: opaque, persisted, immutable values.

use crate::error::{BuildError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// An opaque, compiler-produced summary of a module's public surface.
///
/// The driver never interprets the bytes: it only persists them, loads them
/// back, and hands them to dependents via the ready-map. What the bytes mean
/// is the compiler collaborator's business; see [DESIGN.md] Open Question 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface(pub Vec<u8>);

impl Interface {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Reads a persisted interface from `path`. Any I/O failure on a path
    /// that [`is_fresh`] already reported as existing is a [`BuildError::CorruptedArtifact`],
    /// not a plain I/O error: by the time we get here the file is known to
    /// exist, so failure means it can't be parsed as an interface.
    #[tracing::instrument(level = "trace", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|_| BuildError::CorruptedArtifact(path.to_path_buf()))?;
        Ok(Self(bytes))
    }

    /// Persists the interface to `path`, creating parent directories as
    /// needed.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(e, parent))?;
        }
        fs::write(path, &self.0).map_err(|e| BuildError::io(e, path))
    }
}

/// Returns `true` iff `interface_path` exists and its modification time is at
/// least as recent as `source_path`'s — staleness compares the source
/// file's mtime to the interface file's mtime; `≤` is fresh.
pub fn is_fresh(source_path: &Path, interface_path: &Path) -> Result<bool> {
    if !interface_path.exists() {
        return Ok(false);
    }
    let source_mtime = mtime(source_path)?;
    let interface_mtime = mtime(interface_path)?;
    Ok(source_mtime <= interface_mtime)
}

fn mtime(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| BuildError::io(e, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn missing_interface_is_not_fresh() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("A.elm");
        File::create(&source).unwrap();
        let interface = dir.path().join("A.elmi");
        assert!(!is_fresh(&source, &interface).unwrap());
    }

    #[test]
    fn interface_newer_than_source_is_fresh() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("A.elm");
        File::create(&source).unwrap();
        let interface = dir.path().join("A.elmi");
        File::create(&interface).unwrap();
        assert!(is_fresh(&source, &interface).unwrap());
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/A.elmi");
        let iface = Interface::new(vec![1, 2, 3]);
        iface.write(&path).unwrap();
        let loaded = Interface::load(&path).unwrap();
        assert_eq!(iface, loaded);
    }
}
