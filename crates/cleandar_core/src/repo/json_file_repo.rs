//! Single-file JSON snapshot repository.
//!
//! Writes go to a sibling temp file that is renamed over the target, so a
//! crash mid-write leaves the previous snapshot intact.

use super::codec::{decode_snapshot, encode_snapshot};
use super::snapshot_repo::{RepoError, RepoResult, SnapshotRepository};
use crate::store::snapshot::Snapshot;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct JsonFileSnapshotRepository {
    path: PathBuf,
}

impl JsonFileSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl SnapshotRepository for JsonFileSnapshotRepository {
    fn load(&self) -> RepoResult<Snapshot> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Snapshot::empty()),
            Err(err) => return Err(self.io_error(&self.path, err)),
        };

        let snapshot = decode_snapshot(&text)?;
        debug!(
            "event=snapshot_load module=repo backend=json status=ok records={}",
            snapshot.len()
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> RepoResult<()> {
        let encoded = encode_snapshot(snapshot)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(parent, err))?;
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, encoded).map_err(|err| self.io_error(&temp_path, err))?;
        fs::rename(&temp_path, &self.path).map_err(|err| self.io_error(&self.path, err))?;

        debug!(
            "event=snapshot_save module=repo backend=json status=ok records={}",
            snapshot.len()
        );
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "json"
    }
}
