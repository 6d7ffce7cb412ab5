//! Repository trait and error type shared by persistence backends.

use crate::db::DbError;
use crate::store::snapshot::Snapshot;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for snapshot load/save operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Codec(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Codec(err) => write!(f, "snapshot codec error: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted day record: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Codec(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Durable mirror of the record store.
pub trait SnapshotRepository {
    /// Reads the last saved snapshot; empty when nothing was saved yet.
    fn load(&self) -> RepoResult<Snapshot>;
    /// Replaces the persisted state with `snapshot`.
    fn save(&self, snapshot: &Snapshot) -> RepoResult<()>;
    /// Short backend name for diagnostics.
    fn backend(&self) -> &'static str;
}

impl<R: SnapshotRepository + ?Sized> SnapshotRepository for Box<R> {
    fn load(&self) -> RepoResult<Snapshot> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> RepoResult<()> {
        (**self).save(snapshot)
    }

    fn backend(&self) -> &'static str {
        (**self).backend()
    }
}
