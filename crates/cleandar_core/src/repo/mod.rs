//! Snapshot persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the load/save contract that mirrors the store to durable
//!   storage.
//! - Isolate SQLite and file-format details from the service layer.
//!
//! # Invariants
//! - `save` persists a full snapshot or nothing; a failed save never leaves
//!   a partially written state behind.
//! - Read paths reject invalid persisted data instead of masking it.
//! - `load` after `save(s)` yields a snapshot equal to `s`.

pub mod codec;
pub mod json_file_repo;
pub mod snapshot_repo;
pub mod sqlite_repo;
