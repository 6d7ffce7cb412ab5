//! In-memory record store.
//!
//! # Responsibility
//! - Own the date -> record mapping and the four mutation/read operations.
//! - Hand out immutable snapshots for derived views and persistence.
//!
//! # Invariants
//! - Every stored record's `date` equals its key.
//! - Each mutation publishes a new snapshot; snapshots already handed out
//!   never change.
//! - All operations are total: absent keys are silent no-ops.

pub mod clock;
pub mod record_store;
pub mod snapshot;
