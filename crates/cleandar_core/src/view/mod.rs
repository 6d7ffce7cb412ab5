//! Derived, read-only projections over a store snapshot.
//!
//! # Responsibility
//! - Partition records into pending/completed task lists with search.
//! - Shape a full year of day slots for grid rendering.
//!
//! # Invariants
//! - Views are pure functions of `(snapshot, parameters)`; they never
//!   mutate or retain the snapshot.
//! - Output order is chronological.

pub mod tasks;
pub mod year_grid;
