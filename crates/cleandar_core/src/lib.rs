//! Core domain logic for Cleandar, a day-by-day calendar journal.
//! This crate is the single source of truth for day-record invariants.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use config::{AppConfig, ConfigOverrides, StorageBackend};
pub use export::{export_file_name, export_to_dir, write_csv, ExportError, ExportResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::color::TagColor;
pub use model::date_key::DateKey;
pub use model::day_record::{Completion, DayRecord};
pub use model::ModelError;
pub use repo::codec::{decode_snapshot, encode_snapshot};
pub use repo::json_file_repo::JsonFileSnapshotRepository;
pub use repo::snapshot_repo::{RepoError, RepoResult, SnapshotRepository};
pub use repo::sqlite_repo::SqliteSnapshotRepository;
pub use service::journal_service::{DayEdit, JournalService, PersistCause, PersistError};
pub use store::clock::{Clock, FixedClock, SystemClock};
pub use store::record_store::RecordStore;
pub use store::snapshot::Snapshot;
pub use view::tasks::{partition_tasks, search_records, TaskTab};
pub use view::year_grid::{year_grid, GridSlot, MonthColumn, YearGrid};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
