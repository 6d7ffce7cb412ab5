//! CSV export of day records.
//!
//! # Responsibility
//! - Render a snapshot as `date,note,status,completedAt,color` rows.
//! - Write timestamped export files for sharing.
//!
//! # Invariants
//! - Rows are emitted in ascending date order, one per record.
//! - Export never reads or mutates store state beyond the given snapshot.

use crate::model::color::TagColor;
use crate::model::timestamp::format_display_timestamp;
use crate::store::snapshot::Snapshot;
use chrono::NaiveDateTime;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: [&str; 5] = ["date", "note", "status", "completedAt", "color"];
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_PENDING: &str = "pending";

const EXPORT_FILE_PREFIX: &str = "cleandar_tasks_";

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "csv export failed: {err}"),
            Self::Io { path, source } => {
                write!(f, "csv export to `{}` failed: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Writes the header and one row per record to `writer`.
pub fn write_csv<W: Write>(snapshot: &Snapshot, writer: W) -> ExportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for record in snapshot.iter() {
        let date = record.date.to_string();
        let status = if record.is_completed() {
            STATUS_COMPLETED
        } else {
            STATUS_PENDING
        };
        let completed_at = record
            .completed_at()
            .map(|at| format_display_timestamp(&at))
            .unwrap_or_default();

        csv_writer.write_record([
            date.as_str(),
            record.note.as_deref().unwrap_or(""),
            status,
            completed_at.as_str(),
            record.color.as_ref().map_or("", TagColor::as_str),
        ])?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// File name for an export taken at `now`, e.g.
/// `cleandar_tasks_20240302_100000.csv`.
pub fn export_file_name(now: &NaiveDateTime) -> String {
    format!("{EXPORT_FILE_PREFIX}{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Writes a timestamped CSV export into `dir` and returns its path.
pub fn export_to_dir(snapshot: &Snapshot, dir: &Path, now: &NaiveDateTime) -> ExportResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(export_file_name(now));
    let file = File::create(&path).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    write_csv(snapshot, file)?;

    info!(
        "event=csv_export module=export status=ok records={} path={}",
        snapshot.len(),
        path.display()
    );
    Ok(path)
}
