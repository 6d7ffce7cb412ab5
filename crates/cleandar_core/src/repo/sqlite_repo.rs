//! SQLite-backed snapshot repository.
//!
//! # Invariants
//! - `save` runs in one transaction: the table equals the snapshot after
//!   commit, or is unchanged after an error.
//! - Rows are decoded strictly; a bad date, color, timestamp or completion
//!   pair fails the whole load.

use super::snapshot_repo::{RepoError, RepoResult, SnapshotRepository};
use crate::model::color::TagColor;
use crate::model::date_key::DateKey;
use crate::model::day_record::{Completion, DayRecord};
use crate::model::timestamp::{format_timestamp, parse_timestamp};
use crate::store::snapshot::Snapshot;
use log::debug;
use rusqlite::{params, Connection, Row};

const RECORD_SELECT_SQL: &str = "SELECT
    date,
    color,
    note,
    completed,
    completed_at
FROM day_records
ORDER BY date ASC";

/// Snapshot repository over a migrated SQLite connection.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// `conn` must come from `db::open_db` / `db::open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load(&self) -> RepoResult<Snapshot> {
        let mut stmt = self.conn.prepare(RECORD_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        debug!(
            "event=snapshot_load module=repo backend=sqlite status=ok records={}",
            records.len()
        );
        Ok(records.into_iter().collect())
    }

    fn save(&self, snapshot: &Snapshot) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM day_records;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO day_records (
                    date,
                    color,
                    note,
                    completed,
                    completed_at
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
            )?;
            for record in snapshot.iter() {
                insert.execute(params![
                    record.date.to_string(),
                    record.color.as_ref().map(TagColor::as_str),
                    record.note.as_deref(),
                    bool_to_int(record.is_completed()),
                    record.completed_at().map(|at| format_timestamp(&at)),
                ])?;
            }
        }
        tx.commit()?;

        debug!(
            "event=snapshot_save module=repo backend=sqlite status=ok records={}",
            snapshot.len()
        );
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<DayRecord> {
    let date_text: String = row.get("date")?;
    let date = DateKey::parse(&date_text).map_err(|err| {
        RepoError::InvalidData(format!("{err} in day_records.date"))
    })?;

    let color = match row.get::<_, Option<String>>("color")? {
        Some(value) => Some(TagColor::parse(&value).map_err(|err| {
            RepoError::InvalidData(format!("{err} in day_records.color for {date}"))
        })?),
        None => None,
    };

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in day_records.completed for {date}"
            )));
        }
    };

    let completed_at = match row.get::<_, Option<String>>("completed_at")? {
        Some(value) => Some(parse_timestamp(&value).map_err(|err| {
            RepoError::InvalidData(format!("{err} in day_records.completed_at for {date}"))
        })?),
        None => None,
    };

    let completion = Completion::from_parts(completed, completed_at)
        .map_err(|err| RepoError::InvalidData(format!("{err} for {date}")))?;

    Ok(DayRecord {
        date,
        color,
        note: row.get("note")?,
        completion,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
