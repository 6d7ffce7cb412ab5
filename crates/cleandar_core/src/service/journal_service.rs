//! Journal use-case service.
//!
//! # Responsibility
//! - Rehydrate the record store from durable storage before first use.
//! - Accept the mutation intents (`upsert`, `remove`, `toggle_completion`)
//!   and mirror the resulting snapshot after every change.
//! - Serve derived views over the current snapshot.
//!
//! # Invariants
//! - The in-memory store is the source of truth. A mutation is applied
//!   before persistence is attempted and stays applied when saving fails.
//! - Saved state that cannot be read is never overwritten implicitly: the
//!   service starts empty and refuses to save until
//!   [`JournalService::reset_storage`] is called.
//! - No-op intents (removing or toggling an absent date) do not touch
//!   storage.
//! - Log events carry metadata only; note text is never logged.

use crate::model::color::TagColor;
use crate::model::date_key::DateKey;
use crate::model::day_record::DayRecord;
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository};
use crate::store::clock::{Clock, SystemClock};
use crate::store::record_store::RecordStore;
use crate::store::snapshot::Snapshot;
use crate::view::tasks::{partition_tasks, search_records, TaskTab};
use crate::view::year_grid::{year_grid, YearGrid};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a mutation could not be saved.
#[derive(Debug)]
pub enum PersistCause {
    /// The repository rejected the save.
    Save(RepoError),
    /// Saved state could not be read at startup; saving would overwrite it.
    StorageUnreadable,
}

impl Display for PersistCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Save(err) => write!(f, "{err}"),
            Self::StorageUnreadable => {
                write!(f, "saved journal is unreadable; reset storage to save again")
            }
        }
    }
}

/// A mutation was applied in memory but could not be saved.
///
/// Non-fatal: callers surface it as a notification and keep going. The next
/// successful save (or [`JournalService::flush`]) writes the full state.
#[derive(Debug)]
pub struct PersistError {
    pub operation: &'static str,
    pub cause: PersistCause,
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} applied but not saved: {}", self.operation, self.cause)
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            PersistCause::Save(err) => Some(err),
            PersistCause::StorageUnreadable => None,
        }
    }
}

/// Result of [`JournalService::edit_day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayEdit {
    /// A fresh record replaced whatever was stored for the date.
    Saved,
    /// The edit was blank and the date's record was removed.
    Cleared,
    /// The edit was blank and the date had no record.
    Unchanged,
}

/// Store + persistence facade used by front ends.
pub struct JournalService<R: SnapshotRepository, C: Clock = SystemClock> {
    store: RecordStore<C>,
    repo: R,
    unsaved: bool,
    storage_unreadable: bool,
}

impl<R: SnapshotRepository, C: Clock> JournalService<R, C> {
    /// Loads the last saved snapshot from `repo`.
    ///
    /// # Contract
    /// - Never fails. When the saved state cannot be read, the service starts
    ///   empty and the load error is returned next to it as a notification.
    /// - In that case saving stays disabled until [`Self::reset_storage`], so
    ///   the unreadable state is left as it was.
    pub fn open(repo: R, clock: C) -> (Self, Option<RepoError>) {
        let (snapshot, load_error) = match repo.load() {
            Ok(snapshot) => {
                info!(
                    "event=journal_open module=service status=ok backend={} records={}",
                    repo.backend(),
                    snapshot.len()
                );
                (snapshot, None)
            }
            Err(err) => {
                warn!(
                    "event=journal_open module=service status=degraded backend={} error={}",
                    repo.backend(),
                    err
                );
                (Snapshot::empty(), Some(err))
            }
        };

        let journal = Self {
            store: RecordStore::from_snapshot(snapshot, clock),
            repo,
            unsaved: false,
            storage_unreadable: load_error.is_some(),
        };
        (journal, load_error)
    }

    /// Inserts or wholesale-replaces the record for `record.date`.
    pub fn upsert(&mut self, record: DayRecord) -> Result<(), PersistError> {
        let date = record.date;
        self.store.upsert(record);
        info!("event=record_upsert module=service status=applied date={date}");
        self.persist("upsert")
    }

    /// Deletes the record for `date`; absent dates are a no-op.
    pub fn remove(&mut self, date: &DateKey) -> Result<(), PersistError> {
        if self.store.remove(date).is_none() {
            return Ok(());
        }
        info!("event=record_remove module=service status=applied date={date}");
        self.persist("remove")
    }

    /// Flips completion for `date`; absent dates are a no-op.
    pub fn toggle_completion(&mut self, date: &DateKey) -> Result<(), PersistError> {
        let Some(record) = self.store.toggle_completion(date) else {
            return Ok(());
        };
        info!(
            "event=record_toggle module=service status=applied date={} completed={}",
            date,
            record.is_completed()
        );
        self.persist("toggle_completion")
    }

    /// Applies one editor submission for `date`.
    ///
    /// Unlike a color-required editor, note-only edits are accepted and a
    /// blank submission deletes the day instead of being rejected.
    ///
    /// # Contract
    /// - The note is trimmed; an empty note is stored as absent.
    /// - A blank edit (no color, no note) removes the date's record.
    /// - Otherwise a fresh pending record replaces the stored one; color,
    ///   note and completion from the previous record do not carry over.
    pub fn edit_day(
        &mut self,
        date: DateKey,
        color: Option<TagColor>,
        note: &str,
    ) -> Result<DayEdit, PersistError> {
        let note = note.trim();
        let mut record = DayRecord::new(date);
        record.color = color;
        if !note.is_empty() {
            record.note = Some(note.to_string());
        }

        if record.is_blank() {
            if self.store.get(&date).is_none() {
                return Ok(DayEdit::Unchanged);
            }
            self.remove(&date)?;
            return Ok(DayEdit::Cleared);
        }

        self.upsert(record)?;
        Ok(DayEdit::Saved)
    }

    /// Retries saving the current snapshot after an earlier failure.
    ///
    /// Still refused while the saved state is unreadable.
    pub fn flush(&mut self) -> Result<(), PersistError> {
        if !self.unsaved {
            return Ok(());
        }
        self.persist("flush")
    }

    /// Overwrites unreadable saved state with the current in-memory snapshot
    /// and re-enables saving.
    ///
    /// Callers invoke this only after the user confirmed discarding the
    /// unreadable state.
    pub fn reset_storage(&mut self) -> Result<(), PersistError> {
        if self.storage_unreadable {
            warn!(
                "event=storage_reset module=service status=start backend={} records={}",
                self.repo.backend(),
                self.store.len()
            );
        }
        self.storage_unreadable = false;
        self.persist("reset_storage")
    }

    /// Whether the last save attempt failed or was refused.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Whether saved state failed to load and saving is disabled.
    pub fn is_storage_unreadable(&self) -> bool {
        self.storage_unreadable
    }

    pub fn get(&self, date: &DateKey) -> Option<&DayRecord> {
        self.store.get(date)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Current calendar day according to the service clock.
    pub fn today(&self) -> DateKey {
        self.store.clock().today()
    }

    pub fn tasks(&self, today: &DateKey, tab: TaskTab, query: &str) -> Vec<&DayRecord> {
        partition_tasks(self.store.current(), today, tab, query)
    }

    pub fn search(&self, query: &str) -> Vec<&DayRecord> {
        search_records(self.store.current(), query)
    }

    pub fn year_grid(&self, year: i32) -> Option<YearGrid<'_>> {
        year_grid(self.store.current(), year)
    }

    pub fn clock(&self) -> &C {
        self.store.clock()
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    fn persist(&mut self, operation: &'static str) -> Result<(), PersistError> {
        if self.storage_unreadable {
            self.unsaved = true;
            warn!(
                "event=snapshot_save module=service status=refused op={} backend={}",
                operation,
                self.repo.backend()
            );
            return Err(PersistError {
                operation,
                cause: PersistCause::StorageUnreadable,
            });
        }
        match self.repo.save(self.store.current()) {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            }
            Err(err) => {
                self.unsaved = true;
                warn!(
                    "event=snapshot_save module=service status=error op={} backend={} error={}",
                    operation,
                    self.repo.backend(),
                    err
                );
                Err(PersistError {
                    operation,
                    cause: PersistCause::Save(err),
                })
            }
        }
    }
}
