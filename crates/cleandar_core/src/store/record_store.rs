//! Record store operations.

use super::clock::{Clock, SystemClock};
use super::snapshot::Snapshot;
use crate::model::date_key::DateKey;
use crate::model::day_record::DayRecord;

/// Owner of the date -> record mapping.
///
/// Instances are independent; there is no process-wide store.
#[derive(Debug, Clone)]
pub struct RecordStore<C: Clock = SystemClock> {
    current: Snapshot,
    clock: C,
}

impl RecordStore<SystemClock> {
    /// Creates an empty store using the host clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for RecordStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> RecordStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::from_snapshot(Snapshot::empty(), clock)
    }

    /// Rehydrates a store from a previously saved snapshot.
    pub fn from_snapshot(snapshot: Snapshot, clock: C) -> Self {
        Self {
            current: snapshot,
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Inserts or wholesale-replaces the record at `record.date`.
    ///
    /// No field of a previous record survives (last write wins).
    pub fn upsert(&mut self, record: DayRecord) {
        self.current.records_mut().insert(record.date, record);
    }

    /// Deletes the record at `date`, returning it if one existed.
    pub fn remove(&mut self, date: &DateKey) -> Option<DayRecord> {
        if !self.current.contains(date) {
            return None;
        }
        self.current.records_mut().remove(date)
    }

    /// Flips completion of the record at `date`.
    ///
    /// Flip-to-completed stamps the clock's current time; flip-to-pending
    /// clears it. Absent dates are a silent no-op and return `None`.
    pub fn toggle_completion(&mut self, date: &DateKey) -> Option<&DayRecord> {
        let toggled = self
            .current
            .get(date)?
            .with_completion_toggled(self.clock.now());
        let records = self.current.records_mut();
        records.insert(*date, toggled);
        records.get(date)
    }

    pub fn get(&self, date: &DateKey) -> Option<&DayRecord> {
        self.current.get(date)
    }

    /// Returns the current mapping; unaffected by later mutations.
    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    /// Borrows the current mapping without bumping the reference count.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Replaces the whole mapping, e.g. after loading persisted state.
    pub fn replace_all(&mut self, snapshot: Snapshot) {
        self.current = snapshot;
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}
