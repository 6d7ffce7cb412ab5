//! Immutable view of the record mapping.

use crate::model::date_key::DateKey;
use crate::model::day_record::DayRecord;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shareable, fully materialized mapping at one point in time.
///
/// Cloning is cheap (reference counted). Iteration is chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    records: Arc<BTreeMap<DateKey, DayRecord>>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, date: &DateKey) -> Option<&DayRecord> {
        self.records.get(date)
    }

    pub fn contains(&self, date: &DateKey) -> bool {
        self.records.contains_key(date)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = &DayRecord> + '_ {
        self.records.values()
    }

    pub fn dates(&self) -> impl Iterator<Item = &DateKey> + '_ {
        self.records.keys()
    }

    /// Copy-on-write access: clones the map only while other snapshots
    /// still share it.
    pub(crate) fn records_mut(&mut self) -> &mut BTreeMap<DateKey, DayRecord> {
        Arc::make_mut(&mut self.records)
    }
}

/// Later records win when two share a date.
impl FromIterator<DayRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = DayRecord>>(iter: I) -> Self {
        let records = iter
            .into_iter()
            .map(|record| (record.date, record))
            .collect::<BTreeMap<_, _>>();
        Self {
            records: Arc::new(records),
        }
    }
}
