//! Upcoming/completed task lists.

use crate::model::date_key::DateKey;
use crate::model::day_record::DayRecord;
use crate::store::snapshot::Snapshot;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Which task list to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskTab {
    /// Not completed and dated today or later.
    #[default]
    Pending,
    /// Completed, any date.
    Completed,
}

impl TaskTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    fn includes(&self, record: &DayRecord, today: &DateKey) -> bool {
        match self {
            Self::Pending => !record.is_completed() && record.date >= *today,
            Self::Completed => record.is_completed(),
        }
    }
}

impl Display for TaskTab {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskTab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(format!(
                "unsupported task tab `{other}`; expected pending|completed"
            )),
        }
    }
}

/// Returns the records of `tab` matching `query`, oldest first.
///
/// Pending compares dates at day granularity: a record dated `today` is
/// still upcoming, one dated yesterday is not. Only the empty query matches
/// everything; whitespace in a query is part of the needle.
pub fn partition_tasks<'a>(
    snapshot: &'a Snapshot,
    today: &DateKey,
    tab: TaskTab,
    query: &str,
) -> Vec<&'a DayRecord> {
    let matcher = SearchMatcher::new(query);
    snapshot
        .iter()
        .filter(|record| tab.includes(record, today) && matcher.matches(record))
        .collect()
}

/// Returns every record matching `query` regardless of completion, oldest
/// first.
pub fn search_records<'a>(snapshot: &'a Snapshot, query: &str) -> Vec<&'a DayRecord> {
    let matcher = SearchMatcher::new(query);
    snapshot
        .iter()
        .filter(|record| matcher.matches(record))
        .collect()
}

struct SearchMatcher {
    needle: Option<String>,
}

impl SearchMatcher {
    fn new(query: &str) -> Self {
        Self {
            needle: (!query.is_empty()).then(|| query.to_lowercase()),
        }
    }

    fn matches(&self, record: &DayRecord) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };
        let in_note = record
            .note
            .as_deref()
            .is_some_and(|note| note.to_lowercase().contains(needle));
        in_note || record.date.to_string().contains(needle)
    }
}
