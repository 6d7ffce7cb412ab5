//! Day record (annotation) model.
//!
//! # Responsibility
//! - Define the one-per-date annotation: color tag, note, completion.
//! - Provide the persisted wire shape (`date`, `color?`, `note?`,
//!   `completed?`, `completedAt?`).
//!
//! # Invariants
//! - `Completion` makes "`completedAt` iff `completed`" structural.
//! - Completion changes produce new values; records are never patched
//!   through shared references.

use super::color::TagColor;
use super::date_key::DateKey;
use super::timestamp::{format_timestamp, parse_timestamp};
use super::ModelError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Task state of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completion {
    #[default]
    Pending,
    /// Finished; `at` is the most recent transition to completed.
    Completed { at: NaiveDateTime },
}

impl Completion {
    /// Builds completion state from the persisted flag/timestamp pair.
    ///
    /// # Errors
    /// - Returns `InconsistentCompletion` when exactly one side is set.
    pub fn from_parts(
        completed: bool,
        completed_at: Option<NaiveDateTime>,
    ) -> Result<Self, ModelError> {
        match (completed, completed_at) {
            (false, None) => Ok(Self::Pending),
            (true, Some(at)) => Ok(Self::Completed { at }),
            (completed, _) => Err(ModelError::InconsistentCompletion { completed }),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Pending => None,
            Self::Completed { at } => Some(*at),
        }
    }

    /// Flips state; `now` becomes the completion time on flip-to-completed.
    pub fn toggled(self, now: NaiveDateTime) -> Self {
        match self {
            Self::Pending => Self::Completed { at: now },
            Self::Completed { .. } => Self::Pending,
        }
    }
}

/// Canonical per-date annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DayRecordWire", into = "DayRecordWire")]
pub struct DayRecord {
    pub date: DateKey,
    pub color: Option<TagColor>,
    pub note: Option<String>,
    pub completion: Completion,
}

impl DayRecord {
    /// Creates a blank, pending record for `date`.
    pub fn new(date: DateKey) -> Self {
        Self {
            date,
            color: None,
            note: None,
            completion: Completion::Pending,
        }
    }

    pub fn with_color(mut self, color: TagColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_completion(mut self, completion: Completion) -> Self {
        self.completion = completion;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_completed()
    }

    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        self.completion.completed_at()
    }

    /// Returns whether the record carries neither a color nor note text.
    pub fn is_blank(&self) -> bool {
        self.color.is_none() && self.note.as_deref().map_or(true, |n| n.trim().is_empty())
    }

    /// Returns a copy with completion flipped; color and note are untouched.
    pub fn with_completion_toggled(&self, now: NaiveDateTime) -> Self {
        Self {
            completion: self.completion.toggled(now),
            ..self.clone()
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayRecordWire {
    date: DateKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<TagColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl TryFrom<DayRecordWire> for DayRecord {
    type Error = ModelError;

    fn try_from(wire: DayRecordWire) -> Result<Self, Self::Error> {
        let completed_at = wire
            .completed_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;
        Ok(Self {
            date: wire.date,
            color: wire.color,
            note: wire.note,
            completion: Completion::from_parts(wire.completed, completed_at)?,
        })
    }
}

impl From<DayRecord> for DayRecordWire {
    fn from(record: DayRecord) -> Self {
        Self {
            date: record.date,
            color: record.color,
            note: record.note,
            completed: record.completion.is_completed(),
            completed_at: record.completion.completed_at().map(|at| format_timestamp(&at)),
        }
    }
}
