//! Day-record domain model.
//!
//! # Responsibility
//! - Define the canonical per-date annotation shared by every view.
//! - Own parsing/formatting of date keys, tag colors and timestamps.
//!
//! # Invariants
//! - A `DateKey` is always a real calendar date.
//! - `completedAt` is present iff the record is completed; `Completion`
//!   encodes this so no other state is representable.

pub mod color;
pub mod date_key;
pub mod day_record;
pub mod timestamp;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation error for model values decoded from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Input is not a canonical `YYYY-MM-DD` calendar date.
    InvalidDateKey(String),
    /// Input is neither a palette name nor a `#RRGGBB` value.
    InvalidColor(String),
    /// Input is not a supported timestamp form.
    InvalidTimestamp(String),
    /// `completed` flag and `completedAt` presence disagree.
    InconsistentCompletion { completed: bool },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateKey(value) => {
                write!(f, "invalid date key `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidColor(value) => write!(
                f,
                "invalid tag color `{value}`; expected a palette name or #RRGGBB"
            ),
            Self::InvalidTimestamp(value) => write!(f, "invalid timestamp `{value}`"),
            Self::InconsistentCompletion { completed } => write!(
                f,
                "completed={completed} disagrees with completedAt presence"
            ),
        }
    }
}

impl Error for ModelError {}
