//! Year grid data shaping.
//!
//! The grid is month-major, day-of-month-minor: 12 columns of 31 slots.
//! Slots past a month's last day are `Missing` rather than omitted so every
//! column has the same shape.

use crate::model::date_key::DateKey;
use crate::model::day_record::DayRecord;
use crate::store::snapshot::Snapshot;
use chrono::NaiveDate;

pub const MONTHS_PER_YEAR: usize = 12;
pub const MAX_DAYS_PER_MONTH: usize = 31;

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSlot<'a> {
    /// The month has no such day (e.g. February 30).
    Missing,
    /// A real date, with its record when annotated.
    Day {
        date: DateKey,
        record: Option<&'a DayRecord>,
    },
}

impl<'a> GridSlot<'a> {
    pub fn date(&self) -> Option<DateKey> {
        match self {
            Self::Missing => None,
            Self::Day { date, .. } => Some(*date),
        }
    }

    pub fn record(&self) -> Option<&'a DayRecord> {
        match self {
            Self::Missing => None,
            Self::Day { record, .. } => *record,
        }
    }

    /// Whether the cell renders a colored marker.
    pub fn is_marked(&self) -> bool {
        self.record().is_some_and(|record| record.color.is_some())
    }
}

/// All slots of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthColumn<'a> {
    month: u32,
    slots: [GridSlot<'a>; MAX_DAYS_PER_MONTH],
}

impl<'a> MonthColumn<'a> {
    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn slots(&self) -> &[GridSlot<'a>; MAX_DAYS_PER_MONTH] {
        &self.slots
    }

    pub fn day_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| !matches!(slot, GridSlot::Missing))
            .count()
    }
}

/// Render-ready projection of one calendar year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGrid<'a> {
    year: i32,
    months: [MonthColumn<'a>; MONTHS_PER_YEAR],
}

impl<'a> YearGrid<'a> {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn months(&self) -> &[MonthColumn<'a>; MONTHS_PER_YEAR] {
        &self.months
    }

    /// Slot at 1-based `month`/`day`; `None` outside 1..=12 / 1..=31.
    pub fn slot(&self, month: u32, day: u32) -> Option<&GridSlot<'a>> {
        let month_index = usize::try_from(month).ok()?.checked_sub(1)?;
        let day_index = usize::try_from(day).ok()?.checked_sub(1)?;
        self.months.get(month_index)?.slots.get(day_index)
    }

    /// Day-major rows: row `n` holds day `n + 1` of every month.
    pub fn rows(&self) -> impl Iterator<Item = [GridSlot<'a>; MONTHS_PER_YEAR]> + '_ {
        (0..MAX_DAYS_PER_MONTH)
            .map(move |day| std::array::from_fn(|month| self.months[month].slots[day]))
    }

    /// Every real date of the year in calendar order.
    pub fn days(&self) -> impl Iterator<Item = (DateKey, Option<&'a DayRecord>)> + '_ {
        self.months
            .iter()
            .flat_map(|column| column.slots.iter())
            .filter_map(|slot| match slot {
                GridSlot::Missing => None,
                GridSlot::Day { date, record } => Some((*date, *record)),
            })
    }

    pub fn day_count(&self) -> usize {
        self.months.iter().map(MonthColumn::day_count).sum()
    }
}

/// Builds the grid for `year`.
///
/// Returns `None` when the year is outside the representable date range.
pub fn year_grid(snapshot: &Snapshot, year: i32) -> Option<YearGrid<'_>> {
    NaiveDate::from_ymd_opt(year, 1, 1)?;
    NaiveDate::from_ymd_opt(year, 12, 31)?;

    let months = std::array::from_fn(|month_index| {
        let month = month_index as u32 + 1;
        MonthColumn {
            month,
            slots: std::array::from_fn(|day_index| {
                match DateKey::from_ymd(year, month, day_index as u32 + 1) {
                    Some(date) => GridSlot::Day {
                        date,
                        record: snapshot.get(&date),
                    },
                    None => GridSlot::Missing,
                }
            }),
        }
    });

    Some(YearGrid { year, months })
}
