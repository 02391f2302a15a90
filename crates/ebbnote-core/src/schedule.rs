//! Review schedule and age evaluation
//!
//! A note is due for review when the number of calendar days since it was last
//! modified is one of the configured schedule days. Days are counted by
//! truncating epoch seconds to whole UTC days, so two timestamps on the same
//! UTC day are 0 days apart no matter how far apart they are within that day.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{EbbError, Result};
use crate::note::Note;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Forgetting-curve intervals used when no schedule is configured
pub const DEFAULT_SCHEDULE_DAYS: &[u32] = &[0, 1, 2, 4, 7, 15, 30, 60, 120, 240];

/// Whole-day distance between two epoch timestamps.
///
/// Both timestamps are floored to their UTC day before subtracting, so the
/// result is symmetric and crossing a single midnight counts as one day.
pub fn days_difference(later: i64, earlier: i64) -> i64 {
    let day_later = later.div_euclid(SECONDS_PER_DAY);
    let day_earlier = earlier.div_euclid(SECONDS_PER_DAY);
    (day_later - day_earlier).abs()
}

/// Set of day offsets after which a note becomes due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    days: BTreeSet<u32>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEDULE_DAYS.iter().copied())
    }
}

impl Schedule {
    pub fn new(days: impl IntoIterator<Item = u32>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    pub fn contains(&self, days: i64) -> bool {
        u32::try_from(days).is_ok_and(|d| self.days.contains(&d))
    }

    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Whether `note` is due at `reference_time` (epoch seconds)
    pub fn is_due(&self, note: &Note, reference_time: i64) -> bool {
        self.contains(days_difference(reference_time, note.last_modified))
    }

    /// The notes due at `reference_time`, in their original order
    pub fn filter(&self, notes: &[Note], reference_time: i64) -> Vec<Note> {
        notes
            .iter()
            .filter(|note| self.is_due(note, reference_time))
            .cloned()
            .collect()
    }
}

impl FromStr for Schedule {
    type Err = EbbError;

    /// Parse the comma-separated form, e.g. `0, 1, 2, 4`
    fn from_str(s: &str) -> Result<Self> {
        let mut days = BTreeSet::new();
        for item in s.split(',') {
            let item = item.trim();
            let day: i64 = item
                .parse()
                .map_err(|_| EbbError::invalid_value("schedule day", format!("{item:?}")))?;
            if day < 0 {
                return Err(EbbError::invalid_value(
                    "schedule day (must be non-negative)",
                    day,
                ));
            }
            let day = u32::try_from(day)
                .map_err(|_| EbbError::invalid_value("schedule day (too large)", day))?;
            days.insert(day);
        }
        Ok(Self { days })
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .days
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}
