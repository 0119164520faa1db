//! Time window filter.
//!
//! Keeps the rows of a time-indexed table whose timestamp falls inside a
//! trailing duration ending at an evaluation instant. The instant is passed
//! in by the caller and read once per build, so every row is compared
//! against the same cutoff.

use chrono::{Duration, NaiveDateTime};

use crate::domain::DecisionRow;

/// A row that carries an (optional) timestamp.
pub trait Timestamped {
    /// `None` means the stored timestamp was null or unparseable.
    fn timestamp(&self) -> Option<NaiveDateTime>;
}

impl Timestamped for DecisionRow {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }
}

/// Earliest timestamp retained by a window of `duration` ending at `now`.
///
/// A window reaching past the earliest representable instant starts there,
/// so it keeps every timestamped row.
pub fn window_start(now: NaiveDateTime, duration: Duration) -> NaiveDateTime {
    now.checked_sub_signed(duration).unwrap_or(NaiveDateTime::MIN)
}

/// Whether `row` lies inside the window starting at `cutoff` (inclusive).
pub fn in_window<T: Timestamped>(row: &T, cutoff: NaiveDateTime) -> bool {
    row.timestamp().is_some_and(|ts| ts >= cutoff)
}

/// Rows with `timestamp >= now - duration`, in their original order.
///
/// Rows without a timestamp are dropped. Nothing is re-sorted.
pub fn trailing_window<T>(rows: &[T], now: NaiveDateTime, duration: Duration) -> Vec<T>
where
    T: Timestamped + Clone,
{
    let cutoff = window_start(now, duration);
    rows.iter()
        .filter(|row| in_window(*row, cutoff))
        .cloned()
        .collect()
}
