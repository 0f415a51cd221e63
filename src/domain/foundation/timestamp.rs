//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Longest offset `plus_secs` will apply, roughly one hundred years.
const MAX_OFFSET_SECS: u64 = 100 * 366 * 24 * 60 * 60;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Calendar day (UTC) this timestamp falls on.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Moves forward by `secs`, saturating instead of overflowing.
    pub fn plus_secs(&self, secs: u64) -> Self {
        let offset = Duration::seconds(secs.min(MAX_OFFSET_SECS) as i64);
        Self(self.0.checked_add_signed(offset).unwrap_or(DateTime::<Utc>::MAX_UTC))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
