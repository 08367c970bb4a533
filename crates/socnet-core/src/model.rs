//! Shared data model: month keys, interaction kinds, connections, and raw
//! activity records.
//!
//! # Month keys
//!
//! Every graph snapshot is keyed by a [`MonthKey`] (year + calendar month).
//! The day and time-of-day of an observation are discarded for keying but
//! stay available on the [`ActivityRecord`] itself. Month keys render and
//! parse as `YYYY-MM`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, NetworkError};

// ---------------------------------------------------------------------------
// MonthKey
// ---------------------------------------------------------------------------

/// A `(year, month)` pair identifying one independent graph snapshot.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a month key from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] if `month` is not in `1..=12`
    /// or `year` is outside the calendar range chrono can represent.
    pub fn new(year: i32, month: u32) -> Result<Self, NetworkError> {
        if !(1..=12).contains(&month) {
            return Err(NetworkError::invalid(
                ErrorCode::InvalidMonthKey,
                format!("month {month} is outside 1..=12"),
            ));
        }
        if !Self::year_in_range(year) {
            return Err(NetworkError::invalid(
                ErrorCode::InvalidMonthKey,
                format!(
                    "year {year} is outside {}..={}",
                    NaiveDate::MIN.year(),
                    NaiveDate::MAX.year()
                ),
            ));
        }
        Ok(Self { year, month })
    }

    fn year_in_range(year: i32) -> bool {
        (NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year)
    }

    /// Month key of any calendar date or timestamp. Total.
    #[must_use]
    pub fn from_datetime<T: Datelike>(at: &T) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    /// Month key of a Unix timestamp (seconds, UTC).
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] when `secs` is outside the
    /// range chrono can represent.
    pub fn from_unix_seconds(secs: i64) -> Result<Self, NetworkError> {
        datetime_from_unix_seconds(secs).map(|at| Self::from_datetime(&at))
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The calendar month after this one, `None` past the last
    /// representable year.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let (year, month) = if self.month == 12 {
            (self.year.checked_add(1)?, 1)
        } else {
            (self.year, self.month + 1)
        };
        Self::year_in_range(year).then_some(Self { year, month })
    }

    /// The calendar month before this one, `None` before the first
    /// representable year.
    #[must_use]
    pub fn prev(self) -> Option<Self> {
        let (year, month) = if self.month == 1 {
            (self.year.checked_sub(1)?, 12)
        } else {
            (self.year, self.month - 1)
        };
        Self::year_in_range(year).then_some(Self { year, month })
    }

    /// Midnight UTC on the first day of the month.
    #[must_use]
    pub fn first_instant(self) -> Option<DateTime<Utc>> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// UTC timestamp of a Unix time in seconds.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidInput`] when `secs` is outside the range
/// chrono can represent.
pub fn datetime_from_unix_seconds(secs: i64) -> Result<DateTime<Utc>, NetworkError> {
    DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| {
        NetworkError::invalid(
            ErrorCode::TimestampOutOfRange,
            format!("unix timestamp {secs} is out of range"),
        )
    })
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || {
            NetworkError::invalid(
                ErrorCode::InvalidMonthKey,
                format!("expected YYYY-MM, got {s:?}"),
            )
        };
        let (year, month) = s.trim().rsplit_once('-').ok_or_else(bad)?;
        let year: i32 = year.parse().map_err(|_| bad())?;
        let month: u32 = month.parse().map_err(|_| bad())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

// ---------------------------------------------------------------------------
// Interaction kinds and connections
// ---------------------------------------------------------------------------

/// Type of a directed interaction edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// The source explicitly follows the target.
    Following,
    /// The source named the target with `@target` in a post.
    Mention,
}

impl InteractionKind {
    pub const ALL: [Self; 2] = [Self::Following, Self::Mention];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Following => "following",
            Self::Mention => "mention",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects which interaction kinds a connection query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindFilter {
    Only(InteractionKind),
    All,
}

impl KindFilter {
    #[must_use]
    pub fn matches(self, kind: InteractionKind) -> bool {
        match self {
            Self::Only(k) => k == kind,
            Self::All => true,
        }
    }
}

impl From<InteractionKind> for KindFilter {
    fn from(kind: InteractionKind) -> Self {
        Self::Only(kind)
    }
}

/// Which end of an edge the queried user sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The queried user is the source.
    Outbound,
    /// The queried user is the target.
    Inbound,
}

/// One typed relationship seen from a queried user's side.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub direction: Direction,
    pub kind: InteractionKind,
    pub user: String,
}

// ---------------------------------------------------------------------------
// ActivityRecord
// ---------------------------------------------------------------------------

/// One observation of a user's activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub username: String,
    pub observed_at: DateTime<Utc>,
    #[serde(default)]
    pub following: Vec<String>,
    #[serde(default)]
    pub posts: Vec<String>,
}

impl ActivityRecord {
    /// Month this record is filed under.
    #[must_use]
    pub fn month(&self) -> MonthKey {
        MonthKey::from_datetime(&self.observed_at)
    }
}
