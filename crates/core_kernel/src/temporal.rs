//! Business time handling
//!
//! The portal runs on a single, fixed North American business timezone.
//! Calendar-date decisions (which billing period a timestamp belongs to,
//! which day a time entry counts against) are made in that zone.
//!
//! Wall-clock access is modeled by the [`Clock`] trait so that callers
//! can inject a [`FixedClock`] in tests.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// The timezone every calendar decision is made in
pub const BUSINESS_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid range: start {start} must not be after end {end}")]
    InvalidRange {
        start: String,
        end: String,
    },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Local time {0} does not exist in the business timezone")]
    NonexistentLocalTime(String),
}

/// Timezone wrapper with serialization by IANA name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessTimezone(pub Tz);

impl Serialize for BusinessTimezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for BusinessTimezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(BusinessTimezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl BusinessTimezone {
    /// Returns the IANA name of the zone
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Converts a UTC instant to the local calendar date
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// Gets local midnight of the given date as UTC
    pub fn start_of_day(&self, date: NaiveDate) -> Result<DateTime<Utc>, TemporalError> {
        let local = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| TemporalError::InvalidDate(date.to_string()))?;
        self.0
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| TemporalError::NonexistentLocalTime(local.to_string()))
    }
}

impl Default for BusinessTimezone {
    fn default() -> Self {
        Self(BUSINESS_TIMEZONE)
    }
}

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Today's date in the business timezone
    fn today(&self) -> NaiveDate {
        BusinessTimezone::default().local_date(self.now())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Reads the system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// A clock reading local noon of `date` in the business timezone
    pub fn on_local_date(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        let instant = BUSINESS_TIMEZONE
            .from_local_datetime(&noon)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&noon));
        Self(instant)
    }

    /// Moves the clock forward
    pub fn advance(&mut self, by: Duration) {
        self.0 += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day
    pub fn single_day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
