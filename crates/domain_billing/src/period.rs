//! Semi-monthly billing periods
//!
//! The calendar is partitioned into two periods per month: the 1st through
//! the 15th, and the 16th through the last day of the month. Every date
//! belongs to exactly one period. Periods are never stored; they are
//! recomputed from a date (or from their `key`) whenever needed, and
//! invoices persist only the `start`/`end` dates they were drafted against.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

use core_kernel::{BusinessTimezone, Clock, DateRange};

/// Last day of the first half of every month
const FIRST_HALF_END_DAY: u32 = 15;

/// Format of a period key, which is the period's start date
const KEY_FORMAT: &str = "%Y-%m-%d";

/// Failure to turn a stored key back into a period
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PeriodKeyError {
    #[error("Invalid billing period key: {key:?} (expected YYYY-MM-DD)")]
    InvalidKey { key: String },
}

/// Which half of the month a period covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodHalf {
    First,
    Second,
}

/// One semi-monthly billing window, both ends inclusive
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// e.g. "Jan 1-15, 2026"
    pub label: String,
    /// `start` as `YYYY-MM-DD`; sorts in period order
    pub key: String,
}

impl BillingPeriod {
    /// The period containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let first_of_month = date.with_day(1).unwrap_or(date);
        let (start, end) = if date.day() <= FIRST_HALF_END_DAY {
            (first_of_month, first_of_month + Days::new(u64::from(FIRST_HALF_END_DAY - 1)))
        } else {
            (
                first_of_month + Days::new(u64::from(FIRST_HALF_END_DAY)),
                last_day_of_month(first_of_month),
            )
        };

        Self {
            start,
            end,
            label: format!(
                "{} {}-{}, {}",
                start.format("%b"),
                start.day(),
                end.day(),
                start.year()
            ),
            key: start.format(KEY_FORMAT).to_string(),
        }
    }

    pub fn half(&self) -> PeriodHalf {
        if self.start.day() == 1 {
            PeriodHalf::First
        } else {
            PeriodHalf::Second
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the period (13 to 16)
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The period starting the day after this one ends
    ///
    /// `None` when this period ends on the last representable date.
    pub fn next(&self) -> Option<Self> {
        self.end.succ_opt().map(Self::containing)
    }

    /// The period ending the day before this one starts
    ///
    /// `None` when this period starts on the first representable date.
    pub fn previous(&self) -> Option<Self> {
        self.start.pred_opt().map(Self::containing)
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Day before the first of the following month
fn last_day_of_month(first_of_month: NaiveDate) -> NaiveDate {
    first_of_month
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        // Only reachable at NaiveDate::MAX; December always has 31 days
        .unwrap_or_else(|| first_of_month + Days::new(30))
}

/// Computes billing periods in the business timezone
///
/// Stateless apart from the timezone; `Copy` and freely shared across
/// threads. Wall-clock reads go through the [`Clock`] passed to
/// [`current_period`](Self::current_period) and
/// [`next_period`](Self::next_period).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BillingPeriodCalculator {
    timezone: BusinessTimezone,
}

impl BillingPeriodCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timezone(&self) -> BusinessTimezone {
        self.timezone
    }

    /// The period enclosing a calendar date
    pub fn period_for_date(&self, date: NaiveDate) -> BillingPeriod {
        BillingPeriod::containing(date)
    }

    /// The period enclosing an instant, judged by its local calendar date
    pub fn period_for_instant(&self, instant: DateTime<Utc>) -> BillingPeriod {
        self.period_for_date(self.timezone.local_date(instant))
    }

    pub fn current_period(&self, clock: &impl Clock) -> BillingPeriod {
        self.period_for_instant(clock.now())
    }

    /// The period immediately following the current one
    ///
    /// Only `None` if the clock reads a date in the final period of the
    /// calendar.
    pub fn next_period(&self, clock: &impl Clock) -> Option<BillingPeriod> {
        self.current_period(clock).next()
    }

    /// Counts the billing periods that overlap `[range_start, range_end]`
    ///
    /// Used to pro-rate a half-period retainer across an invoice window
    /// that does not line up with a single period. Returns 0 for an
    /// inverted range.
    pub fn count_overlapping_periods(&self, range_start: NaiveDate, range_end: NaiveDate) -> u32 {
        let count = self.walk_periods(range_start, range_end).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// The periods counted by [`count_overlapping_periods`](Self::count_overlapping_periods), in order
    pub fn periods_overlapping(&self, range_start: NaiveDate, range_end: NaiveDate) -> Vec<BillingPeriod> {
        self.walk_periods(range_start, range_end).collect()
    }

    /// Reconstructs a period's bounds from its stored key
    pub fn resolve_period_bounds(&self, key: &str) -> Result<DateRange, PeriodKeyError> {
        self.resolve_period(key).map(|p| p.range())
    }

    /// Reconstructs the full period from its stored key
    ///
    /// Any valid date resolves to its enclosing period; malformed keys are
    /// rejected rather than guessed at.
    pub fn resolve_period(&self, key: &str) -> Result<BillingPeriod, PeriodKeyError> {
        let invalid = || PeriodKeyError::InvalidKey { key: key.to_string() };

        // chrono accepts unpadded fields; keys are always zero padded
        let well_formed = key.len() == 10
            && key
                .bytes()
                .enumerate()
                .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
        if !well_formed {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(key, KEY_FORMAT).map_err(|_| invalid())?;
        Ok(self.period_for_date(date))
    }

    fn walk_periods(&self, range_start: NaiveDate, range_end: NaiveDate) -> PeriodWalk {
        if range_end < range_start {
            debug!(%range_start, %range_end, "Inverted range overlaps no billing periods");
        }
        PeriodWalk {
            cursor: Some(range_start),
            range_start,
            range_end,
        }
    }
}

/// Iterator over consecutive periods touching a date range
struct PeriodWalk {
    cursor: Option<NaiveDate>,
    range_start: NaiveDate,
    range_end: NaiveDate,
}

impl Iterator for PeriodWalk {
    type Item = BillingPeriod;

    fn next(&mut self) -> Option<BillingPeriod> {
        let cursor = self.cursor?;
        if cursor > self.range_end {
            self.cursor = None;
            return None;
        }

        let period = BillingPeriod::containing(cursor);
        self.cursor = period.end.succ_opt();

        // Every visited period contains a date in [range_start, range_end]
        debug_assert!(period.start <= self.range_end && period.end >= self.range_start);
        Some(period)
    }
}
