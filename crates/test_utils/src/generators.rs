//! Property-Based Test Generators
//!
//! Provides proptest strategies for dates, instants, ranges and amounts.

use chrono::{DateTime, Days, Duration, NaiveDate, TimeZone, Utc};
use core_kernel::{DateRange, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Strategy for calendar dates between 1990 and roughly 2099
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..40_000u64).prop_map(|offset| epoch() + Days::new(offset))
}

/// Strategy for dates that fall on a month boundary (last day or first day)
pub fn month_boundary_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2100i32, 1u32..=12u32, any::<bool>()).prop_map(|(year, month, first)| {
        let first_of_month = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
        if first {
            first_of_month
        } else {
            first_of_month.pred_opt().unwrap_or(first_of_month)
        }
    })
}

/// Strategy for UTC instants, to the second
pub fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..3_400_000_000i64).prop_map(|secs| {
        Utc.timestamp_opt(631_152_000, 0).single().unwrap_or_default() + Duration::seconds(secs)
    })
}

/// Strategy for valid inclusive ranges of up to two years
pub fn date_range_strategy() -> impl Strategy<Value = DateRange> {
    (date_strategy(), 0u64..730u64).prop_map(|(start, len)| DateRange {
        start,
        end: start + Days::new(len),
    })
}

/// Strategy for positive amounts in cents
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (1i64..10_000_000i64).prop_map(Money::from_cents)
}

/// Strategy for discount percentages, 0.00 to 100.00
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|n| Decimal::new(i64::from(n), 2))
}
