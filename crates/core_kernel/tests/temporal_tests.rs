//! Unit tests for the temporal module
//!
//! Tests cover the business timezone, clocks and inclusive date ranges.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use core_kernel::{BusinessTimezone, Clock, DateRange, FixedClock, SystemClock, TemporalError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod business_timezone {
    use super::*;

    #[test]
    fn test_default_is_new_york() {
        assert_eq!(BusinessTimezone::default().name(), "America/New_York");
    }

    #[test]
    fn test_start_of_day_in_winter_and_summer() {
        let tz = BusinessTimezone::default();
        assert_eq!(
            tz.start_of_day(date(2026, 1, 16)).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 16, 5, 0, 0).unwrap()
        );
        assert_eq!(
            tz.start_of_day(date(2026, 7, 16)).unwrap(),
            Utc.with_ymd_and_hms(2026, 7, 16, 4, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_local_date_on_dst_change() {
        // 2026-03-08 is the spring-forward day; 06:59 UTC is 01:59 EST
        let tz = BusinessTimezone::default();
        let instant = Utc.with_ymd_and_hms(2026, 3, 8, 6, 59, 0).unwrap();
        assert_eq!(tz.local_date(instant), date(2026, 3, 8));
    }

    #[test]
    fn test_rejects_unknown_zone_name() {
        let result: Result<BusinessTimezone, _> = serde_json::from_str("\"Mars/Olympus\"");
        assert!(result.is_err());
    }
}

mod clocks {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 23, 0, 0).unwrap();
        let mut clock = FixedClock::new(start);
        clock.advance(Duration::hours(6));
        assert_eq!(clock.now(), start + Duration::hours(6));
        // 05:00 UTC on the 16th is local midnight
        assert_eq!(clock.today(), date(2026, 1, 16));
    }

    #[test]
    fn test_clock_through_reference() {
        let clock = FixedClock::on_local_date(date(2026, 5, 1));
        let by_ref: &dyn Clock = &clock;
        assert_eq!(by_ref.today(), date(2026, 5, 1));
    }

    #[test]
    fn test_system_clock_is_recent() {
        let now = SystemClock.now();
        assert!(now > Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }
}

mod date_range {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(date(2026, 1, 1), date(2026, 1, 15)).unwrap();
        assert!(range.contains(date(2026, 1, 1)));
        assert!(range.contains(date(2026, 1, 15)));
        assert!(!range.contains(date(2026, 1, 16)));
    }

    #[test]
    fn test_overlaps_touching_ranges() {
        let a = DateRange::new(date(2026, 1, 1), date(2026, 1, 15)).unwrap();
        let b = DateRange::new(date(2026, 1, 15), date(2026, 1, 31)).unwrap();
        let c = DateRange::new(date(2026, 1, 16), date(2026, 1, 31)).unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_inverted_range_error_message() {
        let err = DateRange::new(date(2026, 1, 31), date(2026, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            TemporalError::InvalidRange {
                start: "2026-01-31".to_string(),
                end: "2026-01-01".to_string(),
            }
        );
        assert!(err.to_string().contains("must not be after"));
    }
}
