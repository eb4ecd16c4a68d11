//! Unit tests for the Money module
//!
//! Tests cover creation, arithmetic, rounding, rates and edge cases.

use core_kernel::{Money, MoneyError, Rate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789));
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(-1999).amount(), dec!(-19.99));
    }

    #[test]
    fn test_default_is_zero() {
        assert!(Money::default().is_zero());
        assert!(!Money::default().is_positive());
        assert!(!Money::default().is_negative());
    }

    #[test]
    fn test_serializes_as_bare_decimal() {
        let json = serde_json::to_string(&Money::new(dec!(12.5))).unwrap();
        assert_eq!(json, "\"12.5\"");
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_and_sub() {
        let a = Money::new(dec!(10.25));
        let b = Money::new(dec!(0.75));
        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(11.00));
        assert_eq!(a.checked_sub(&b).unwrap().amount(), dec!(9.50));
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max.checked_add(&max), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_multiply_by_hours() {
        let rate = Money::new(dec!(95));
        assert_eq!((rate * dec!(7.25)).amount(), dec!(688.75));
    }

    #[test]
    fn test_min_and_non_negative() {
        let a = Money::new(dec!(5));
        let b = Money::new(dec!(-3));
        assert_eq!(a.min(b), b);
        assert_eq!(b.non_negative(), Money::zero());
        assert_eq!(a.non_negative(), a);
    }

    #[test]
    fn test_sum_of_references() {
        let items = [Money::from_cents(150), Money::from_cents(250), Money::from_cents(-100)];
        let total: Money = items.iter().sum();
        assert_eq!(total, Money::from_cents(300));
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_percentage_roundtrip() {
        let rate = Rate::from_percentage(dec!(12.5));
        assert_eq!(rate.as_decimal(), dec!(0.125));
        assert_eq!(rate.as_percentage(), dec!(12.5));
        assert_eq!(rate.to_string(), "12.5%");
    }

    #[test]
    fn test_apply_rounds_half_away_from_zero() {
        // 12.5% of 0.20 is 0.025
        let rate = Rate::from_percentage(dec!(12.5));
        assert_eq!(rate.apply(&Money::new(dec!(0.20))).amount(), dec!(0.03));
    }
}

proptest! {
    #[test]
    fn cents_rounding_is_idempotent(cents in -10_000_000i64..10_000_000i64, extra in 0i64..100) {
        let m = Money::new(Decimal::new(cents * 100 + extra, 4));
        let once = m.round_to_cents();
        prop_assert_eq!(once.round_to_cents(), once);
        prop_assert!((once.amount() - m.amount()).abs() <= dec!(0.005));
    }
}
