//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than a bare `assert!`.

use chrono::{Datelike, NaiveDate};
use core_kernel::Money;
use domain_billing::{BillingPeriod, Invoice};
use rust_decimal::Decimal;

/// Asserts the structural invariants every billing period must satisfy
///
/// # Panics
///
/// Panics if the period does not start on the 1st or 16th, does not end on
/// the 15th or the last day of its month, or has an inconsistent key/label.
pub fn assert_valid_period(period: &BillingPeriod) {
    assert!(
        period.start <= period.end,
        "Period {} starts after it ends",
        period.key
    );
    assert!(
        matches!(period.start.day(), 1 | 16),
        "Period {} starts on day {}",
        period.key,
        period.start.day()
    );
    let ends_month = period.end.succ_opt().map_or(true, |d| d.day() == 1);
    assert!(
        period.end.day() == 15 || ends_month,
        "Period {} ends on day {}",
        period.key,
        period.end.day()
    );
    assert_eq!(
        period.key,
        period.start.format("%Y-%m-%d").to_string(),
        "Period key does not match its start"
    );
    assert!(
        period.label.ends_with(&format!(", {}", period.start.year())),
        "Period label {:?} is missing the year",
        period.label
    );
}

/// Asserts that `date` falls inside `period`
pub fn assert_period_contains(period: &BillingPeriod, date: NaiveDate) {
    assert!(
        period.contains(date),
        "Expected {} to contain {}, but it covers {} to {}",
        period.label,
        date,
        period.start,
        period.end
    );
}

/// Asserts a money amount to the cent
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.round_to_cents().amount(),
        expected,
        "Expected {}, got {}",
        expected,
        actual
    );
}

/// Asserts that an invoice's stored totals agree with its lines and discount
pub fn assert_totals_consistent(invoice: &Invoice) {
    let subtotal: Money = invoice.items.iter().map(|item| item.amount()).sum();
    assert_eq!(invoice.subtotal, subtotal, "Stale subtotal on {}", invoice.number);
    assert_eq!(
        invoice.total,
        (invoice.subtotal - invoice.discount_total).non_negative(),
        "Total does not equal subtotal minus discount on {}",
        invoice.number
    );
    assert!(
        invoice.discount_total <= invoice.subtotal,
        "Discount exceeds subtotal on {}",
        invoice.number
    );
}
