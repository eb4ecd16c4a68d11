//! End-to-end portal workflows
//!
//! These tests take a client organization from work order approval through
//! time logging to a sent and paid invoice, crossing the portal and billing
//! crates.

use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::{Clock, DateRange, Money};
use domain_billing::{
    BillingConfig, BillingPeriodCalculator, Discount, InvoiceDraft, InvoiceNumber, InvoiceStatus,
    Retainer,
};
use domain_portal::{Incident, Severity, WorkOrderStatus};
use test_utils::*;

mod billing_cycle {
    use super::*;

    #[test]
    fn test_work_order_to_paid_invoice() {
        let tenant = Tenant::new();
        let clock = ClockFixtures::end_of_january();
        let config = BillingConfig::default();

        let mut work_order = ApprovedWorkOrderBuilder::new(&tenant)
            .with_title("Product launch livestream")
            .build();
        work_order.start(&tenant.staff, &clock).unwrap();

        let entries = vec![
            log_hours(&tenant, &work_order, DateFixtures::ymd(2026, 1, 22), dec!(8)),
            log_hours(&tenant, &work_order, DateFixtures::ymd(2026, 1, 23), dec!(5.5)),
        ];
        work_order.complete(&tenant.staff, &clock).unwrap();
        assert_eq!(work_order.status, WorkOrderStatus::Completed);

        let retainer = Retainer::new(tenant.organization_id, MoneyFixtures::monthly_retainer()).unwrap();
        let mut invoice = InvoiceDraft::for_current_period(tenant.organization_id, &config, &clock)
            .add_time_entries(&entries)
            .unwrap()
            .add_retainer(&retainer)
            .unwrap()
            .with_discount(Discount::Fixed(Money::new(dec!(50))))
            .unwrap()
            .build(&tenant.staff, InvoiceNumber::for_date(&config.invoice_prefix, clock.today(), 12), &clock)
            .unwrap();

        // 13.5h x $95 + one half-month of a $2400 retainer - $50
        assert_money_eq(&invoice.subtotal, dec!(2482.50));
        assert_money_eq(&invoice.total, dec!(2432.50));
        assert_totals_consistent(&invoice);
        assert_eq!(invoice.number.as_str(), "INV-2026-0012");

        invoice.send(&tenant.staff, config.payment_terms_days, &clock).unwrap();
        invoice.mark_paid(&tenant.client, Some("ch_1001".to_string()), &clock).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_invoice_from_stored_period_key() {
        let tenant = Tenant::new();
        let clock = ClockFixtures::mid_january();
        let invoice = TestInvoiceBuilder::new(&tenant).with_charge(dec!(300)).build();

        let key = invoice.period_key().unwrap();
        let bounds = BillingPeriodCalculator::new().resolve_period_bounds(&key).unwrap();
        assert_eq!(bounds, invoice.billing_window());

        let redraft = InvoiceDraft::for_period_key(tenant.organization_id, &key, &BillingConfig::default())
            .unwrap()
            .build(&tenant.staff, InvoiceNumber::new("INV", 2026, 2), &clock)
            .unwrap();
        assert_eq!(redraft.billing_window(), invoice.billing_window());
    }

    #[test]
    fn test_sent_invoice_survives_serialization() {
        let tenant = Tenant::new();
        let clock = ClockFixtures::mid_january();
        let mut invoice = TestInvoiceBuilder::new(&tenant).with_charge(dec!(450)).build();
        invoice.set_discount(&tenant.staff, Some(Discount::Percentage(dec!(10)))).unwrap();
        invoice.send(&tenant.staff, 30, &clock).unwrap();

        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["billing_start"], "2026-01-01");
        assert_eq!(json["billing_end"], "2026-01-15");
        assert_eq!(json["status"], serde_json::to_value(InvoiceStatus::Sent).unwrap());

        let restored: domain_billing::Invoice = serde_json::from_value(json).unwrap();
        assert_eq!(restored.number, invoice.number);
        assert_eq!(restored.items, invoice.items);
        assert_eq!(restored.discount, invoice.discount);
        assert_eq!(restored.total, invoice.total);
        assert_eq!(restored.due_on, invoice.due_on);
        assert_eq!(restored.period_key().as_deref(), Some("2026-01-01"));
    }

    #[test]
    fn test_incident_on_work_order() {
        let tenant = Tenant::new();
        let clock = ClockFixtures::mid_january();
        let work_order = ApprovedWorkOrderBuilder::new(&tenant).build();

        let incident = Incident::report(
            &tenant.staff,
            tenant.organization_id,
            Severity::Critical,
            "Rigging point failed inspection",
            &clock,
        )
        .unwrap()
        .for_work_order(work_order.id);

        assert_eq!(incident.work_order_id, Some(work_order.id));
        assert!(Incident::report(&tenant.client, tenant.organization_id, Severity::Low, "Noise", &clock).is_err());
    }
}

mod properties {
    use super::*;

    proptest! {
        #[test]
        fn every_period_is_well_formed(d in date_strategy()) {
            let period = BillingPeriodCalculator::new().period_for_date(d);
            assert_valid_period(&period);
            assert_period_contains(&period, d);
        }

        #[test]
        fn month_boundaries_split_periods(d in month_boundary_strategy()) {
            let period = BillingPeriodCalculator::new().period_for_date(d);
            assert_valid_period(&period);
            prop_assert!(period.start == d || period.end == d);
        }

        #[test]
        fn instants_resolve_to_local_date(instant in instant_strategy()) {
            let calc = BillingPeriodCalculator::new();
            let period = calc.period_for_instant(instant);
            assert_period_contains(&period, calc.timezone().local_date(instant));
        }

        #[test]
        fn retainer_charge_scales_with_periods(range in date_range_strategy(), monthly in positive_money_strategy()) {
            let calc = BillingPeriodCalculator::new();
            let retainer = Retainer::new(Tenant::new().organization_id, monthly).unwrap();
            let line = retainer.line_item_for(&calc, range).unwrap().unwrap();
            let count = calc.count_overlapping_periods(range.start, range.end);
            prop_assert_eq!(line.quantity, rust_decimal::Decimal::from(count));
            prop_assert_eq!(line.amount(), (retainer.half_period_amount() * line.quantity).round_to_cents());
        }

        #[test]
        fn discounted_totals_stay_consistent(
            charge in positive_money_strategy(),
            pct in percentage_strategy(),
        ) {
            let tenant = Tenant::new();
            let mut invoice = TestInvoiceBuilder::new(&tenant).with_charge(charge.amount()).build();
            invoice.set_discount(&tenant.staff, Some(Discount::Percentage(pct))).unwrap();
            assert_totals_consistent(&invoice);
            prop_assert!(!invoice.total.is_negative());
        }

        #[test]
        fn custom_windows_cover_whole_periods(range in date_range_strategy()) {
            let calc = BillingPeriodCalculator::new();
            let periods = calc.periods_overlapping(range.start, range.end);
            let covered = DateRange {
                start: periods[0].start,
                end: periods[periods.len() - 1].end,
            };
            prop_assert!(covered.start <= range.start && covered.end >= range.end);
        }
    }
}
