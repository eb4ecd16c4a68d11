//! Test Data Builders
//!
//! Builders that take a tenant through the steps needed before the part
//! under test, so tests only spell out what they care about.

use chrono::NaiveDate;
use core_kernel::{DateRange, FixedClock, Money};
use domain_billing::{Invoice, InvoiceNumber, LineItem, LineItemKind};
use domain_portal::{TimeEntry, WorkOrder};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{ClockFixtures, DateFixtures, Tenant};

/// Builds a work order that has reached the approved state
pub struct ApprovedWorkOrderBuilder<'a> {
    tenant: &'a Tenant,
    title: String,
    clock: FixedClock,
}

impl<'a> ApprovedWorkOrderBuilder<'a> {
    pub fn new(tenant: &'a Tenant) -> Self {
        Self {
            tenant,
            title: "Annual meeting AV".to_string(),
            clock: ClockFixtures::mid_january(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_clock(mut self, clock: FixedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> WorkOrder {
        let t = self.tenant;
        let mut wo = WorkOrder::create(&t.staff, t.organization_id, self.title, &self.clock)
            .expect("staff can create work orders");
        wo.submit(&t.staff, &self.clock).expect("draft can be submitted");
        wo.approve(&t.client, &self.clock).expect("client can approve");
        wo
    }
}

/// Logs a billable entry by the tenant's staff user
pub fn log_hours(tenant: &Tenant, work_order: &WorkOrder, date: NaiveDate, hours: Decimal) -> TimeEntry {
    TimeEntry::log(
        &tenant.staff,
        work_order,
        date,
        hours,
        "On-site technician",
        &ClockFixtures::mid_january(),
    )
    .expect("staff can log time on approved work")
}

/// Builds draft invoices for a tenant
pub struct TestInvoiceBuilder<'a> {
    tenant: &'a Tenant,
    window: DateRange,
    items: Vec<LineItem>,
    sequence: u32,
}

impl<'a> TestInvoiceBuilder<'a> {
    pub fn new(tenant: &'a Tenant) -> Self {
        Self {
            tenant,
            window: DateRange {
                start: DateFixtures::first_half_start(),
                end: DateFixtures::first_half_end(),
            },
            items: Vec::new(),
            sequence: 1,
        }
    }

    pub fn with_window(mut self, window: DateRange) -> Self {
        self.window = window;
        self
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    /// Adds a single equipment charge
    pub fn with_charge(mut self, amount: Decimal) -> Self {
        let item = LineItem::new(LineItemKind::Equipment, "Equipment rental", dec!(1), Money::new(amount))
            .expect("valid test line item");
        self.items.push(item);
        self
    }

    pub fn build(self) -> Invoice {
        let clock = ClockFixtures::mid_january();
        let number = InvoiceNumber::new("TEST", 2026, self.sequence);
        let mut invoice = Invoice::new(&self.tenant.staff, self.tenant.organization_id, number, self.window, &clock)
            .expect("staff can create invoices");
        for item in self.items {
            invoice.add_item(&self.tenant.staff, item).expect("draft accepts items");
        }
        invoice
    }
}
