//! Invoices, line items and discounts
//!
//! An invoice covers a billing window (normally one semi-monthly period),
//! is edited while in `Draft`, and is then sent to the client, who pays it.
//! Totals are recalculated on every edit:
//!
//! ```text
//! subtotal = sum(line.quantity * line.unit_price)   (each line in cents)
//! discount = min(discount(subtotal), subtotal)
//! total    = subtotal - discount
//! ```

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use core_kernel::{
    Clock, DateRange, InvoiceId, LineItemId, Money, OrganizationId, Rate, TemporalError, UserId,
    WorkOrderId,
};
use domain_portal::{authorize, Actor, Permission};

use crate::error::BillingError;
use crate::period::BillingPeriod;

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being prepared by staff; the only editable state
    Draft,
    /// Delivered to the client and awaiting payment
    Sent,
    Paid,
    /// Cancelled before payment
    Void,
}

/// What a line item charges for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    /// Technician hours
    Labor,
    /// Recurring per-period fee
    Retainer,
    /// Equipment rental
    Equipment,
    Travel,
    Other,
}

/// A single charge on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub kind: LineItemKind,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Money,
    /// Work order the charge came from, for labor lines
    pub work_order_id: Option<WorkOrderId>,
}

impl LineItem {
    pub fn new(
        kind: LineItemKind,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Money,
    ) -> Result<Self, BillingError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(BillingError::InvalidLineItem("description must not be empty".to_string()));
        }
        if quantity <= Decimal::ZERO {
            return Err(BillingError::InvalidLineItem(format!(
                "quantity must be positive, got {}",
                quantity
            )));
        }
        if unit_price.is_negative() {
            return Err(BillingError::InvalidLineItem(format!(
                "unit price must not be negative, got {}",
                unit_price
            )));
        }

        Ok(Self {
            id: LineItemId::new_v7(),
            kind,
            description,
            quantity,
            unit_price,
            work_order_id: None,
        })
    }

    pub fn for_work_order(mut self, work_order_id: WorkOrderId) -> Self {
        self.work_order_id = Some(work_order_id);
        self
    }

    /// Quantity times unit price, rounded to cents
    pub fn amount(&self) -> Money {
        (self.unit_price * self.quantity).round_to_cents()
    }
}

/// Invoice-level discount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage of the subtotal, 0 to 100
    Percentage(Decimal),
    /// Flat amount off the subtotal
    Fixed(Money),
}

impl Discount {
    pub fn validate(&self) -> Result<(), BillingError> {
        match self {
            Discount::Percentage(pct) if *pct < Decimal::ZERO || *pct > dec!(100) => Err(
                BillingError::InvalidDiscount(format!("percentage must be between 0 and 100, got {}", pct)),
            ),
            Discount::Fixed(amount) if amount.is_negative() => Err(BillingError::InvalidDiscount(
                format!("fixed discount must not be negative, got {}", amount),
            )),
            _ => Ok(()),
        }
    }

    /// Discount applied to `subtotal`, never more than the subtotal itself
    pub fn amount_for(&self, subtotal: Money) -> Money {
        let raw = match self {
            Discount::Percentage(pct) => Rate::from_percentage(*pct).apply(&subtotal),
            Discount::Fixed(amount) => amount.round_to_cents(),
        };
        raw.min(subtotal).non_negative()
    }
}

/// Human-facing invoice number, e.g. `INV-2026-0042`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    pub fn new(prefix: &str, year: i32, sequence: u32) -> Self {
        Self(format!("{}-{}-{:04}", prefix, year, sequence))
    }

    /// Numbers the invoice by the year it is issued in
    pub fn for_date(prefix: &str, issued_on: NaiveDate, sequence: u32) -> Self {
        Self::new(prefix, issued_on.year(), sequence)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An invoice to a client organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub number: InvoiceNumber,
    pub organization_id: OrganizationId,
    /// First day of the billed window, inclusive
    pub billing_start: NaiveDate,
    /// Last day of the billed window, inclusive
    pub billing_end: NaiveDate,
    pub items: Vec<LineItem>,
    pub discount: Option<Discount>,
    pub subtotal: Money,
    pub discount_total: Money,
    pub total: Money,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub sent_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
    pub paid_at: Option<DateTime<Utc>>,
    /// Reference from the payment provider
    pub payment_reference: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates an empty draft invoice for a billing window
    pub fn new(
        actor: &Actor,
        organization_id: OrganizationId,
        number: InvoiceNumber,
        window: DateRange,
        clock: &impl Clock,
    ) -> Result<Self, BillingError> {
        authorize(actor, Permission::ManageInvoices, organization_id)?;

        let now = clock.now();
        Ok(Self {
            id: InvoiceId::new_v7(),
            number,
            organization_id,
            billing_start: window.start,
            billing_end: window.end,
            items: Vec::new(),
            discount: None,
            subtotal: Money::zero(),
            discount_total: Money::zero(),
            total: Money::zero(),
            status: InvoiceStatus::Draft,
            notes: None,
            sent_on: None,
            due_on: None,
            paid_at: None,
            payment_reference: None,
            created_by: actor.user_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn billing_window(&self) -> DateRange {
        DateRange {
            start: self.billing_start,
            end: self.billing_end,
        }
    }

    /// The billing period key, if the window is exactly one period
    pub fn period_key(&self) -> Option<String> {
        let period = BillingPeriod::containing(self.billing_start);
        (period.end == self.billing_end).then_some(period.key)
    }

    pub fn add_item(&mut self, actor: &Actor, item: LineItem) -> Result<(), BillingError> {
        self.ensure_editable(actor)?;
        self.items.push(item);
        self.recalculate_totals();
        Ok(())
    }

    pub fn remove_item(&mut self, actor: &Actor, id: LineItemId) -> Result<Option<LineItem>, BillingError> {
        self.ensure_editable(actor)?;
        let removed = self
            .items
            .iter()
            .position(|item| item.id == id)
            .map(|index| self.items.remove(index));
        self.recalculate_totals();
        Ok(removed)
    }

    pub fn set_discount(&mut self, actor: &Actor, discount: Option<Discount>) -> Result<(), BillingError> {
        self.ensure_editable(actor)?;
        if let Some(d) = &discount {
            d.validate()?;
        }
        self.discount = discount;
        self.recalculate_totals();
        Ok(())
    }

    pub fn set_notes(&mut self, actor: &Actor, notes: impl Into<String>) -> Result<(), BillingError> {
        self.ensure_editable(actor)?;
        self.notes = Some(notes.into());
        Ok(())
    }

    /// Sends the invoice, starting the payment terms clock
    pub fn send(
        &mut self,
        actor: &Actor,
        payment_terms_days: u32,
        clock: &impl Clock,
    ) -> Result<(), BillingError> {
        authorize(actor, Permission::ManageInvoices, self.organization_id)?;
        self.ensure_status(InvoiceStatus::Draft, InvoiceStatus::Sent)?;
        if self.items.is_empty() {
            return Err(BillingError::EmptyInvoice(self.number.to_string()));
        }

        let sent_on = clock.today();
        let due_on = sent_on
            .checked_add_days(Days::new(u64::from(payment_terms_days)))
            .ok_or_else(|| TemporalError::InvalidDate(format!("{} + {} days", sent_on, payment_terms_days)))?;

        self.status = InvoiceStatus::Sent;
        self.sent_on = Some(sent_on);
        self.due_on = Some(due_on);
        self.updated_at = clock.now();

        info!(invoice = %self.number, total = %self.total, %due_on, "Invoice sent");
        Ok(())
    }

    /// Records the client's payment
    pub fn mark_paid(
        &mut self,
        actor: &Actor,
        payment_reference: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), BillingError> {
        authorize(actor, Permission::PayInvoice, self.organization_id)?;
        self.ensure_status(InvoiceStatus::Sent, InvoiceStatus::Paid)?;

        let now = clock.now();
        self.status = InvoiceStatus::Paid;
        self.paid_at = Some(now);
        self.payment_reference = payment_reference;
        self.updated_at = now;

        info!(invoice = %self.number, total = %self.total, "Invoice paid");
        Ok(())
    }

    pub fn void(&mut self, actor: &Actor, clock: &impl Clock) -> Result<(), BillingError> {
        authorize(actor, Permission::VoidInvoice, self.organization_id)?;
        if !matches!(self.status, InvoiceStatus::Draft | InvoiceStatus::Sent) {
            return Err(self.invalid_transition(InvoiceStatus::Void));
        }
        self.status = InvoiceStatus::Void;
        self.updated_at = clock.now();

        info!(invoice = %self.number, "Invoice voided");
        Ok(())
    }

    /// Sent, unpaid, and past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Sent && self.due_on.is_some_and(|due| today > due)
    }

    /// Amount the client still owes
    pub fn balance_due(&self) -> Money {
        match self.status {
            InvoiceStatus::Draft | InvoiceStatus::Sent => self.total,
            InvoiceStatus::Paid | InvoiceStatus::Void => Money::zero(),
        }
    }

    /// Sum of line amounts of one kind
    pub fn total_for(&self, kind: LineItemKind) -> Money {
        self.items
            .iter()
            .filter(|item| item.kind == kind)
            .map(LineItem::amount)
            .sum()
    }

    fn ensure_editable(&self, actor: &Actor) -> Result<(), BillingError> {
        authorize(actor, Permission::ManageInvoices, self.organization_id)?;
        if self.status != InvoiceStatus::Draft {
            return Err(BillingError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: "edited".to_string(),
            });
        }
        Ok(())
    }

    fn ensure_status(&self, expected: InvoiceStatus, target: InvoiceStatus) -> Result<(), BillingError> {
        if self.status != expected {
            return Err(self.invalid_transition(target));
        }
        Ok(())
    }

    fn invalid_transition(&self, target: InvoiceStatus) -> BillingError {
        BillingError::InvalidStatusTransition {
            from: format!("{:?}", self.status),
            to: format!("{:?}", target),
        }
    }

    fn recalculate_totals(&mut self) {
        self.subtotal = self.items.iter().map(LineItem::amount).sum();
        self.discount_total = self
            .discount
            .map(|d| d.amount_for(self.subtotal))
            .unwrap_or_default();
        self.total = (self.subtotal - self.discount_total).non_negative();
    }
}
