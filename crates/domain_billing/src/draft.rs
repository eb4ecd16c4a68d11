//! Invoice drafting
//!
//! Collects the charges for one organization and one billing window, then
//! produces a draft [`Invoice`]. The window defaults to the current billing
//! period; a stored period key or an arbitrary date range may be used
//! instead, in which case retainers are pro-rated across every period the
//! window touches.

use chrono::NaiveDate;
use tracing::{debug, instrument};

use core_kernel::{Clock, DateRange, Money, OrganizationId};
use domain_portal::{Actor, TimeEntry};

use crate::config::BillingConfig;
use crate::error::BillingError;
use crate::invoice::{Discount, Invoice, InvoiceNumber, LineItem, LineItemKind};
use crate::period::BillingPeriodCalculator;
use crate::retainer::Retainer;

/// Builder for a draft invoice
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    calculator: BillingPeriodCalculator,
    organization_id: OrganizationId,
    window: DateRange,
    hourly_rate: Money,
    items: Vec<LineItem>,
    discount: Option<Discount>,
    notes: Option<String>,
}

impl InvoiceDraft {
    /// Drafts an invoice for an explicit window
    pub fn new(organization_id: OrganizationId, window: DateRange, config: &BillingConfig) -> Self {
        Self {
            calculator: BillingPeriodCalculator::new(),
            organization_id,
            window,
            hourly_rate: Money::new(config.default_hourly_rate),
            items: Vec::new(),
            discount: None,
            notes: None,
        }
    }

    /// Drafts an invoice for the billing period `clock` is in
    pub fn for_current_period(
        organization_id: OrganizationId,
        config: &BillingConfig,
        clock: &impl Clock,
    ) -> Self {
        let period = BillingPeriodCalculator::new().current_period(clock);
        Self::new(organization_id, period.range(), config)
    }

    /// Drafts an invoice for an arbitrary inclusive date range
    pub fn for_range(
        organization_id: OrganizationId,
        start: NaiveDate,
        end: NaiveDate,
        config: &BillingConfig,
    ) -> Result<Self, BillingError> {
        let window = DateRange::new(start, end)?;
        Ok(Self::new(organization_id, window, config))
    }

    /// Drafts an invoice for a stored period key such as `2026-01-16`
    pub fn for_period_key(
        organization_id: OrganizationId,
        key: &str,
        config: &BillingConfig,
    ) -> Result<Self, BillingError> {
        let window = BillingPeriodCalculator::new().resolve_period_bounds(key)?;
        Ok(Self::new(organization_id, window, config))
    }

    pub fn window(&self) -> DateRange {
        self.window
    }

    /// Overrides the configured labor rate, e.g. for a negotiated contract
    pub fn with_hourly_rate(mut self, rate: Money) -> Result<Self, BillingError> {
        if !rate.is_positive() {
            return Err(BillingError::InvalidLineItem(format!("hourly rate must be positive, got {}", rate)));
        }
        self.hourly_rate = rate;
        Ok(self)
    }

    /// Adds a labor line per billable entry worked inside the window
    ///
    /// Non-billable entries and entries outside the window are skipped; an
    /// entry belonging to another organization is an error.
    pub fn add_time_entries<'a>(
        mut self,
        entries: impl IntoIterator<Item = &'a TimeEntry>,
    ) -> Result<Self, BillingError> {
        for entry in entries {
            if entry.organization_id != self.organization_id {
                return Err(BillingError::OrganizationMismatch(format!(
                    "time entry {} belongs to {}, invoice is for {}",
                    entry.id, entry.organization_id, self.organization_id
                )));
            }
            if !entry.billable || !self.window.contains(entry.work_date) {
                debug!(entry = %entry.id, billable = entry.billable, "Skipping time entry");
                continue;
            }

            let description = format!("{} - {}", entry.work_date.format("%b %-d"), entry.description);
            let line = LineItem::new(LineItemKind::Labor, description, entry.hours, self.hourly_rate)?
                .for_work_order(entry.work_order_id);
            self.items.push(line);
        }
        Ok(self)
    }

    /// Adds the pro-rated retainer charge for the window
    pub fn add_retainer(mut self, retainer: &Retainer) -> Result<Self, BillingError> {
        if retainer.organization_id != self.organization_id {
            return Err(BillingError::OrganizationMismatch(format!(
                "retainer belongs to {}, invoice is for {}",
                retainer.organization_id, self.organization_id
            )));
        }
        if let Some(line) = retainer.line_item_for(&self.calculator, self.window)? {
            self.items.push(line);
        }
        Ok(self)
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_discount(mut self, discount: Discount) -> Result<Self, BillingError> {
        discount.validate()?;
        self.discount = Some(discount);
        Ok(self)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Creates the draft invoice
    #[instrument(skip_all, fields(organization = %self.organization_id, number = %number))]
    pub fn build(
        self,
        actor: &Actor,
        number: InvoiceNumber,
        clock: &impl Clock,
    ) -> Result<Invoice, BillingError> {
        let mut invoice = Invoice::new(actor, self.organization_id, number, self.window, clock)?;
        for item in self.items {
            invoice.add_item(actor, item)?;
        }
        invoice.set_discount(actor, self.discount)?;
        if let Some(notes) = self.notes {
            invoice.set_notes(actor, notes)?;
        }

        debug!(lines = invoice.items.len(), total = %invoice.total, "Drafted invoice");
        Ok(invoice)
    }
}
