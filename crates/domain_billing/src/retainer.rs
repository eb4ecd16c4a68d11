//! Retainer pro-ration
//!
//! A retainer is quoted per month but charged per semi-monthly billing
//! period at half the monthly rate. An invoice window that spans several
//! periods (or only part of one) is charged once per period it touches.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{DateRange, Money, OrganizationId};

use crate::error::BillingError;
use crate::invoice::{LineItem, LineItemKind};
use crate::period::BillingPeriodCalculator;

/// A client's recurring monthly fee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retainer {
    pub organization_id: OrganizationId,
    pub monthly_amount: Money,
    /// Shown on the invoice line, e.g. "Support retainer"
    pub description: String,
}

impl Retainer {
    pub fn new(organization_id: OrganizationId, monthly_amount: Money) -> Result<Self, BillingError> {
        if !monthly_amount.is_positive() {
            return Err(BillingError::InvalidLineItem(format!(
                "retainer amount must be positive, got {}",
                monthly_amount
            )));
        }
        Ok(Self {
            organization_id,
            monthly_amount,
            description: "Retainer".to_string(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Charge for one semi-monthly period
    pub fn half_period_amount(&self) -> Money {
        (self.monthly_amount * dec!(0.5)).round_to_cents()
    }

    /// The retainer line for an invoice window, or `None` if the window
    /// touches no billing period
    pub fn line_item_for(
        &self,
        calculator: &BillingPeriodCalculator,
        window: DateRange,
    ) -> Result<Option<LineItem>, BillingError> {
        let periods = calculator.periods_overlapping(window.start, window.end);
        let (first, last) = match (periods.first(), periods.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(None),
        };

        let count = periods.len();
        let description = if count == 1 {
            format!("{} ({})", self.description, first.label)
        } else {
            format!(
                "{} ({} billing periods, {} through {})",
                self.description, count, first.label, last.label
            )
        };
        debug!(organization = %self.organization_id, periods = count, "Pro-rating retainer");

        let line = LineItem::new(
            LineItemKind::Retainer,
            description,
            Decimal::from(count),
            self.half_period_amount(),
        )?;
        Ok(Some(line))
    }
}
