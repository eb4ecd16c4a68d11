//! Billing domain errors

use thiserror::Error;

use core_kernel::{MoneyError, TemporalError};
use domain_portal::AccessError;

use crate::period::PeriodKeyError;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    #[error(transparent)]
    InvalidPeriodKey(#[from] PeriodKeyError),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Forbidden(#[from] AccessError),

    /// Invoice status does not allow the operation
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Invoice {0} has no line items")]
    EmptyInvoice(String),

    #[error("Invalid line item: {0}")]
    InvalidLineItem(String),

    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),

    /// A record from another tenant was offered to this invoice
    #[error("Organization mismatch: {0}")]
    OrganizationMismatch(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}
