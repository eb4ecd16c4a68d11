//! Billing Domain - semi-monthly periods and client invoicing
//!
//! # Billing periods
//!
//! Every month is split into two billing periods, the 1st to the 15th and
//! the 16th to the last day. Periods are derived from dates in the fixed
//! business timezone and identified by the `YYYY-MM-DD` of their start.
//!
//! # Invoicing
//!
//! An invoice bills one organization for a window of dates. Labor lines come
//! from billable time entries; a monthly retainer is charged at half its
//! monthly rate for each billing period the window overlaps.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{BillingConfig, InvoiceDraft, InvoiceNumber, Retainer};
//!
//! let invoice = InvoiceDraft::for_current_period(org, &config, &clock)
//!     .add_time_entries(&entries)?
//!     .add_retainer(&retainer)?
//!     .build(&staff, InvoiceNumber::new("INV", 2026, 1), &clock)?;
//! ```

pub mod period;
pub mod invoice;
pub mod retainer;
pub mod draft;
pub mod config;
pub mod error;

pub use period::{BillingPeriod, BillingPeriodCalculator, PeriodHalf, PeriodKeyError};
pub use invoice::{Discount, Invoice, InvoiceNumber, InvoiceStatus, LineItem, LineItemKind};
pub use retainer::Retainer;
pub use draft::InvoiceDraft;
pub use config::BillingConfig;
pub use error::BillingError;
