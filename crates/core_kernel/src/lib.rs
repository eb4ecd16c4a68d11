//! Core Kernel - Foundational types for the A/V client portal
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Money in USD with precise decimal arithmetic
//! - Business-timezone handling and injectable clocks
//! - Strongly-typed identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, MoneyError, Rate};
pub use temporal::{
    BusinessTimezone, Clock, DateRange, FixedClock, SystemClock, TemporalError,
    BUSINESS_TIMEZONE,
};
pub use identifiers::{
    OrganizationId, UserId, WorkOrderId, TimeEntryId, IncidentId,
    InvoiceId, LineItemId,
};
