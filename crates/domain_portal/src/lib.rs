//! Portal Domain - who may do what, and the field work that gets billed
//!
//! # Roles
//!
//! - **Admin**: company administrator, every permission on every organization
//! - **Staff**: company employee, creates work orders, logs time, reports
//!   incidents and prepares invoices
//! - **Client**: member of one client organization, approves that
//!   organization's work orders and pays its invoices
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_portal::{Actor, WorkOrder, TimeEntry};
//!
//! let mut wo = WorkOrder::create(&staff, org, "Gala sound reinforcement", &clock)?;
//! wo.submit(&staff, &clock)?;
//! wo.approve(&client, &clock)?;
//! let entry = TimeEntry::log(&staff, &wo, date, dec!(6), "Load-in and line check", &clock)?;
//! ```

pub mod access;
pub mod work_order;
pub mod time_entry;
pub mod incident;
pub mod error;

pub use access::{authorize, can, AccessError, Actor, Permission, Role};
pub use work_order::{WorkOrder, WorkOrderStatus};
pub use time_entry::{billable_hours, TimeEntry};
pub use incident::{Incident, IncidentStatus, Severity};
pub use error::PortalError;
