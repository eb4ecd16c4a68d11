//! Operator tooling for the billing domain
//!
//! Backs the `portal-billing` binary, which lets staff check which billing
//! period a date falls in, resolve stored period keys and preview retainer
//! pro-ration without going through the portal.

pub mod commands;

pub use commands::{run, Command, PeriodView, Report};
