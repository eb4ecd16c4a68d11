//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! client portal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built dates, actors, clocks and money
//! - `builders`: Builder patterns for work orders and invoices
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
