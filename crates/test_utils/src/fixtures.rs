//! Pre-built Test Fixtures
//!
//! Ready-to-use, predictable test data shared by the portal test suites.

use chrono::NaiveDate;
use core_kernel::{FixedClock, Money, OrganizationId, UserId};
use domain_portal::Actor;
use rust_decimal_macros::dec;

/// Calendar fixtures around the January 2026 billing periods
pub struct DateFixtures;

impl DateFixtures {
    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or_else(|| panic!("invalid fixture date {}-{}-{}", year, month, day))
    }

    /// First day of the Jan 1-15, 2026 period
    pub fn first_half_start() -> NaiveDate {
        Self::ymd(2026, 1, 1)
    }

    /// Last day of the Jan 1-15, 2026 period
    pub fn first_half_end() -> NaiveDate {
        Self::ymd(2026, 1, 15)
    }

    /// First day of the Jan 16-31, 2026 period
    pub fn second_half_start() -> NaiveDate {
        Self::ymd(2026, 1, 16)
    }

    /// A day inside the second half of a leap-year February
    pub fn leap_february() -> NaiveDate {
        Self::ymd(2028, 2, 20)
    }
}

/// Clock fixtures
pub struct ClockFixtures;

impl ClockFixtures {
    /// Mid-way through the Jan 16-31, 2026 period
    pub fn mid_january() -> FixedClock {
        FixedClock::on_local_date(DateFixtures::ymd(2026, 1, 20))
    }

    /// Last day of a period, to exercise rollover
    pub fn end_of_january() -> FixedClock {
        FixedClock::on_local_date(DateFixtures::ymd(2026, 1, 31))
    }
}

/// One client organization with a user on each side
pub struct Tenant {
    pub organization_id: OrganizationId,
    pub admin: Actor,
    pub staff: Actor,
    pub client: Actor,
}

impl Tenant {
    pub fn new() -> Self {
        let organization_id = OrganizationId::new();
        Self {
            organization_id,
            admin: Actor::admin(UserId::new()),
            staff: Actor::staff(UserId::new()),
            client: Actor::client(UserId::new(), organization_id),
        }
    }
}

impl Default for Tenant {
    fn default() -> Self {
        Self::new()
    }
}

/// Money fixtures
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn hourly_rate() -> Money {
        Money::new(dec!(95.00))
    }

    pub fn monthly_retainer() -> Money {
        Money::new(dec!(2400.00))
    }
}
