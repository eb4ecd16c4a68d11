//! Time logged by staff against work orders

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Clock, OrganizationId, TimeEntryId, UserId, WorkOrderId};

use crate::access::{authorize, Actor, Permission};
use crate::error::PortalError;
use crate::work_order::WorkOrder;

const MAX_HOURS_PER_ENTRY: Decimal = dec!(24);

/// Hours worked by one staff member on one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: TimeEntryId,
    pub work_order_id: WorkOrderId,
    /// Copied from the work order so invoicing can filter by tenant
    pub organization_id: OrganizationId,
    pub user_id: UserId,
    pub work_date: NaiveDate,
    pub hours: Decimal,
    pub description: String,
    pub billable: bool,
    pub logged_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Logs billable time against an approved or in-progress work order
    pub fn log(
        actor: &Actor,
        work_order: &WorkOrder,
        work_date: NaiveDate,
        hours: Decimal,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, PortalError> {
        authorize(actor, Permission::LogTime, work_order.organization_id)?;

        if !work_order.accepts_time() {
            return Err(PortalError::validation(format!(
                "Work order {} is {:?} and does not accept time",
                work_order.id, work_order.status
            )));
        }
        if hours <= Decimal::ZERO || hours > MAX_HOURS_PER_ENTRY {
            return Err(PortalError::validation(format!(
                "Hours must be greater than 0 and at most {}, got {}",
                MAX_HOURS_PER_ENTRY, hours
            )));
        }

        debug!(work_order = %work_order.id, %hours, %work_date, "Logging time");
        Ok(Self {
            id: TimeEntryId::new_v7(),
            work_order_id: work_order.id,
            organization_id: work_order.organization_id,
            user_id: actor.user_id,
            work_date,
            hours,
            description: description.into(),
            billable: true,
            logged_at: clock.now(),
        })
    }

    /// Marks the entry as internal, non-billable time
    pub fn non_billable(mut self) -> Self {
        self.billable = false;
        self
    }
}

/// Sums the billable hours among `entries`
pub fn billable_hours<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> Decimal {
    entries
        .into_iter()
        .filter(|e| e.billable)
        .map(|e| e.hours)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::FixedClock;

    fn approved_work_order(actor: &Actor, clock: &FixedClock) -> WorkOrder {
        let mut wo = WorkOrder::create(actor, OrganizationId::new(), "Conference AV", clock).unwrap();
        wo.submit(actor, clock).unwrap();
        wo.approve(actor, clock).unwrap();
        wo
    }

    #[test]
    fn test_log_rejects_zero_and_excess_hours() {
        let admin = Actor::admin(UserId::new());
        let clock = FixedClock::on_local_date(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        let wo = approved_work_order(&admin, &clock);
        let date = clock.today();

        assert!(TimeEntry::log(&admin, &wo, date, dec!(0), "none", &clock).is_err());
        assert!(TimeEntry::log(&admin, &wo, date, dec!(24.25), "too much", &clock).is_err());
        assert!(TimeEntry::log(&admin, &wo, date, dec!(24), "double shift", &clock).is_ok());
    }

    #[test]
    fn test_client_cannot_log_time() {
        let admin = Actor::admin(UserId::new());
        let clock = FixedClock::on_local_date(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        let wo = approved_work_order(&admin, &clock);
        let client = Actor::client(UserId::new(), wo.organization_id);

        let result = TimeEntry::log(&client, &wo, clock.today(), dec!(2), "setup", &clock);
        assert!(matches!(result, Err(PortalError::Forbidden(_))));
    }

    #[test]
    fn test_billable_hours_skips_internal_time() {
        let admin = Actor::admin(UserId::new());
        let clock = FixedClock::on_local_date(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        let wo = approved_work_order(&admin, &clock);
        let date = clock.today();

        let entries = vec![
            TimeEntry::log(&admin, &wo, date, dec!(3.5), "rigging", &clock).unwrap(),
            TimeEntry::log(&admin, &wo, date, dec!(1), "travel", &clock).unwrap().non_billable(),
        ];
        assert_eq!(billable_hours(&entries), dec!(3.5));
    }
}
