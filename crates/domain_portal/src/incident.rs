//! Incident reports
//!
//! Staff report problems encountered on site (equipment failure, venue
//! issues, injuries). Critical incidents are surfaced in the logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use core_kernel::{Clock, IncidentId, OrganizationId, UserId, WorkOrderId};

use crate::access::{authorize, Actor, Permission};
use crate::error::PortalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Open,
    Acknowledged,
    Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    pub organization_id: OrganizationId,
    pub work_order_id: Option<WorkOrderId>,
    pub reported_by: UserId,
    pub severity: Severity,
    pub summary: String,
    pub status: IncidentStatus,
    pub resolution: Option<String>,
    pub reported_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Incident {
    pub fn report(
        actor: &Actor,
        organization_id: OrganizationId,
        severity: Severity,
        summary: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, PortalError> {
        authorize(actor, Permission::ReportIncident, organization_id)?;

        let summary = summary.into();
        if summary.trim().is_empty() {
            return Err(PortalError::validation("Incident summary must not be empty"));
        }

        let incident = Self {
            id: IncidentId::new_v7(),
            organization_id,
            work_order_id: None,
            reported_by: actor.user_id,
            severity,
            summary,
            status: IncidentStatus::Open,
            resolution: None,
            reported_at: clock.now(),
            resolved_at: None,
        };

        if severity == Severity::Critical {
            warn!(incident = %incident.id, organization = %organization_id, "Critical incident reported");
        } else {
            info!(incident = %incident.id, ?severity, "Incident reported");
        }
        Ok(incident)
    }

    /// Links the incident to the work order it happened on
    pub fn for_work_order(mut self, work_order_id: WorkOrderId) -> Self {
        self.work_order_id = Some(work_order_id);
        self
    }

    pub fn acknowledge(&mut self, actor: &Actor) -> Result<(), PortalError> {
        authorize(actor, Permission::ReportIncident, self.organization_id)?;
        if self.status != IncidentStatus::Open {
            return Err(self.invalid_transition(IncidentStatus::Acknowledged));
        }
        self.status = IncidentStatus::Acknowledged;
        Ok(())
    }

    pub fn resolve(
        &mut self,
        actor: &Actor,
        resolution: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), PortalError> {
        authorize(actor, Permission::ReportIncident, self.organization_id)?;
        if self.status == IncidentStatus::Resolved {
            return Err(self.invalid_transition(IncidentStatus::Resolved));
        }
        self.status = IncidentStatus::Resolved;
        self.resolution = Some(resolution.into());
        self.resolved_at = Some(clock.now());
        Ok(())
    }

    fn invalid_transition(&self, to: IncidentStatus) -> PortalError {
        PortalError::InvalidStatusTransition {
            from: format!("{:?}", self.status),
            to: format!("{:?}", to),
        }
    }
}
