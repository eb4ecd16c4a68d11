//! Work orders
//!
//! Staff draft a work order for a client organization and submit it; a
//! client user (or an admin) approves or rejects it. Time can only be logged
//! against approved or in-progress work.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{Clock, Money, OrganizationId, UserId, WorkOrderId};

use crate::access::{authorize, Actor, Permission};
use crate::error::PortalError;

/// Work order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    /// Being written up by staff
    Draft,
    /// Waiting on the client
    PendingApproval,
    Approved,
    InProgress,
    Completed,
    /// Declined by the client
    Rejected,
    Cancelled,
}

impl WorkOrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkOrderStatus::Completed | WorkOrderStatus::Rejected | WorkOrderStatus::Cancelled
        )
    }
}

/// A unit of A/V work requested for a client organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: WorkOrderId,
    pub organization_id: OrganizationId,
    pub title: String,
    pub description: Option<String>,
    /// Date the work is booked for, if scheduled
    pub scheduled_for: Option<NaiveDate>,
    /// Quoted estimate shown to the client at approval time
    pub estimate: Option<Money>,
    pub status: WorkOrderStatus,
    pub created_by: UserId,
    pub approved_by: Option<UserId>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkOrder {
    /// Creates a draft work order
    pub fn create(
        actor: &Actor,
        organization_id: OrganizationId,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, PortalError> {
        authorize(actor, Permission::CreateWorkOrder, organization_id)?;

        let title = title.into();
        if title.trim().is_empty() {
            return Err(PortalError::validation("Work order title must not be empty"));
        }

        let now = clock.now();
        Ok(Self {
            id: WorkOrderId::new_v7(),
            organization_id,
            title,
            description: None,
            scheduled_for: None,
            estimate: None,
            status: WorkOrderStatus::Draft,
            created_by: actor.user_id,
            approved_by: None,
            approved_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_schedule(mut self, date: NaiveDate) -> Self {
        self.scheduled_for = Some(date);
        self
    }

    pub fn with_estimate(mut self, estimate: Money) -> Self {
        self.estimate = Some(estimate);
        self
    }

    /// Sends the draft to the client for approval
    pub fn submit(&mut self, actor: &Actor, clock: &impl Clock) -> Result<(), PortalError> {
        authorize(actor, Permission::CreateWorkOrder, self.organization_id)?;
        self.transition(WorkOrderStatus::PendingApproval, clock)
    }

    /// Client approval
    pub fn approve(&mut self, actor: &Actor, clock: &impl Clock) -> Result<(), PortalError> {
        authorize(actor, Permission::ApproveWorkOrder, self.organization_id)?;
        self.transition(WorkOrderStatus::Approved, clock)?;
        self.approved_by = Some(actor.user_id);
        self.approved_at = Some(self.updated_at);
        info!(work_order = %self.id, approver = %actor.user_id, "Work order approved");
        Ok(())
    }

    /// Client rejection, with the client's reason
    pub fn reject(
        &mut self,
        actor: &Actor,
        reason: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), PortalError> {
        authorize(actor, Permission::ApproveWorkOrder, self.organization_id)?;
        self.transition(WorkOrderStatus::Rejected, clock)?;
        self.rejection_reason = Some(reason.into());
        info!(work_order = %self.id, "Work order rejected");
        Ok(())
    }

    pub fn start(&mut self, actor: &Actor, clock: &impl Clock) -> Result<(), PortalError> {
        authorize(actor, Permission::LogTime, self.organization_id)?;
        self.transition(WorkOrderStatus::InProgress, clock)
    }

    pub fn complete(&mut self, actor: &Actor, clock: &impl Clock) -> Result<(), PortalError> {
        authorize(actor, Permission::LogTime, self.organization_id)?;
        self.transition(WorkOrderStatus::Completed, clock)
    }

    pub fn cancel(&mut self, actor: &Actor, clock: &impl Clock) -> Result<(), PortalError> {
        authorize(actor, Permission::CreateWorkOrder, self.organization_id)?;
        self.transition(WorkOrderStatus::Cancelled, clock)
    }

    /// Returns true if time may be logged against this work order
    pub fn accepts_time(&self) -> bool {
        matches!(self.status, WorkOrderStatus::Approved | WorkOrderStatus::InProgress)
    }

    fn transition(&mut self, target: WorkOrderStatus, clock: &impl Clock) -> Result<(), PortalError> {
        if !self.can_transition_to(target) {
            return Err(PortalError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{:?}", target),
            });
        }
        self.status = target;
        self.updated_at = clock.now();
        Ok(())
    }

    fn can_transition_to(&self, target: WorkOrderStatus) -> bool {
        use WorkOrderStatus::*;
        match (self.status, target) {
            (Draft, PendingApproval)
            | (PendingApproval, Approved)
            | (PendingApproval, Rejected)
            | (Approved, InProgress)
            | (InProgress, Completed) => true,
            (current, Cancelled) => !current.is_terminal(),
            _ => false,
        }
    }
}
