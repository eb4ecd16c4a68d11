//! Roles and authorization predicates
//!
//! Every portal user acts either for the A/V company (admins and staff) or
//! for exactly one client organization. Company users may act on any
//! organization; clients only ever act on their own.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

use core_kernel::{OrganizationId, UserId};

/// A user's role in the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Company administrator
    Admin,
    /// Company employee
    Staff,
    /// Member of a client organization
    Client,
}

/// Operations that are subject to authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewOrganization,
    CreateWorkOrder,
    ApproveWorkOrder,
    LogTime,
    ReportIncident,
    ManageInvoices,
    VoidInvoice,
    PayInvoice,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Permission::ViewOrganization => "view_organization",
            Permission::CreateWorkOrder => "create_work_order",
            Permission::ApproveWorkOrder => "approve_work_order",
            Permission::LogTime => "log_time",
            Permission::ReportIncident => "report_incident",
            Permission::ManageInvoices => "manage_invoices",
            Permission::VoidInvoice => "void_invoice",
            Permission::PayInvoice => "pay_invoice",
        };
        f.write_str(name)
    }
}

/// Authorization failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("User {user} ({role:?}) may not {permission} for organization {organization}")]
    Forbidden {
        user: UserId,
        role: Role,
        permission: Permission,
        organization: OrganizationId,
    },

    #[error("Client user {0} is not attached to an organization")]
    MissingOrganization(UserId),
}

/// The authenticated user performing an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
    /// Set for clients; company users are not bound to an organization
    pub organization_id: Option<OrganizationId>,
}

impl Actor {
    pub fn admin(user_id: UserId) -> Self {
        Self { user_id, role: Role::Admin, organization_id: None }
    }

    pub fn staff(user_id: UserId) -> Self {
        Self { user_id, role: Role::Staff, organization_id: None }
    }

    pub fn client(user_id: UserId, organization_id: OrganizationId) -> Self {
        Self {
            user_id,
            role: Role::Client,
            organization_id: Some(organization_id),
        }
    }

    /// Returns true for company-side users
    pub fn is_internal(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Staff)
    }

    /// Returns true if this actor belongs to the given client organization
    pub fn is_member_of(&self, organization: OrganizationId) -> bool {
        self.role == Role::Client && self.organization_id == Some(organization)
    }
}

/// Role/permission matrix, ignoring organization scoping
fn role_grants(role: Role, permission: Permission) -> bool {
    use Permission::*;
    match role {
        Role::Admin => true,
        Role::Staff => !matches!(permission, ApproveWorkOrder | VoidInvoice | PayInvoice),
        Role::Client => matches!(permission, ViewOrganization | ApproveWorkOrder | PayInvoice),
    }
}

/// Returns true if `actor` may perform `permission` on `organization`
pub fn can(actor: &Actor, permission: Permission, organization: OrganizationId) -> bool {
    if !role_grants(actor.role, permission) {
        return false;
    }
    actor.is_internal() || actor.is_member_of(organization)
}

/// Checks `permission`, returning a descriptive error when it is denied
pub fn authorize(
    actor: &Actor,
    permission: Permission,
    organization: OrganizationId,
) -> Result<(), AccessError> {
    if actor.role == Role::Client && actor.organization_id.is_none() {
        warn!(user = %actor.user_id, "Client without organization attempted {}", permission);
        return Err(AccessError::MissingOrganization(actor.user_id));
    }

    if can(actor, permission, organization) {
        return Ok(());
    }

    warn!(
        user = %actor.user_id,
        role = ?actor.role,
        %permission,
        %organization,
        "Authorization denied"
    );
    Err(AccessError::Forbidden {
        user: actor.user_id,
        role: actor.role,
        permission,
        organization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_cannot_approve_work_orders() {
        let org = OrganizationId::new();
        let staff = Actor::staff(UserId::new());
        assert!(can(&staff, Permission::CreateWorkOrder, org));
        assert!(!can(&staff, Permission::ApproveWorkOrder, org));
    }

    #[test]
    fn test_client_scoped_to_own_organization() {
        let own = OrganizationId::new();
        let other = OrganizationId::new();
        let client = Actor::client(UserId::new(), own);

        assert!(can(&client, Permission::PayInvoice, own));
        assert!(!can(&client, Permission::PayInvoice, other));
        assert!(!can(&client, Permission::ViewOrganization, other));
    }

    #[test]
    fn test_admin_may_void() {
        let admin = Actor::admin(UserId::new());
        assert!(authorize(&admin, Permission::VoidInvoice, OrganizationId::new()).is_ok());
    }

    #[test]
    fn test_client_without_organization_rejected() {
        let actor = Actor {
            user_id: UserId::new(),
            role: Role::Client,
            organization_id: None,
        };
        let result = authorize(&actor, Permission::ViewOrganization, OrganizationId::new());
        assert!(matches!(result, Err(AccessError::MissingOrganization(_))));
    }
}
