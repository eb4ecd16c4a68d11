//! Strongly-typed identifiers for portal entities
//!
//! Each entity gets a UUID newtype so that, say, a work order id can never
//! be passed where an organization id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Tenancy
define_id!(OrganizationId, "ORG");
define_id!(UserId, "USR");

// Field work
define_id!(WorkOrderId, "WO");
define_id!(TimeEntryId, "TIME");
define_id!(IncidentId, "INC");

// Billing
define_id!(InvoiceId, "INV");
define_id!(LineItemId, "LINE");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_order_id_display() {
        let id = WorkOrderId::new();
        assert!(id.to_string().starts_with("WO-"));
    }

    #[test]
    fn test_id_parsing_with_and_without_prefix() {
        let original = OrganizationId::new_v7();
        let parsed: OrganizationId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        let bare: OrganizationId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, bare);
    }

    #[test]
    fn test_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let invoice_id = InvoiceId::from(uuid);
        let back: Uuid = invoice_id.into();
        assert_eq!(uuid, back);
    }
}
