//! Portal domain errors

use thiserror::Error;

use crate::access::AccessError;

/// Errors that can occur in the portal domain
#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Organization mismatch: {0}")]
    OrganizationMismatch(String),
}

impl PortalError {
    pub fn validation(message: impl Into<String>) -> Self {
        PortalError::Validation(message.into())
    }
}
