//! Error types for policy decisions
//!
//! A denial is normal control flow, surfaced as a typed value the
//! calling layer can distinguish from other failures. Nothing in this
//! module panics on a failed check.

use thiserror::Error;
use uuid::Uuid;

use campus_rbac::{Capability, UnknownCapability};

use crate::engine::DenialReason;

/// Access error types.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A capability or ownership check failed.
    #[error("Forbidden: {capability} denied for actor {actor_id:?}: {reason}")]
    Forbidden {
        /// The capability that was demanded
        capability: Capability,
        /// The acting identity, if any
        actor_id: Option<Uuid>,
        /// Why the decision denied
        reason: DenialReason,
    },

    /// A capability name outside the closed catalog reached a boundary.
    /// Fails closed; a configuration error, not a user error.
    #[error(transparent)]
    UnknownCapability(#[from] UnknownCapability),
}

/// Result type for authorization operations.
pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Check if this error is an ordinary denial.
    ///
    /// Denials are expected and should not be logged as errors;
    /// unknown capability names should.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AccessError::Forbidden { .. })
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::Forbidden { .. } => "FORBIDDEN",
            AccessError::UnknownCapability(_) => "UNKNOWN_CAPABILITY",
        }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AccessError::Forbidden { .. } => 403,
            AccessError::UnknownCapability(_) => 500,
        }
    }
}
