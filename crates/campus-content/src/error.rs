//! Error types for content operations

use thiserror::Error;
use uuid::Uuid;

use campus_moderation::ModerationError;
use campus_policy::AccessError;
use campus_rbac::{ResourceKind, RoleStoreError};

/// Content service error types.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The policy engine denied the operation.
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    /// The referenced resource does not exist. Fails closed: an absent
    /// lookup never turns into an implicit allow further down.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The kind of the missing resource
        kind: ResourceKind,
        /// The id that failed to resolve
        id: Uuid,
    },

    /// The request payload is unusable (e.g. a star rating out of range).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No rule is declared for this operation on this kind. Fails
    /// closed; a missing table entry is a denial, not an open door.
    #[error("No rule declared for {operation:?} on {kind}")]
    UndeclaredOperation {
        /// The resource kind
        kind: ResourceKind,
        /// The attempted operation
        operation: crate::rules::Operation,
    },

    /// The moderation workflow failed.
    #[error(transparent)]
    Moderation(#[from] ModerationError),

    /// The role store failed.
    #[error(transparent)]
    Roles(#[from] RoleStoreError),

    /// Backend failure in a content store.
    #[error("Store error: {0}")]
    Store(String),
}

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

impl ContentError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ContentError::Forbidden(_) => "FORBIDDEN",
            ContentError::NotFound { .. } => "NOT_FOUND",
            ContentError::InvalidInput(_) => "INVALID_INPUT",
            ContentError::UndeclaredOperation { .. } => "UNDECLARED_OPERATION",
            ContentError::Moderation(err) => err.error_code(),
            ContentError::Roles(_) => "ROLE_STORE_ERROR",
            ContentError::Store(_) => "STORE_ERROR",
        }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ContentError::Forbidden(_) => 403,
            ContentError::NotFound { .. } => 404,
            ContentError::InvalidInput(_) => 422,
            ContentError::UndeclaredOperation { .. } => 403,
            ContentError::Moderation(err) => err.status_code(),
            ContentError::Roles(_) => 500,
            ContentError::Store(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_kind() {
        let err = ContentError::NotFound {
            kind: ResourceKind::Material,
            id: Uuid::now_v7(),
        };
        assert!(err.to_string().starts_with("material not found"));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_moderation_codes_pass_through() {
        let err = ContentError::from(ModerationError::InvalidTransition {
            from: campus_moderation::ModerationStatus::Approved,
        });
        assert_eq!(err.error_code(), "ALREADY_DECIDED");
        assert_eq!(err.status_code(), 409);
    }
}
