//! Error types for moderation operations
//!
//! Callers need to tell three failures apart: a denied actor
//! (Forbidden), an already-decided submission (InvalidTransition), and
//! a missing submission (NotFound, which fails closed). Each maps to a
//! distinct user-visible message at the calling layer.

use thiserror::Error;
use uuid::Uuid;

use campus_policy::AccessError;

use crate::status::ModerationStatus;

/// Moderation error types.
#[derive(Debug, Error)]
pub enum ModerationError {
    /// The policy engine denied the transition.
    #[error(transparent)]
    Forbidden(#[from] AccessError),

    /// The submission was already decided; render "already decided",
    /// not "not allowed".
    #[error("Invalid transition: submission is {from}, not pending")]
    InvalidTransition {
        /// The status the submission actually had
        from: ModerationStatus,
    },

    /// The submission does not exist. Treated as a denial, never as an
    /// implicit allow.
    #[error("Submission not found: {0}")]
    NotFound(Uuid),

    /// Backend failure in the moderation store.
    #[error("Store error: {0}")]
    Store(String),
}

/// Result type for moderation operations.
pub type ModerationResult<T> = Result<T, ModerationError>;

impl ModerationError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ModerationError::Forbidden(_) => "FORBIDDEN",
            ModerationError::InvalidTransition { .. } => "ALREADY_DECIDED",
            ModerationError::NotFound(_) => "NOT_FOUND",
            ModerationError::Store(_) => "STORE_ERROR",
        }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ModerationError::Forbidden(_) => 403,
            ModerationError::InvalidTransition { .. } => 409,
            ModerationError::NotFound(_) => 404,
            ModerationError::Store(_) => 500,
        }
    }
}
