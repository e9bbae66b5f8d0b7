//! # Moderation status
//!
//! The lifecycle of a submitted material inside its course.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Moderation status of a submitted material.
///
/// The state machine is:
///
/// ```text
/// Pending ──approve──▶ Approved
///    └─────reject────▶ Rejected
/// ```
///
/// `Approved` and `Rejected` are terminal. There is no resubmission
/// path after a rejection; a known limitation carried over from the
/// observed product behavior, not an oversight.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    /// Awaiting a decision from the course owner.
    #[default]
    Pending,
    /// Visible inside the course.
    Approved,
    /// Declined; stays hidden.
    Rejected,
}

impl ModerationStatus {
    /// Get the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }

    /// Parse a status from its string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(ModerationStatus::Pending),
            "approved" => Some(ModerationStatus::Approved),
            "rejected" => Some(ModerationStatus::Rejected),
            _ => None,
        }
    }

    /// Check if the status still accepts a decision.
    pub fn is_pending(&self) -> bool {
        matches!(self, ModerationStatus::Pending)
    }

    /// Check if the status is terminal.
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
