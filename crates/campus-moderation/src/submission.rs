//! Submission entity
//!
//! A submission records one material entering one course and tracks its
//! moderation status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::ModerationStatus;

/// A material submitted into a course, awaiting or carrying a decision.
///
/// Two ownerships matter here and they are distinct: `owner_id` is the
/// uploader, `container_owner_id` is the owner of the course the
/// material was submitted into. The course owner decides the fate of
/// the submission.
///
/// Status mutates only through the moderation store's compare-and-set
/// transition, reached via [`ModerationService`](crate::ModerationService).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique submission ID
    pub id: Uuid,

    /// The submitted material
    pub material_id: Uuid,

    /// The uploader
    pub owner_id: Uuid,

    /// The owner of the course the material was submitted into
    pub container_owner_id: Uuid,

    /// Current moderation status
    pub status: ModerationStatus,

    /// When the material was submitted
    pub submitted_at: DateTime<Utc>,

    /// When the decision was made (if decided)
    pub decided_at: Option<DateTime<Utc>>,

    /// Who made the decision (if decided)
    pub decided_by: Option<Uuid>,
}

impl Submission {
    /// Creates a new pending submission.
    ///
    /// # Arguments
    ///
    /// * `material_id` - The submitted material
    /// * `owner_id` - The uploader
    /// * `container_owner_id` - The owner of the receiving course
    pub fn new(material_id: Uuid, owner_id: Uuid, container_owner_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            material_id,
            owner_id,
            container_owner_id,
            status: ModerationStatus::Pending,
            submitted_at: Utc::now(),
            decided_at: None,
            decided_by: None,
        }
    }

    /// Check whether the uploader owns the receiving course.
    pub fn is_self_submission(&self) -> bool {
        self.owner_id == self.container_owner_id
    }

    /// Check whether a decision has been made.
    pub fn is_decided(&self) -> bool {
        self.status.is_terminal()
    }

    /// Record a decision on this submission.
    ///
    /// Used by stores after the pending precondition has been checked;
    /// not a public transition path.
    pub(crate) fn record_decision(&mut self, status: ModerationStatus, decided_by: Uuid) {
        self.status = status;
        self.decided_at = Some(Utc::now());
        self.decided_by = Some(decided_by);
    }
}
