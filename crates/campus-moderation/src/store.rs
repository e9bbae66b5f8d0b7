//! Moderation store seam
//!
//! The store persists submissions and applies status transitions. The
//! transition contract is compare-and-set: the pending precondition is
//! checked and the new status written as one atomic step, so two
//! moderators racing on the same submission cannot both win. A SQL
//! implementation would express the same contract as
//! `UPDATE ... SET status = $to WHERE id = $id AND status = $from`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ModerationError, ModerationResult};
use crate::status::ModerationStatus;
use crate::submission::Submission;

/// Persist submissions and apply moderation transitions.
#[async_trait]
pub trait ModerationStore: Send + Sync {
    /// Persist a new submission.
    async fn insert(&self, submission: Submission) -> ModerationResult<()>;

    /// Look up a submission by id.
    async fn get(&self, id: Uuid) -> ModerationResult<Option<Submission>>;

    /// List submissions awaiting a decision in courses owned by the
    /// given actor.
    async fn list_pending_for(&self, container_owner_id: Uuid)
        -> ModerationResult<Vec<Submission>>;

    /// Atomically move a submission from `from` to `to`.
    ///
    /// The status check and the write happen as one step. A submission
    /// whose current status differs from `from` yields
    /// [`ModerationError::InvalidTransition`] carrying the actual
    /// status; a missing submission yields
    /// [`ModerationError::NotFound`].
    ///
    /// # Returns
    ///
    /// The submission after the transition.
    async fn transition(
        &self,
        id: Uuid,
        from: ModerationStatus,
        to: ModerationStatus,
        decided_by: Uuid,
    ) -> ModerationResult<Submission>;
}

/// In-memory submission store.
///
/// Suitable for single-process applications and testing. The whole
/// check-then-write runs under one write guard, which is what makes
/// [`ModerationStore::transition`] compare-and-set.
#[derive(Default)]
pub struct MemorySubmissionStore {
    submissions: Arc<RwLock<HashMap<Uuid, Submission>>>,
}

impl std::fmt::Debug for MemorySubmissionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySubmissionStore").finish()
    }
}

impl MemorySubmissionStore {
    /// Create a new empty in-memory submission store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModerationStore for MemorySubmissionStore {
    async fn insert(&self, submission: Submission) -> ModerationResult<()> {
        let mut submissions = self.submissions.write().await;
        submissions.insert(submission.id, submission);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> ModerationResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions.get(&id).cloned())
    }

    async fn list_pending_for(
        &self,
        container_owner_id: Uuid,
    ) -> ModerationResult<Vec<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .values()
            .filter(|s| s.container_owner_id == container_owner_id && s.status.is_pending())
            .cloned()
            .collect())
    }

    async fn transition(
        &self,
        id: Uuid,
        from: ModerationStatus,
        to: ModerationStatus,
        decided_by: Uuid,
    ) -> ModerationResult<Submission> {
        let mut submissions = self.submissions.write().await;
        let submission = submissions
            .get_mut(&id)
            .ok_or(ModerationError::NotFound(id))?;

        if submission.status != from {
            return Err(ModerationError::InvalidTransition {
                from: submission.status,
            });
        }

        submission.record_decision(to, decided_by);
        Ok(submission.clone())
    }
}
