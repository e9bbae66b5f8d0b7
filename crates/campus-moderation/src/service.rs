//! Moderation service
//!
//! Wires the policy engine to the moderation store: every transition is
//! authorized before it is applied, and applied with compare-and-set so
//! concurrent moderators cannot double-decide.

use std::sync::Arc;
use uuid::Uuid;

use campus_policy::{AccessRule, PolicyEngine};
use campus_rbac::{Actor, Capability};

use crate::error::{ModerationError, ModerationResult};
use crate::status::ModerationStatus;
use crate::store::ModerationStore;
use crate::submission::Submission;

/// The moderation workflow over submitted materials.
///
/// Approval is an owner-only decision: it requires the
/// `approve_material` capability AND ownership of the receiving course.
/// No `Any`-scoped capability overrides it, administrators included;
/// the course owner alone decides what appears in their course.
pub struct ModerationService {
    engine: PolicyEngine,
    store: Arc<dyn ModerationStore>,
}

impl std::fmt::Debug for ModerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationService").finish()
    }
}

impl ModerationService {
    /// Create a moderation service.
    pub fn new(engine: PolicyEngine, store: Arc<dyn ModerationStore>) -> Self {
        Self { engine, store }
    }

    /// Submit a material into a course.
    ///
    /// The only way a submission comes into existence. It starts
    /// `Pending`, with one exception: when the uploader owns the course
    /// themselves, the submission is approved on the spot. Requiring
    /// owners to approve their own uploads into their own courses adds a
    /// step with no decision behind it.
    ///
    /// Upload permission is checked by the content service before it
    /// calls here; this operation only runs the workflow.
    pub async fn submit(
        &self,
        material_id: Uuid,
        owner_id: Uuid,
        container_owner_id: Uuid,
    ) -> ModerationResult<Submission> {
        let mut submission = Submission::new(material_id, owner_id, container_owner_id);
        if submission.is_self_submission() {
            submission.record_decision(ModerationStatus::Approved, owner_id);
            tracing::info!(
                submission = %submission.id,
                material = %material_id,
                "self-submission auto-approved"
            );
        } else {
            tracing::info!(
                submission = %submission.id,
                material = %material_id,
                course_owner = %container_owner_id,
                "material submitted for moderation"
            );
        }
        self.store.insert(submission.clone()).await?;
        Ok(submission)
    }

    /// Approve a pending submission.
    ///
    /// # Arguments
    ///
    /// * `actor` - The acting identity; must hold `approve_material` and
    ///   own the receiving course
    /// * `submission_id` - The submission to approve
    ///
    /// # Errors
    ///
    /// [`ModerationError::Forbidden`] on a failed policy check,
    /// [`ModerationError::InvalidTransition`] when the submission was
    /// already decided, [`ModerationError::NotFound`] when it does not
    /// exist.
    pub async fn approve(&self, actor: &Actor, submission_id: Uuid) -> ModerationResult<Submission> {
        self.decide(actor, submission_id, ModerationStatus::Approved)
            .await
    }

    /// Reject a pending submission. Symmetric to [`Self::approve`].
    pub async fn reject(&self, actor: &Actor, submission_id: Uuid) -> ModerationResult<Submission> {
        self.decide(actor, submission_id, ModerationStatus::Rejected)
            .await
    }

    /// List submissions awaiting the actor's decision.
    pub async fn pending_queue(&self, actor: &Actor) -> ModerationResult<Vec<Submission>> {
        self.store.list_pending_for(actor.id).await
    }

    async fn decide(
        &self,
        actor: &Actor,
        submission_id: Uuid,
        to: ModerationStatus,
    ) -> ModerationResult<Submission> {
        let submission = self
            .store
            .get(submission_id)
            .await?
            .ok_or(ModerationError::NotFound(submission_id))?;

        self.engine.authorize(
            Some(actor),
            AccessRule::OwnerOnly(Capability::ApproveMaterial),
            Some(submission.container_owner_id),
        )?;

        // CAS: the pending check and the write are one atomic step.
        let decided = self
            .store
            .transition(submission_id, ModerationStatus::Pending, to, actor.id)
            .await?;

        tracing::info!(
            submission = %submission_id,
            status = %decided.status,
            decided_by = %actor.id,
            "submission decided"
        );
        Ok(decided)
    }
}
