//! Review domain model and service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use campus_policy::PolicyEngine;
use campus_rbac::{Actor, ResourceKind};

use crate::error::{ContentError, ContentResult};
use crate::rules::{authorize_operation, Operation};
use crate::store::ContentStore;

/// A written review attached to a material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique review ID
    pub id: Uuid,

    /// The reviewed material
    pub material_id: Uuid,

    /// The review author
    pub owner_id: Uuid,

    /// Review text
    pub body: String,

    /// When the review was written
    pub created_at: DateTime<Utc>,

    /// When the review was last edited
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Creates a new review.
    pub fn new(material_id: Uuid, owner_id: Uuid, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            material_id,
            owner_id,
            body: body.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Review operations. Same shape split as ratings: owner-only edits,
/// own-or-any deletion.
pub struct ReviewService {
    engine: PolicyEngine,
    store: Arc<dyn ContentStore>,
}

impl std::fmt::Debug for ReviewService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewService").finish()
    }
}

impl ReviewService {
    /// Create a review service.
    pub fn new(engine: PolicyEngine, store: Arc<dyn ContentStore>) -> Self {
        Self { engine, store }
    }

    /// Write a review for a material.
    pub async fn write(
        &self,
        actor: &Actor,
        material_id: Uuid,
        body: &str,
    ) -> ContentResult<Review> {
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Review,
            Operation::Create,
            None,
        )?;
        if self.store.get_material(material_id).await?.is_none() {
            return Err(ContentError::NotFound {
                kind: ResourceKind::Material,
                id: material_id,
            });
        }
        let review = Review::new(material_id, actor.id, body);
        self.store.insert_review(review.clone()).await?;
        Ok(review)
    }

    /// Edit an own review. Owner-only.
    pub async fn edit(&self, actor: &Actor, review_id: Uuid, body: &str) -> ContentResult<Review> {
        let mut review = self
            .store
            .get_review(review_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Review,
                id: review_id,
            })?;
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Review,
            Operation::Update,
            Some(review.owner_id),
        )?;
        review.body = body.to_string();
        review.updated_at = Utc::now();
        self.store.update_review(review.clone()).await?;
        Ok(review)
    }

    /// Delete a review. Own-or-any.
    pub async fn delete(&self, actor: &Actor, review_id: Uuid) -> ContentResult<()> {
        let review = self
            .store
            .get_review(review_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Review,
                id: review_id,
            })?;
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Review,
            Operation::Delete,
            Some(review.owner_id),
        )?;
        self.store.delete_review(review_id).await?;
        Ok(())
    }
}
