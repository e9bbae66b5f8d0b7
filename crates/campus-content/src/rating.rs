//! Rating domain model and service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use campus_policy::PolicyEngine;
use campus_rbac::{Actor, ResourceKind};

use crate::error::{ContentError, ContentResult};
use crate::rules::{authorize_operation, Operation};
use crate::store::ContentStore;

/// A star rating attached to a material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    /// Unique rating ID
    pub id: Uuid,

    /// The rated material
    pub material_id: Uuid,

    /// The rating author
    pub owner_id: Uuid,

    /// Stars, 1 through 5
    pub stars: u8,

    /// When the rating was given
    pub created_at: DateTime<Utc>,
}

impl Rating {
    /// Creates a new rating. Star bounds are validated by the service.
    pub fn new(material_id: Uuid, owner_id: Uuid, stars: u8) -> Self {
        Self {
            id: Uuid::now_v7(),
            material_id,
            owner_id,
            stars,
            created_at: Utc::now(),
        }
    }
}

/// Rating operations.
///
/// Editing stays owner-only: nobody rewrites someone else's stars, an
/// administrator's recourse is deletion.
pub struct RatingService {
    engine: PolicyEngine,
    store: Arc<dyn ContentStore>,
}

impl std::fmt::Debug for RatingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingService").finish()
    }
}

impl RatingService {
    /// Create a rating service.
    pub fn new(engine: PolicyEngine, store: Arc<dyn ContentStore>) -> Self {
        Self { engine, store }
    }

    fn check_stars(stars: u8) -> ContentResult<()> {
        if !(1..=5).contains(&stars) {
            return Err(ContentError::InvalidInput(format!(
                "stars must be between 1 and 5, got {stars}"
            )));
        }
        Ok(())
    }

    /// Rate a material.
    pub async fn rate(&self, actor: &Actor, material_id: Uuid, stars: u8) -> ContentResult<Rating> {
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Rating,
            Operation::Create,
            None,
        )?;
        Self::check_stars(stars)?;
        if self.store.get_material(material_id).await?.is_none() {
            return Err(ContentError::NotFound {
                kind: ResourceKind::Material,
                id: material_id,
            });
        }
        let rating = Rating::new(material_id, actor.id, stars);
        self.store.insert_rating(rating.clone()).await?;
        Ok(rating)
    }

    /// Change the stars on an own rating. Owner-only.
    pub async fn restar(&self, actor: &Actor, rating_id: Uuid, stars: u8) -> ContentResult<Rating> {
        let mut rating = self
            .store
            .get_rating(rating_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Rating,
                id: rating_id,
            })?;
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Rating,
            Operation::Update,
            Some(rating.owner_id),
        )?;
        Self::check_stars(stars)?;
        rating.stars = stars;
        self.store.update_rating(rating.clone()).await?;
        Ok(rating)
    }

    /// Delete a rating. Own-or-any.
    pub async fn delete(&self, actor: &Actor, rating_id: Uuid) -> ContentResult<()> {
        let rating = self
            .store
            .get_rating(rating_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Rating,
                id: rating_id,
            })?;
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Rating,
            Operation::Delete,
            Some(rating.owner_id),
        )?;
        self.store.delete_rating(rating_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryContentStore;
    use crate::Material;
    use campus_rbac::Role;

    async fn fixture() -> (RatingService, Arc<dyn ContentStore>, Uuid) {
        let store: Arc<dyn ContentStore> = Arc::new(MemoryContentStore::new());
        let material = Material::new(Uuid::now_v7(), Uuid::now_v7(), "Notes");
        let material_id = material.id;
        store.insert_material(material).await.unwrap();
        (
            RatingService::new(PolicyEngine::new(), store.clone()),
            store,
            material_id,
        )
    }

    fn student() -> Actor {
        Actor::with_roles(Uuid::now_v7(), vec![Role::contributor()])
    }

    #[tokio::test]
    async fn test_rate_and_restar_own_rating() {
        let (service, _, material_id) = fixture().await;
        let actor = student();

        let rating = service.rate(&actor, material_id, 4).await.unwrap();
        let restarred = service.restar(&actor, rating.id, 5).await.unwrap();
        assert_eq!(restarred.stars, 5);
    }

    #[tokio::test]
    async fn test_stars_out_of_range_rejected() {
        let (service, _, material_id) = fixture().await;
        let actor = student();

        for stars in [0, 6] {
            let err = service.rate(&actor, material_id, stars).await.unwrap_err();
            assert!(matches!(err, ContentError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn test_admin_cannot_edit_but_can_delete_foreign_rating() {
        let (service, _, material_id) = fixture().await;
        let author = student();
        let rating = service.rate(&author, material_id, 2).await.unwrap();

        let admin = Actor::with_roles(Uuid::now_v7(), vec![Role::administrator()]);

        // Owner-only update: no any override
        let err = service.restar(&admin, rating.id, 5).await.unwrap_err();
        assert!(matches!(err, ContentError::Forbidden(_)));

        // Own-or-any delete: allowed
        service.delete(&admin, rating.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_rating_missing_material_fails_closed() {
        let (service, _, _) = fixture().await;
        let err = service
            .rate(&student(), Uuid::now_v7(), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound { .. }));
    }
}
