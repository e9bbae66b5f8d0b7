//! Material domain model and service
//!
//! Uploading a material is where the authorization core and the
//! moderation workflow meet: the upload is capability-gated, and the
//! created material immediately enters moderation against the owner of
//! the receiving course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use campus_moderation::{ModerationService, Submission};
use campus_policy::PolicyEngine;
use campus_rbac::{Actor, ResourceKind};

use crate::error::{ContentError, ContentResult};
use crate::rules::{authorize_operation, Operation};
use crate::store::ContentStore;

/// A study material uploaded into a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Unique material ID
    pub id: Uuid,

    /// The course this material was uploaded into
    pub course_id: Uuid,

    /// The uploader
    pub owner_id: Uuid,

    /// Material title
    pub title: String,

    /// When the material was uploaded
    pub created_at: DateTime<Utc>,

    /// When the material was last edited
    pub updated_at: DateTime<Utc>,
}

impl Material {
    /// Creates a new material.
    pub fn new(course_id: Uuid, owner_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            course_id,
            owner_id,
            title: title.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Material operations, each gated through the rule table.
pub struct MaterialService {
    engine: PolicyEngine,
    store: Arc<dyn ContentStore>,
    moderation: Arc<ModerationService>,
}

impl std::fmt::Debug for MaterialService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialService").finish()
    }
}

impl MaterialService {
    /// Create a material service.
    pub fn new(
        engine: PolicyEngine,
        store: Arc<dyn ContentStore>,
        moderation: Arc<ModerationService>,
    ) -> Self {
        Self {
            engine,
            store,
            moderation,
        }
    }

    /// Upload a material into a course.
    ///
    /// The upload is authorized first; the material then enters the
    /// moderation workflow keyed to the course owner. A teacher
    /// uploading into their own course gets the submission approved on
    /// the spot.
    ///
    /// # Returns
    ///
    /// The stored material and its submission.
    pub async fn upload(
        &self,
        actor: &Actor,
        course_id: Uuid,
        title: &str,
    ) -> ContentResult<(Material, Submission)> {
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Material,
            Operation::Create,
            None,
        )?;
        let course = self
            .store
            .get_course(course_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Course,
                id: course_id,
            })?;

        let material = Material::new(course_id, actor.id, title);
        self.store.insert_material(material.clone()).await?;

        let submission = self
            .moderation
            .submit(material.id, actor.id, course.owner_id)
            .await?;

        tracing::info!(
            material = %material.id,
            course = %course_id,
            uploader = %actor.id,
            status = %submission.status,
            "material uploaded"
        );
        Ok((material, submission))
    }

    /// Fetch a material. Anonymous callers may read.
    pub async fn get(&self, actor: Option<&Actor>, material_id: Uuid) -> ContentResult<Material> {
        authorize_operation(&self.engine, actor, ResourceKind::Material, Operation::Read, None)?;
        self.store
            .get_material(material_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Material,
                id: material_id,
            })
    }

    /// Retitle a material. Own-or-any.
    pub async fn retitle(
        &self,
        actor: &Actor,
        material_id: Uuid,
        title: &str,
    ) -> ContentResult<Material> {
        let mut material = self
            .store
            .get_material(material_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Material,
                id: material_id,
            })?;
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Material,
            Operation::Update,
            Some(material.owner_id),
        )?;
        material.title = title.to_string();
        material.updated_at = Utc::now();
        self.store.update_material(material.clone()).await?;
        Ok(material)
    }

    /// Delete a material. Own-or-any.
    pub async fn delete(&self, actor: &Actor, material_id: Uuid) -> ContentResult<()> {
        let material = self
            .store
            .get_material(material_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Material,
                id: material_id,
            })?;
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Material,
            Operation::Delete,
            Some(material.owner_id),
        )?;
        self.store.delete_material(material_id).await?;
        tracing::info!(material = %material_id, actor = %actor.id, "material deleted");
        Ok(())
    }
}
