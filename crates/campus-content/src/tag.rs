//! Tag domain model and service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use campus_policy::PolicyEngine;
use campus_rbac::{Actor, ResourceKind};

use crate::error::{ContentError, ContentResult};
use crate::rules::{authorize_operation, Operation};
use crate::store::ContentStore;

/// A tag attached to a material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Unique tag ID
    pub id: Uuid,

    /// The tagged material
    pub material_id: Uuid,

    /// Who created the tag
    pub owner_id: Uuid,

    /// Tag label
    pub label: String,

    /// When the tag was created
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a new tag.
    pub fn new(material_id: Uuid, owner_id: Uuid, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            material_id,
            owner_id,
            label: label.into(),
            created_at: Utc::now(),
        }
    }
}

/// Tag operations.
pub struct TagService {
    engine: PolicyEngine,
    store: Arc<dyn ContentStore>,
}

impl std::fmt::Debug for TagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagService").finish()
    }
}

impl TagService {
    /// Create a tag service.
    pub fn new(engine: PolicyEngine, store: Arc<dyn ContentStore>) -> Self {
        Self { engine, store }
    }

    /// Tag a material.
    pub async fn create(&self, actor: &Actor, material_id: Uuid, label: &str) -> ContentResult<Tag> {
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Tag,
            Operation::Create,
            None,
        )?;
        if self.store.get_material(material_id).await?.is_none() {
            return Err(ContentError::NotFound {
                kind: ResourceKind::Material,
                id: material_id,
            });
        }
        let tag = Tag::new(material_id, actor.id, label);
        self.store.insert_tag(tag.clone()).await?;
        Ok(tag)
    }

    /// Delete a tag. Own-or-any.
    pub async fn delete(&self, actor: &Actor, tag_id: Uuid) -> ContentResult<()> {
        let tag = self
            .store
            .get_tag(tag_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Tag,
                id: tag_id,
            })?;
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Tag,
            Operation::Delete,
            Some(tag.owner_id),
        )?;
        self.store.delete_tag(tag_id).await?;
        Ok(())
    }
}
