//! Course domain model and service
//!
//! Courses are the containers materials get submitted into. The course
//! owner is the container owner the moderation workflow defers to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use campus_policy::PolicyEngine;
use campus_rbac::{Actor, ResourceKind};

use crate::error::{ContentError, ContentResult};
use crate::rules::{authorize_operation, Operation};
use crate::store::ContentStore;

/// A course on the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course ID
    pub id: Uuid,

    /// The actor who created the course
    pub owner_id: Uuid,

    /// Course title
    pub title: String,

    /// Optional course description
    pub description: Option<String>,

    /// When the course was created
    pub created_at: DateTime<Utc>,

    /// When the course was last edited
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Creates a new course.
    ///
    /// Ownership is fixed at creation and never reassigned.
    pub fn new(owner_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            owner_id,
            title: title.into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the course description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Course operations, each gated through the rule table.
pub struct CourseService {
    engine: PolicyEngine,
    store: Arc<dyn ContentStore>,
}

impl std::fmt::Debug for CourseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourseService").finish()
    }
}

impl CourseService {
    /// Create a course service.
    pub fn new(engine: PolicyEngine, store: Arc<dyn ContentStore>) -> Self {
        Self { engine, store }
    }

    /// Create a course owned by the acting user.
    pub async fn create(&self, actor: &Actor, title: &str) -> ContentResult<Course> {
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Course,
            Operation::Create,
            None,
        )?;
        let course = Course::new(actor.id, title);
        self.store.insert_course(course.clone()).await?;
        tracing::info!(course = %course.id, owner = %actor.id, "course created");
        Ok(course)
    }

    /// Fetch a course. Anonymous callers may read.
    pub async fn get(&self, actor: Option<&Actor>, course_id: Uuid) -> ContentResult<Course> {
        authorize_operation(&self.engine, actor, ResourceKind::Course, Operation::Read, None)?;
        self.store
            .get_course(course_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Course,
                id: course_id,
            })
    }

    /// Rename a course. Own-or-any: the owner, or an actor holding
    /// `update_any_course`.
    pub async fn rename(&self, actor: &Actor, course_id: Uuid, title: &str) -> ContentResult<Course> {
        let mut course = self
            .store
            .get_course(course_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Course,
                id: course_id,
            })?;
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Course,
            Operation::Update,
            Some(course.owner_id),
        )?;
        course.title = title.to_string();
        course.updated_at = Utc::now();
        self.store.update_course(course.clone()).await?;
        Ok(course)
    }

    /// Delete a course. Own-or-any.
    pub async fn delete(&self, actor: &Actor, course_id: Uuid) -> ContentResult<()> {
        let course = self
            .store
            .get_course(course_id)
            .await?
            .ok_or(ContentError::NotFound {
                kind: ResourceKind::Course,
                id: course_id,
            })?;
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Course,
            Operation::Delete,
            Some(course.owner_id),
        )?;
        self.store.delete_course(course_id).await?;
        tracing::info!(course = %course_id, actor = %actor.id, "course deleted");
        Ok(())
    }
}
