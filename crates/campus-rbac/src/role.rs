//! # Roles
//!
//! A role is a named, mutable bundle of capabilities assigned to actors.
//! Three archetype roles are seeded at first run: administrator,
//! course owner ("teacher"), and contributor ("student").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capability::{Capability, CapabilitySet};

/// Well-known name of the administrator archetype role.
pub const ADMINISTRATOR: &str = "administrator";
/// Well-known name of the course-owner archetype role.
pub const COURSE_OWNER: &str = "course_owner";
/// Well-known name of the contributor archetype role.
pub const CONTRIBUTOR: &str = "contributor";

/// A named bundle of capabilities.
///
/// Role names are unique across the platform. Roles are created once at
/// system initialization and thereafter read-mostly; administrators may
/// edit capability membership with [`Role::grant`] and [`Role::revoke`].
///
/// None of the archetypes carry [`Capability::ReadResources`]: the
/// universal read is a fixed predicate in the policy engine, so a newly
/// introduced role gets it without an explicit grant.
///
/// # Examples
///
/// ```
/// use campus_rbac::{Capability, Role};
///
/// let teacher = Role::course_owner();
/// assert!(teacher.has(Capability::CreateCourse));
/// assert!(teacher.has(Capability::ApproveMaterial));
/// assert!(!teacher.has(Capability::DeleteAnyMaterial));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique role ID
    pub id: Uuid,

    /// Unique role name
    pub name: String,

    /// Capabilities carried by the role
    pub capabilities: CapabilitySet,

    /// When the role was created
    pub created_at: DateTime<Utc>,

    /// When the capability set was last edited
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Creates a new role.
    ///
    /// # Arguments
    ///
    /// * `name` - The unique role name
    /// * `capabilities` - The initial capability set
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_rbac::{Capability, CapabilitySet, Role};
    ///
    /// let caps: CapabilitySet = [Capability::CreateTag].into_iter().collect();
    /// let role = Role::new("librarian", caps);
    /// assert_eq!(role.name, "librarian");
    /// ```
    pub fn new(name: impl Into<String>, capabilities: CapabilitySet) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            capabilities,
            created_at: now,
            updated_at: now,
        }
    }

    /// Grant a capability to this role.
    pub fn grant(&mut self, capability: Capability) {
        self.capabilities.add(capability);
        self.updated_at = Utc::now();
    }

    /// Revoke a capability from this role.
    ///
    /// # Returns
    ///
    /// `true` if the capability was present, `false` otherwise
    pub fn revoke(&mut self, capability: Capability) -> bool {
        let removed = self.capabilities.remove(capability);
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Check if this role carries a capability.
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    /// The administrator archetype.
    ///
    /// Carries every `Any`-scoped capability plus course creation,
    /// material approval, and role management. Approval still only
    /// applies to courses the administrator owns; the `Any` scope does
    /// not reach into owner-only decisions.
    pub fn administrator() -> Self {
        Self::new(
            ADMINISTRATOR,
            [
                Capability::CreateCourse,
                Capability::UpdateAnyCourse,
                Capability::DeleteAnyCourse,
                Capability::UploadMaterial,
                Capability::UpdateAnyMaterial,
                Capability::DeleteAnyMaterial,
                Capability::ApproveMaterial,
                Capability::DeleteAnyRating,
                Capability::DeleteAnyReview,
                Capability::CreateTag,
                Capability::DeleteAnyTag,
                Capability::ManageRoles,
                Capability::AssignRoles,
                Capability::ChangeOwnPassword,
            ]
            .into_iter()
            .collect(),
        )
    }

    /// The course-owner ("teacher") archetype.
    ///
    /// Creates courses, uploads and approves materials, and manages its
    /// own content. All scoped capabilities are `Own` variants.
    pub fn course_owner() -> Self {
        Self::new(
            COURSE_OWNER,
            [
                Capability::CreateCourse,
                Capability::UpdateOwnCourse,
                Capability::DeleteOwnCourse,
                Capability::UploadMaterial,
                Capability::UpdateOwnMaterial,
                Capability::DeleteOwnMaterial,
                Capability::ApproveMaterial,
                Capability::RateMaterial,
                Capability::UpdateOwnRating,
                Capability::DeleteOwnRating,
                Capability::ReviewMaterial,
                Capability::UpdateOwnReview,
                Capability::DeleteOwnReview,
                Capability::CreateTag,
                Capability::DeleteOwnTag,
                Capability::ChangeOwnPassword,
            ]
            .into_iter()
            .collect(),
        )
    }

    /// The contributor ("student") archetype.
    ///
    /// Uploads materials and manages its own ratings, reviews, and tags.
    pub fn contributor() -> Self {
        Self::new(
            CONTRIBUTOR,
            [
                Capability::UploadMaterial,
                Capability::UpdateOwnMaterial,
                Capability::DeleteOwnMaterial,
                Capability::RateMaterial,
                Capability::UpdateOwnRating,
                Capability::DeleteOwnRating,
                Capability::ReviewMaterial,
                Capability::UpdateOwnReview,
                Capability::DeleteOwnReview,
                Capability::CreateTag,
                Capability::DeleteOwnTag,
                Capability::ChangeOwnPassword,
            ]
            .into_iter()
            .collect(),
        )
    }
}
