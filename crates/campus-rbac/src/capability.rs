//! # Capabilities
//!
//! The closed catalog of named permissions for the Campus platform.
//! A capability is a single grantable permission; roles bundle
//! capabilities and actors hold roles.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::resource::ResourceKind;

/// Ownership scope of a capability.
///
/// Capabilities that operate on existing resources come in two scoped
/// variants:
/// - **Own**: only valid on resources the actor owns
/// - **Any**: valid on every resource of the kind, regardless of owner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipScope {
    /// Scoped to resources owned by the acting user.
    Own,
    /// Applies to any resource of the kind.
    Any,
}

/// A capability name outside the closed catalog.
///
/// Unknown names are a configuration error and always fail closed:
/// they never grant access and are never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown capability name `{0}`")]
pub struct UnknownCapability(pub String);

/// A single named permission from the closed catalog.
///
/// The catalog is fixed at compile time; there is no runtime mutation of
/// the set of known names. Capabilities with an `Own`/`Any` qualifier
/// participate in the ownership override pattern, all others are plain
/// capability checks.
///
/// `ReadResources` is universal: every actor holds it, including actors
/// with no roles at all. It is checked as a fixed predicate by the policy
/// engine and is deliberately never seeded into role capability sets.
///
/// # Example
///
/// ```
/// use campus_rbac::Capability;
///
/// let cap = Capability::DeleteAnyMaterial;
/// assert_eq!(cap.as_str(), "delete_any_material");
/// assert_eq!(Capability::parse("delete_any_material"), Some(cap));
/// assert_eq!(Capability::parse("launch_missiles"), None);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Browse and view resources. Universal: held by every actor,
    /// anonymous visitors included.
    ReadResources,

    /// Create a new course.
    CreateCourse,
    /// Update a course owned by the acting user.
    UpdateOwnCourse,
    /// Update any course.
    UpdateAnyCourse,
    /// Delete a course owned by the acting user.
    DeleteOwnCourse,
    /// Delete any course.
    DeleteAnyCourse,

    /// Upload a material into a course.
    UploadMaterial,
    /// Update a material owned by the acting user.
    UpdateOwnMaterial,
    /// Update any material.
    UpdateAnyMaterial,
    /// Delete a material owned by the acting user.
    DeleteOwnMaterial,
    /// Delete any material.
    DeleteAnyMaterial,
    /// Decide the fate of a material submitted into an owned course.
    ApproveMaterial,

    /// Rate a material.
    RateMaterial,
    /// Update a rating owned by the acting user.
    UpdateOwnRating,
    /// Delete a rating owned by the acting user.
    DeleteOwnRating,
    /// Delete any rating.
    DeleteAnyRating,

    /// Write a review for a material.
    ReviewMaterial,
    /// Update a review owned by the acting user.
    UpdateOwnReview,
    /// Delete a review owned by the acting user.
    DeleteOwnReview,
    /// Delete any review.
    DeleteAnyReview,

    /// Create a tag.
    CreateTag,
    /// Delete a tag owned by the acting user.
    DeleteOwnTag,
    /// Delete any tag.
    DeleteAnyTag,

    /// Change the acting user's own password. Never delegated, not even
    /// to administrators.
    ChangeOwnPassword,
    /// Edit role capability sets.
    ManageRoles,
    /// Grant and revoke role assignments.
    AssignRoles,
}

impl Capability {
    /// Get the string representation of the capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ReadResources => "read_resources",
            Capability::CreateCourse => "create_course",
            Capability::UpdateOwnCourse => "update_own_course",
            Capability::UpdateAnyCourse => "update_any_course",
            Capability::DeleteOwnCourse => "delete_own_course",
            Capability::DeleteAnyCourse => "delete_any_course",
            Capability::UploadMaterial => "upload_material",
            Capability::UpdateOwnMaterial => "update_own_material",
            Capability::UpdateAnyMaterial => "update_any_material",
            Capability::DeleteOwnMaterial => "delete_own_material",
            Capability::DeleteAnyMaterial => "delete_any_material",
            Capability::ApproveMaterial => "approve_material",
            Capability::RateMaterial => "rate_material",
            Capability::UpdateOwnRating => "update_own_rating",
            Capability::DeleteOwnRating => "delete_own_rating",
            Capability::DeleteAnyRating => "delete_any_rating",
            Capability::ReviewMaterial => "review_material",
            Capability::UpdateOwnReview => "update_own_review",
            Capability::DeleteOwnReview => "delete_own_review",
            Capability::DeleteAnyReview => "delete_any_review",
            Capability::CreateTag => "create_tag",
            Capability::DeleteOwnTag => "delete_own_tag",
            Capability::DeleteAnyTag => "delete_any_tag",
            Capability::ChangeOwnPassword => "change_own_password",
            Capability::ManageRoles => "manage_roles",
            Capability::AssignRoles => "assign_roles",
        }
    }

    /// Parse a capability from its string representation.
    ///
    /// Parsing is case-insensitive but closed: names outside the catalog
    /// yield `None`. Callers at configuration boundaries must treat
    /// `None` as an error, never as an empty grant.
    ///
    /// # Example
    ///
    /// ```
    /// use campus_rbac::Capability;
    ///
    /// assert_eq!(Capability::parse("APPROVE_MATERIAL"), Some(Capability::ApproveMaterial));
    /// assert_eq!(Capability::parse("approve_material"), Some(Capability::ApproveMaterial));
    /// assert_eq!(Capability::parse("approve_materials"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.to_lowercase();
        Self::all().into_iter().find(|cap| cap.as_str() == lowered)
    }

    /// Get all capabilities in the catalog.
    pub fn all() -> Vec<Self> {
        vec![
            Capability::ReadResources,
            Capability::CreateCourse,
            Capability::UpdateOwnCourse,
            Capability::UpdateAnyCourse,
            Capability::DeleteOwnCourse,
            Capability::DeleteAnyCourse,
            Capability::UploadMaterial,
            Capability::UpdateOwnMaterial,
            Capability::UpdateAnyMaterial,
            Capability::DeleteOwnMaterial,
            Capability::DeleteAnyMaterial,
            Capability::ApproveMaterial,
            Capability::RateMaterial,
            Capability::UpdateOwnRating,
            Capability::DeleteOwnRating,
            Capability::DeleteAnyRating,
            Capability::ReviewMaterial,
            Capability::UpdateOwnReview,
            Capability::DeleteOwnReview,
            Capability::DeleteAnyReview,
            Capability::CreateTag,
            Capability::DeleteOwnTag,
            Capability::DeleteAnyTag,
            Capability::ChangeOwnPassword,
            Capability::ManageRoles,
            Capability::AssignRoles,
        ]
    }

    /// Check whether this capability is held by every actor regardless
    /// of role membership.
    pub fn is_universal(&self) -> bool {
        matches!(self, Capability::ReadResources)
    }

    /// Get the ownership scope of the capability, if it has one.
    ///
    /// # Example
    ///
    /// ```
    /// use campus_rbac::{Capability, OwnershipScope};
    ///
    /// assert_eq!(Capability::UpdateOwnCourse.scope(), Some(OwnershipScope::Own));
    /// assert_eq!(Capability::DeleteAnyRating.scope(), Some(OwnershipScope::Any));
    /// assert_eq!(Capability::CreateCourse.scope(), None);
    /// ```
    pub fn scope(&self) -> Option<OwnershipScope> {
        match self {
            Capability::UpdateOwnCourse
            | Capability::DeleteOwnCourse
            | Capability::UpdateOwnMaterial
            | Capability::DeleteOwnMaterial
            | Capability::UpdateOwnRating
            | Capability::DeleteOwnRating
            | Capability::UpdateOwnReview
            | Capability::DeleteOwnReview
            | Capability::DeleteOwnTag
            | Capability::ChangeOwnPassword => Some(OwnershipScope::Own),
            Capability::UpdateAnyCourse
            | Capability::DeleteAnyCourse
            | Capability::UpdateAnyMaterial
            | Capability::DeleteAnyMaterial
            | Capability::DeleteAnyRating
            | Capability::DeleteAnyReview
            | Capability::DeleteAnyTag => Some(OwnershipScope::Any),
            _ => None,
        }
    }

    /// Get the `Any`-scoped counterpart of an `Own`-scoped capability.
    ///
    /// Capabilities without a counterpart (including the strictly
    /// owner-bound ones like `ChangeOwnPassword`) return `None`.
    pub fn any_variant(&self) -> Option<Self> {
        match self {
            Capability::UpdateOwnCourse => Some(Capability::UpdateAnyCourse),
            Capability::DeleteOwnCourse => Some(Capability::DeleteAnyCourse),
            Capability::UpdateOwnMaterial => Some(Capability::UpdateAnyMaterial),
            Capability::DeleteOwnMaterial => Some(Capability::DeleteAnyMaterial),
            Capability::DeleteOwnRating => Some(Capability::DeleteAnyRating),
            Capability::DeleteOwnReview => Some(Capability::DeleteAnyReview),
            Capability::DeleteOwnTag => Some(Capability::DeleteAnyTag),
            _ => None,
        }
    }

    /// Get the `Own`-scoped counterpart of an `Any`-scoped capability.
    pub fn own_variant(&self) -> Option<Self> {
        match self {
            Capability::UpdateAnyCourse => Some(Capability::UpdateOwnCourse),
            Capability::DeleteAnyCourse => Some(Capability::DeleteOwnCourse),
            Capability::UpdateAnyMaterial => Some(Capability::UpdateOwnMaterial),
            Capability::DeleteAnyMaterial => Some(Capability::DeleteOwnMaterial),
            Capability::DeleteAnyRating => Some(Capability::DeleteOwnRating),
            Capability::DeleteAnyReview => Some(Capability::DeleteOwnReview),
            Capability::DeleteAnyTag => Some(Capability::DeleteOwnTag),
            _ => None,
        }
    }

    /// Get the resource kind this capability operates on.
    ///
    /// `ReadResources` spans every kind and returns `None`.
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        match self {
            Capability::ReadResources => None,
            Capability::CreateCourse
            | Capability::UpdateOwnCourse
            | Capability::UpdateAnyCourse
            | Capability::DeleteOwnCourse
            | Capability::DeleteAnyCourse => Some(ResourceKind::Course),
            Capability::UploadMaterial
            | Capability::UpdateOwnMaterial
            | Capability::UpdateAnyMaterial
            | Capability::DeleteOwnMaterial
            | Capability::DeleteAnyMaterial
            | Capability::ApproveMaterial => Some(ResourceKind::Material),
            Capability::RateMaterial
            | Capability::UpdateOwnRating
            | Capability::DeleteOwnRating
            | Capability::DeleteAnyRating => Some(ResourceKind::Rating),
            Capability::ReviewMaterial
            | Capability::UpdateOwnReview
            | Capability::DeleteOwnReview
            | Capability::DeleteAnyReview => Some(ResourceKind::Review),
            Capability::CreateTag | Capability::DeleteOwnTag | Capability::DeleteAnyTag => {
                Some(ResourceKind::Tag)
            }
            Capability::ChangeOwnPassword => Some(ResourceKind::Account),
            Capability::ManageRoles | Capability::AssignRoles => Some(ResourceKind::Role),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of capabilities, as carried by a role.
///
/// # Example
///
/// ```
/// use campus_rbac::{Capability, CapabilitySet};
///
/// let mut set = CapabilitySet::new();
/// set.add(Capability::CreateCourse);
/// set.add(Capability::UploadMaterial);
///
/// assert!(set.contains(Capability::CreateCourse));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapabilitySet {
    capabilities: HashSet<Capability>,
}

impl CapabilitySet {
    /// Create a new empty capability set.
    pub fn new() -> Self {
        Self {
            capabilities: HashSet::new(),
        }
    }

    /// Add a capability to the set.
    pub fn add(&mut self, capability: Capability) {
        self.capabilities.insert(capability);
    }

    /// Add multiple capabilities to the set.
    pub fn add_all<I>(&mut self, capabilities: I)
    where
        I: IntoIterator<Item = Capability>,
    {
        self.capabilities.extend(capabilities);
    }

    /// Remove a capability from the set.
    ///
    /// # Returns
    ///
    /// `true` if the capability was present, `false` otherwise
    pub fn remove(&mut self, capability: Capability) -> bool {
        self.capabilities.remove(&capability)
    }

    /// Check if the set contains a capability.
    ///
    /// This is exact membership. The universal `ReadResources` predicate
    /// lives in the policy engine, not here: a set that was never granted
    /// `ReadResources` does not contain it.
    pub fn contains(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Merge another capability set into this one.
    pub fn merge(&mut self, other: &CapabilitySet) {
        self.capabilities.extend(other.capabilities.iter().copied());
    }

    /// Get all capabilities in the set.
    pub fn all(&self) -> Vec<Capability> {
        self.capabilities.iter().copied().collect()
    }

    /// Get the count of capabilities.
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Clear all capabilities.
    pub fn clear(&mut self) {
        self.capabilities.clear();
    }

    /// Create from a list of capability names.
    ///
    /// Unlike a lenient parse, an unknown name is an error: grants read
    /// from configuration must fail closed rather than quietly shrink.
    ///
    /// # Example
    ///
    /// ```
    /// use campus_rbac::CapabilitySet;
    ///
    /// let set = CapabilitySet::from_names(&["create_course", "upload_material"]).unwrap();
    /// assert_eq!(set.len(), 2);
    ///
    /// assert!(CapabilitySet::from_names(&["create_course", "typo"]).is_err());
    /// ```
    pub fn from_names(names: &[&str]) -> Result<Self, UnknownCapability> {
        let mut set = Self::new();
        for name in names {
            match Capability::parse(name) {
                Some(cap) => set.add(cap),
                None => return Err(UnknownCapability((*name).to_string())),
            }
        }
        Ok(set)
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        let mut set = CapabilitySet::new();
        set.add_all(iter);
        set
    }
}
