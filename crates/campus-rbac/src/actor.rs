//! # Actors
//!
//! An actor is an authenticated identity holding zero or more roles.
//! Its effective capability set is the union of its roles' capabilities
//! plus the universal read capability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capability::{Capability, CapabilitySet};
use crate::role::Role;

/// An authenticated identity evaluated by the policy engine.
///
/// Actors hold a set of roles (the many-roles model: an actor may be
/// both a course owner and an administrator). Identity is id equality:
/// two independently loaded representations of the same actor compare
/// equal by id, never by pointer.
///
/// # Examples
///
/// ```
/// use campus_rbac::{Actor, Capability, Role};
/// use uuid::Uuid;
///
/// let actor = Actor::with_roles(Uuid::now_v7(), vec![Role::contributor()]);
/// let caps = actor.effective_capabilities();
/// assert!(caps.contains(Capability::UploadMaterial));
/// assert!(caps.contains(Capability::ReadResources));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Unique actor ID
    pub id: Uuid,

    /// Roles held by this actor
    pub roles: Vec<Role>,
}

impl Actor {
    /// Creates an actor with no roles.
    ///
    /// A role-less actor still holds the universal read capability.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            roles: Vec::new(),
        }
    }

    /// Creates an actor holding the given roles.
    pub fn with_roles(id: Uuid, roles: Vec<Role>) -> Self {
        Self { id, roles }
    }

    /// Add a role to this actor. Duplicate role ids are ignored.
    pub fn add_role(&mut self, role: Role) {
        if !self.roles.iter().any(|r| r.id == role.id) {
            self.roles.push(role);
        }
    }

    /// Remove a role by id.
    ///
    /// # Returns
    ///
    /// `true` if the role was held, `false` otherwise
    pub fn remove_role(&mut self, role_id: Uuid) -> bool {
        let before = self.roles.len();
        self.roles.retain(|r| r.id != role_id);
        self.roles.len() != before
    }

    /// Check if the actor holds a role by name.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }

    /// Resolve the actor's effective capability set.
    ///
    /// The union over all held roles, plus the universal
    /// [`Capability::ReadResources`]. The result is a snapshot: roles can
    /// be edited concurrently by administrators, so it is only valid for
    /// the duration of the call and must not be cached.
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_rbac::{Actor, Capability};
    /// use uuid::Uuid;
    ///
    /// let nobody = Actor::new(Uuid::now_v7());
    /// let caps = nobody.effective_capabilities();
    /// assert!(caps.contains(Capability::ReadResources));
    /// assert_eq!(caps.len(), 1);
    /// ```
    pub fn effective_capabilities(&self) -> CapabilitySet {
        let mut effective = CapabilitySet::new();
        for role in &self.roles {
            effective.merge(&role.capabilities);
        }
        effective.add(Capability::ReadResources);
        effective
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Actor {}

/// A grant linking an actor to a role.
///
/// Kept as its own record so the store can answer "who granted this,
/// and when" without loading the role definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Unique assignment ID
    pub id: Uuid,

    /// The actor the role is granted to
    pub actor_id: Uuid,

    /// The granted role
    pub role_id: Uuid,

    /// When the role was granted
    pub granted_at: DateTime<Utc>,

    /// Who granted it (if applicable)
    pub granted_by: Option<Uuid>,
}

impl RoleAssignment {
    /// Creates a new role assignment.
    pub fn new(actor_id: Uuid, role_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            actor_id,
            role_id,
            granted_at: Utc::now(),
            granted_by: None,
        }
    }

    /// Set who granted this role.
    pub fn with_granter(mut self, granter_id: Uuid) -> Self {
        self.granted_by = Some(granter_id);
        self
    }
}
