//! Role store and identity collaborator seams
//!
//! This module defines the async traits the core reads role data and the
//! acting identity through, plus in-memory implementations suitable for
//! single-process use and testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::actor::{Actor, RoleAssignment};
use crate::role::Role;

/// Role store error types.
#[derive(Debug, Error)]
pub enum RoleStoreError {
    /// A role with this name already exists
    #[error("Role name already exists: {0}")]
    DuplicateName(String),

    /// Role not found
    #[error("Role not found: {0}")]
    RoleNotFound(Uuid),

    /// Backend failure
    #[error("Store error: {0}")]
    Backend(String),
}

/// Result type for role store operations.
pub type RoleStoreResult<T> = Result<T, RoleStoreError>;

/// Supplies the current acting identity.
///
/// The session layer implements this; the core never authenticates, it
/// only authorizes. Every decision function still takes the actor as an
/// explicit parameter, so this seam exists purely for callers that need
/// to resolve "who is asking" at a request boundary.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Get the current actor, or `None` for anonymous callers.
    async fn current_actor(&self) -> Option<Actor>;
}

/// Read and persist roles and role assignments.
///
/// The core calls this for reads; role and assignment edits are reached
/// only through authorized administrative operations.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Load all roles assigned to an actor.
    async fn load_roles(&self, actor_id: Uuid) -> RoleStoreResult<Vec<Role>>;

    /// Find a role by its unique name.
    async fn find_by_name(&self, name: &str) -> RoleStoreResult<Option<Role>>;

    /// Persist a new role. Fails on duplicate name.
    async fn create_role(&self, role: Role) -> RoleStoreResult<()>;

    /// Persist an edited role (capability membership changes).
    async fn update_role(&self, role: Role) -> RoleStoreResult<()>;

    /// Grant a role to an actor.
    async fn assign_role(
        &self,
        actor_id: Uuid,
        role_id: Uuid,
        granted_by: Option<Uuid>,
    ) -> RoleStoreResult<RoleAssignment>;

    /// Revoke a role from an actor.
    ///
    /// Returns `true` if an assignment existed.
    async fn revoke_role(&self, actor_id: Uuid, role_id: Uuid) -> RoleStoreResult<bool>;

    /// Load an actor with its roles resolved.
    async fn load_actor(&self, actor_id: Uuid) -> RoleStoreResult<Actor> {
        let roles = self.load_roles(actor_id).await?;
        Ok(Actor::with_roles(actor_id, roles))
    }
}

/// In-memory role store.
///
/// Suitable for single-process applications and testing. Reads are
/// per-call-fresh: a concurrent role edit is visible to the next
/// decision, exactly like a read-committed relational backend.
#[derive(Default)]
pub struct MemoryRoleStore {
    roles: Arc<RwLock<HashMap<Uuid, Role>>>,
    assignments: Arc<RwLock<Vec<RoleAssignment>>>,
}

impl std::fmt::Debug for MemoryRoleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRoleStore").finish()
    }
}

impl MemoryRoleStore {
    /// Create a new empty in-memory role store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn load_roles(&self, actor_id: Uuid) -> RoleStoreResult<Vec<Role>> {
        let assignments = self.assignments.read().await;
        let roles = self.roles.read().await;
        Ok(assignments
            .iter()
            .filter(|a| a.actor_id == actor_id)
            .filter_map(|a| roles.get(&a.role_id).cloned())
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> RoleStoreResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.values().find(|r| r.name == name).cloned())
    }

    async fn create_role(&self, role: Role) -> RoleStoreResult<()> {
        let mut roles = self.roles.write().await;
        if roles.values().any(|r| r.name == role.name) {
            return Err(RoleStoreError::DuplicateName(role.name));
        }
        roles.insert(role.id, role);
        Ok(())
    }

    async fn update_role(&self, role: Role) -> RoleStoreResult<()> {
        let mut roles = self.roles.write().await;
        if !roles.contains_key(&role.id) {
            return Err(RoleStoreError::RoleNotFound(role.id));
        }
        roles.insert(role.id, role);
        Ok(())
    }

    async fn assign_role(
        &self,
        actor_id: Uuid,
        role_id: Uuid,
        granted_by: Option<Uuid>,
    ) -> RoleStoreResult<RoleAssignment> {
        {
            let roles = self.roles.read().await;
            if !roles.contains_key(&role_id) {
                return Err(RoleStoreError::RoleNotFound(role_id));
            }
        }
        let mut assignments = self.assignments.write().await;
        if let Some(existing) = assignments
            .iter()
            .find(|a| a.actor_id == actor_id && a.role_id == role_id)
        {
            return Ok(existing.clone());
        }
        let mut assignment = RoleAssignment::new(actor_id, role_id);
        if let Some(granter) = granted_by {
            assignment = assignment.with_granter(granter);
        }
        assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn revoke_role(&self, actor_id: Uuid, role_id: Uuid) -> RoleStoreResult<bool> {
        let mut assignments = self.assignments.write().await;
        let before = assignments.len();
        assignments.retain(|a| !(a.actor_id == actor_id && a.role_id == role_id));
        Ok(assignments.len() != before)
    }
}

/// Identity provider returning a fixed actor.
///
/// Useful for tests and for batch jobs that run as a service identity.
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity {
    actor: Option<Actor>,
}

impl FixedIdentity {
    /// An identity provider that always resolves to the given actor.
    pub fn authenticated(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }

    /// An identity provider that always resolves to anonymous.
    pub fn anonymous() -> Self {
        Self { actor: None }
    }
}

#[async_trait]
impl IdentityProvider for FixedIdentity {
    async fn current_actor(&self) -> Option<Actor> {
        self.actor.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capability;

    #[tokio::test]
    async fn test_create_and_find_role() {
        let store = MemoryRoleStore::new();
        store.create_role(Role::contributor()).await.unwrap();

        let found = store.find_by_name("contributor").await.unwrap();
        assert!(found.is_some());
        assert!(store.find_by_name("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_role_rejects_duplicate_name() {
        let store = MemoryRoleStore::new();
        store.create_role(Role::contributor()).await.unwrap();

        let err = store.create_role(Role::contributor()).await.unwrap_err();
        assert!(matches!(err, RoleStoreError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_assign_and_load_roles() {
        let store = MemoryRoleStore::new();
        let role = Role::course_owner();
        let role_id = role.id;
        store.create_role(role).await.unwrap();

        let actor_id = Uuid::now_v7();
        store.assign_role(actor_id, role_id, None).await.unwrap();

        let roles = store.load_roles(actor_id).await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "course_owner");

        let actor = store.load_actor(actor_id).await.unwrap();
        assert!(actor.has_role("course_owner"));
    }

    #[tokio::test]
    async fn test_assign_role_is_idempotent() {
        let store = MemoryRoleStore::new();
        let role = Role::contributor();
        let role_id = role.id;
        store.create_role(role).await.unwrap();

        let actor_id = Uuid::now_v7();
        store.assign_role(actor_id, role_id, None).await.unwrap();
        store.assign_role(actor_id, role_id, None).await.unwrap();

        assert_eq!(store.load_roles(actor_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_assign_unknown_role_fails() {
        let store = MemoryRoleStore::new();
        let err = store
            .assign_role(Uuid::now_v7(), Uuid::now_v7(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, RoleStoreError::RoleNotFound(_)));
    }

    #[tokio::test]
    async fn test_revoke_role() {
        let store = MemoryRoleStore::new();
        let role = Role::contributor();
        let role_id = role.id;
        store.create_role(role).await.unwrap();

        let actor_id = Uuid::now_v7();
        store.assign_role(actor_id, role_id, None).await.unwrap();

        assert!(store.revoke_role(actor_id, role_id).await.unwrap());
        assert!(!store.revoke_role(actor_id, role_id).await.unwrap());
        assert!(store.load_roles(actor_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_role_edit_visible_to_next_read() {
        let store = MemoryRoleStore::new();
        let role = Role::new("librarian", Default::default());
        let role_id = role.id;
        store.create_role(role.clone()).await.unwrap();

        let actor_id = Uuid::now_v7();
        store.assign_role(actor_id, role_id, None).await.unwrap();

        let mut edited = role;
        edited.grant(Capability::CreateTag);
        store.update_role(edited).await.unwrap();

        let roles = store.load_roles(actor_id).await.unwrap();
        assert!(roles[0].has(Capability::CreateTag));
    }

    #[tokio::test]
    async fn test_fixed_identity() {
        let actor = Actor::new(Uuid::now_v7());
        let provider = FixedIdentity::authenticated(actor.clone());
        assert_eq!(provider.current_actor().await, Some(actor));

        assert!(FixedIdentity::anonymous().current_actor().await.is_none());
    }
}
