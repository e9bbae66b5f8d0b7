//! Role administration service
//!
//! Administrators edit role capability sets and grant roles to actors.
//! Both paths run through the same rule table as every other mutation:
//! `manage_roles` for capability edits, `assign_roles` for grants.

use std::sync::Arc;
use uuid::Uuid;

use campus_policy::PolicyEngine;
use campus_rbac::{Actor, Capability, ResourceKind, Role, RoleAssignment, RoleStore};

use crate::error::{ContentError, ContentResult};
use crate::rules::{authorize_operation, Operation};

/// Role administration operations.
pub struct RoleAdminService {
    engine: PolicyEngine,
    store: Arc<dyn RoleStore>,
}

impl std::fmt::Debug for RoleAdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleAdminService").finish()
    }
}

impl RoleAdminService {
    /// Create a role administration service.
    pub fn new(engine: PolicyEngine, store: Arc<dyn RoleStore>) -> Self {
        Self { engine, store }
    }

    /// Grant a capability to a role.
    pub async fn grant_capability(
        &self,
        actor: &Actor,
        role_name: &str,
        capability: Capability,
    ) -> ContentResult<Role> {
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Role,
            Operation::Update,
            None,
        )?;
        let mut role = self.find_role(role_name).await?;
        role.grant(capability);
        self.store.update_role(role.clone()).await?;
        tracing::info!(role = %role.name, capability = %capability, granted_by = %actor.id, "capability granted");
        Ok(role)
    }

    /// Revoke a capability from a role.
    pub async fn revoke_capability(
        &self,
        actor: &Actor,
        role_name: &str,
        capability: Capability,
    ) -> ContentResult<Role> {
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Role,
            Operation::Update,
            None,
        )?;
        let mut role = self.find_role(role_name).await?;
        role.revoke(capability);
        self.store.update_role(role.clone()).await?;
        tracing::info!(role = %role.name, capability = %capability, revoked_by = %actor.id, "capability revoked");
        Ok(role)
    }

    /// Grant a role to an actor.
    pub async fn assign_role(
        &self,
        actor: &Actor,
        target_actor_id: Uuid,
        role_name: &str,
    ) -> ContentResult<RoleAssignment> {
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Role,
            Operation::Assign,
            None,
        )?;
        let role = self.find_role(role_name).await?;
        let assignment = self
            .store
            .assign_role(target_actor_id, role.id, Some(actor.id))
            .await?;
        tracing::info!(role = %role.name, actor = %target_actor_id, granted_by = %actor.id, "role assigned");
        Ok(assignment)
    }

    /// Revoke a role from an actor.
    pub async fn revoke_role(
        &self,
        actor: &Actor,
        target_actor_id: Uuid,
        role_name: &str,
    ) -> ContentResult<bool> {
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Role,
            Operation::Assign,
            None,
        )?;
        let role = self.find_role(role_name).await?;
        Ok(self.store.revoke_role(target_actor_id, role.id).await?)
    }

    async fn find_role(&self, role_name: &str) -> ContentResult<Role> {
        self.store
            .find_by_name(role_name)
            .await?
            .ok_or_else(|| ContentError::NotFound {
                kind: ResourceKind::Role,
                // No uuid to report; the name failed to resolve
                id: Uuid::nil(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_rbac::{seed_archetypes, MemoryRoleStore, CONTRIBUTOR};

    async fn fixture() -> (RoleAdminService, Arc<MemoryRoleStore>) {
        let store = Arc::new(MemoryRoleStore::new());
        seed_archetypes(store.as_ref()).await.unwrap();
        (
            RoleAdminService::new(PolicyEngine::new(), store.clone()),
            store,
        )
    }

    fn admin() -> Actor {
        Actor::with_roles(Uuid::now_v7(), vec![Role::administrator()])
    }

    #[tokio::test]
    async fn test_admin_edits_role_capabilities() {
        let (service, store) = fixture().await;
        let actor = admin();

        service
            .grant_capability(&actor, CONTRIBUTOR, Capability::CreateCourse)
            .await
            .unwrap();
        let role = store.find_by_name(CONTRIBUTOR).await.unwrap().unwrap();
        assert!(role.has(Capability::CreateCourse));

        service
            .revoke_capability(&actor, CONTRIBUTOR, Capability::CreateCourse)
            .await
            .unwrap();
        let role = store.find_by_name(CONTRIBUTOR).await.unwrap().unwrap();
        assert!(!role.has(Capability::CreateCourse));
    }

    #[tokio::test]
    async fn test_teacher_cannot_edit_roles() {
        let (service, _) = fixture().await;
        let teacher = Actor::with_roles(Uuid::now_v7(), vec![Role::course_owner()]);

        let err = service
            .grant_capability(&teacher, CONTRIBUTOR, Capability::CreateCourse)
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_admin_assigns_and_revokes_roles() {
        let (service, store) = fixture().await;
        let actor = admin();
        let target = Uuid::now_v7();

        let assignment = service
            .assign_role(&actor, target, CONTRIBUTOR)
            .await
            .unwrap();
        assert_eq!(assignment.granted_by, Some(actor.id));

        let loaded = store.load_actor(target).await.unwrap();
        assert!(loaded.has_role(CONTRIBUTOR));

        assert!(service.revoke_role(&actor, target, CONTRIBUTOR).await.unwrap());
        let loaded = store.load_actor(target).await.unwrap();
        assert!(!loaded.has_role(CONTRIBUTOR));
    }

    #[tokio::test]
    async fn test_unknown_role_name_is_not_found() {
        let (service, _) = fixture().await;
        let err = service
            .assign_role(&admin(), Uuid::now_v7(), "superuser")
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound { .. }));
    }
}
