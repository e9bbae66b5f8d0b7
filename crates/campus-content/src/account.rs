//! Account credential service
//!
//! Password hashing itself is an external concern; this service stores
//! whatever opaque hash the authentication layer produced. What belongs
//! to this core is the gate in front of the write: changing a password
//! is the strictest rule in the platform, a literal identity match that
//! no administrative capability overrides.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use campus_policy::PolicyEngine;
use campus_rbac::{Actor, ResourceKind};

use crate::error::ContentResult;
use crate::rules::{authorize_operation, Operation};

/// Persist account credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Replace the stored password hash for an account.
    async fn set_password_hash(&self, account_id: Uuid, hash: String) -> ContentResult<()>;

    /// Fetch the stored password hash for an account.
    async fn password_hash(&self, account_id: Uuid) -> ContentResult<Option<String>>;
}

/// In-memory credential store for single-process use and testing.
#[derive(Default)]
pub struct MemoryCredentialStore {
    hashes: Arc<RwLock<HashMap<Uuid, String>>>,
}

impl std::fmt::Debug for MemoryCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCredentialStore").finish()
    }
}

impl MemoryCredentialStore {
    /// Create a new empty in-memory credential store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn set_password_hash(&self, account_id: Uuid, hash: String) -> ContentResult<()> {
        let mut hashes = self.hashes.write().await;
        hashes.insert(account_id, hash);
        Ok(())
    }

    async fn password_hash(&self, account_id: Uuid) -> ContentResult<Option<String>> {
        let hashes = self.hashes.read().await;
        Ok(hashes.get(&account_id).cloned())
    }
}

/// Account operations.
pub struct AccountService {
    engine: PolicyEngine,
    store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish()
    }
}

impl AccountService {
    /// Create an account service.
    pub fn new(engine: PolicyEngine, store: Arc<dyn CredentialStore>) -> Self {
        Self { engine, store }
    }

    /// Change an account's password.
    ///
    /// Owner-only: the acting user must be the account holder, and the
    /// rule has no `Any` escape hatch. An administrator asking to reset
    /// someone's password goes through a recovery flow outside this
    /// core, never through here.
    ///
    /// # Arguments
    ///
    /// * `actor` - The acting identity
    /// * `account_id` - The account whose password changes
    /// * `password_hash` - The already-hashed new secret
    pub async fn change_password(
        &self,
        actor: &Actor,
        account_id: Uuid,
        password_hash: String,
    ) -> ContentResult<()> {
        authorize_operation(
            &self.engine,
            Some(actor),
            ResourceKind::Account,
            Operation::ChangePassword,
            Some(account_id),
        )?;
        self.store.set_password_hash(account_id, password_hash).await?;
        tracing::info!(account = %account_id, "password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;
    use campus_rbac::Role;

    fn service() -> (AccountService, Arc<MemoryCredentialStore>) {
        let store = Arc::new(MemoryCredentialStore::new());
        (
            AccountService::new(PolicyEngine::new(), store.clone()),
            store,
        )
    }

    #[tokio::test]
    async fn test_actor_changes_own_password() {
        let (service, store) = service();
        let actor = Actor::with_roles(Uuid::now_v7(), vec![Role::contributor()]);

        service
            .change_password(&actor, actor.id, "argon2id$v=19$...".to_string())
            .await
            .unwrap();
        assert!(store.password_hash(actor.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_admin_cannot_change_foreign_password() {
        let (service, store) = service();
        let admin = Actor::with_roles(Uuid::now_v7(), vec![Role::administrator()]);
        let victim = Uuid::now_v7();

        let err = service
            .change_password(&admin, victim, "pwned".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Forbidden(_)));
        assert!(store.password_hash(victim).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_zero_role_actor_still_owns_their_password() {
        // change_own_password is granted by every archetype, but a
        // zero-role actor holds no roles at all, so even the identity
        // match cannot save the missing capability.
        let (service, _) = service();
        let nobody = Actor::new(Uuid::now_v7());

        let err = service
            .change_password(&nobody, nobody.id, "hash".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Forbidden(_)));
    }
}
