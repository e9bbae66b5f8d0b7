//! Archetype role seeding
//!
//! First-run bootstrap: create the administrator, course-owner, and
//! contributor roles exactly once. Safe to run on every startup.

use thiserror::Error;

use crate::role::Role;
use crate::store::{RoleStore, RoleStoreError};

/// Seeding error types.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The role store failed
    #[error("Seeding failed: {0}")]
    Store(#[from] RoleStoreError),
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    /// Names of roles created by this run
    pub created: Vec<String>,
    /// Names of roles that already existed
    pub existing: Vec<String>,
}

impl SeedReport {
    /// Check whether this run created anything.
    pub fn seeded_anything(&self) -> bool {
        !self.created.is_empty()
    }
}

/// Seed the three archetype roles idempotently.
///
/// Each archetype is created only if no role with its name exists. A
/// concurrent seeder losing the create race is treated as "already
/// present", so two instances starting at once both succeed.
///
/// # Arguments
///
/// * `store` - The role store to seed into
///
/// # Returns
///
/// A [`SeedReport`] listing created and pre-existing archetypes.
pub async fn seed_archetypes(store: &dyn RoleStore) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    for role in [
        Role::administrator(),
        Role::course_owner(),
        Role::contributor(),
    ] {
        let name = role.name.clone();
        if store.find_by_name(&name).await?.is_some() {
            tracing::debug!(role = %name, "archetype role already present");
            report.existing.push(name);
            continue;
        }
        match store.create_role(role).await {
            Ok(()) => {
                tracing::info!(role = %name, "seeded archetype role");
                report.created.push(name);
            }
            // Lost a create race to a concurrent seeder
            Err(RoleStoreError::DuplicateName(_)) => report.existing.push(name),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(report)
}
