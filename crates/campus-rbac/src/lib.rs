//! # Campus RBAC
//!
//! Capability catalog and role management for the Campus study-material
//! sharing platform.
//!
//! ## Overview
//!
//! The campus-rbac crate handles:
//! - **Capabilities**: the closed catalog of named permissions
//! - **Roles**: named capability bundles, including the three seeded
//!   archetypes (administrator, course owner, contributor)
//! - **Actors**: identities holding roles, with effective-capability
//!   resolution
//! - **Stores**: the async role-store and identity collaborator seams
//!
//! ## Architecture
//!
//! ```text
//! Actor
//!   └─ RoleAssignment ─→ Role
//!                          └─ CapabilitySet { Capability, ... }
//!
//! effective_capabilities(actor) = ∪ role.capabilities + ReadResources
//! ```
//!
//! ## Ownership scopes
//!
//! Capabilities that touch existing resources come in `Own`/`Any`
//! variants (e.g. `update_own_material` / `update_any_material`). The
//! policy engine in `campus-policy` combines these with the ownership
//! check; this crate only models the catalog.
//!
//! ## Universal read
//!
//! Exactly one capability, `read_resources`, is universal: every actor
//! holds it, anonymous visitors and zero-role actors included. It is a
//! fixed predicate checked before roles are consulted and is never
//! seeded into a role's capability set.
//!
//! ## Usage
//!
//! ```rust
//! use campus_rbac::{Actor, Capability, Role};
//! use uuid::Uuid;
//!
//! let teacher = Actor::with_roles(Uuid::now_v7(), vec![Role::course_owner()]);
//! let caps = teacher.effective_capabilities();
//! assert!(caps.contains(Capability::ApproveMaterial));
//! ```

pub mod actor;
pub mod capability;
pub mod resource;
pub mod role;
pub mod seed;
pub mod store;

// Re-export main types for convenience
pub use actor::{Actor, RoleAssignment};
pub use capability::{Capability, CapabilitySet, OwnershipScope, UnknownCapability};
pub use resource::ResourceKind;
pub use role::{Role, ADMINISTRATOR, CONTRIBUTOR, COURSE_OWNER};
pub use seed::{seed_archetypes, SeedError, SeedReport};
pub use store::{
    FixedIdentity, IdentityProvider, MemoryRoleStore, RoleStore, RoleStoreError, RoleStoreResult,
};
