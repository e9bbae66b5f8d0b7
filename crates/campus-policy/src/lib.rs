//! # Campus Policy
//!
//! The policy decision engine for the Campus study-material sharing
//! platform: the single point every mutating operation consults before
//! touching a store.
//!
//! ## Overview
//!
//! The campus-policy crate handles:
//! - **Access rules**: the three decision shapes an operation can
//!   declare (capability-only, own-or-any, owner-only)
//! - **Decisions**: pure allow/deny evaluation with typed denial reasons
//! - **Errors**: the `Forbidden` / `UnknownCapability` taxonomy
//! - **Observation**: an optional hook reporting every decision
//!
//! ## Decision shapes
//!
//! ```text
//! Capability(c)            c ∈ effective(actor)
//! OwnOrAny { own, any }    any ∈ effective(actor)
//!                          ∨ (own ∈ effective(actor) ∧ actor.id == owner)
//! OwnerOnly(c)             c ∈ effective(actor) ∧ actor.id == owner
//! ```
//!
//! `OwnerOnly` is deliberately not a degenerate `OwnOrAny`: no
//! capability, however broad, substitutes for the identity match.
//!
//! ## Usage
//!
//! ```rust
//! use campus_policy::{AccessRule, PolicyEngine};
//! use campus_rbac::{Actor, Capability, Role};
//! use uuid::Uuid;
//!
//! let engine = PolicyEngine::new();
//! let admin = Actor::with_roles(Uuid::now_v7(), vec![Role::administrator()]);
//!
//! // Any-scoped capabilities ignore ownership
//! let delete = AccessRule::paired(Capability::DeleteOwnMaterial).unwrap();
//! let someone_else = Uuid::now_v7();
//! assert!(engine.evaluate(Some(&admin), delete, Some(someone_else)).is_allowed());
//!
//! // Owner-only rules do not yield, administrators included
//! let password = AccessRule::OwnerOnly(Capability::ChangeOwnPassword);
//! assert!(!engine.evaluate(Some(&admin), password, Some(someone_else)).is_allowed());
//! ```

pub mod engine;
pub mod error;
pub mod observer;
pub mod rule;

// Re-export main types for convenience
pub use engine::{Decision, DecisionRecord, DenialReason, PolicyEngine};
pub use error::{AccessError, AccessResult};
pub use observer::{DecisionObserver, TracingObserver};
pub use rule::AccessRule;
