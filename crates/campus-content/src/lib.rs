//! # Campus Content
//!
//! The content service layer for the Campus study-material sharing
//! platform: courses, materials, ratings, reviews, tags, accounts, and
//! role administration, every mutation gated through one rule table.
//!
//! ## Overview
//!
//! The campus-content crate handles:
//! - **Rule table**: one declaration per (resource kind, operation) of
//!   the access-rule shape that guards it
//! - **Services**: thin per-kind operations that authorize, then touch
//!   their store
//! - **Stores**: the async content and credential persistence seams
//!
//! ## The guard pattern
//!
//! Every service method follows the same three steps:
//!
//! ```text
//! 1. resolve the resource (absent ⇒ NotFound, fails closed)
//! 2. authorize_operation(engine, actor, kind, op, owner)
//! 3. apply the mutation through the store
//! ```
//!
//! The own/any override logic lives in the policy engine and the rule
//! table; no service hand-duplicates an ownership comparison. Material
//! uploads additionally hand the new material to the moderation
//! workflow, which decides between `pending` and auto-approval.

pub mod account;
pub mod course;
pub mod error;
pub mod material;
pub mod rating;
pub mod review;
pub mod roles_admin;
pub mod rules;
pub mod store;
pub mod tag;

// Re-export main types for convenience
pub use account::{AccountService, CredentialStore, MemoryCredentialStore};
pub use course::{Course, CourseService};
pub use error::{ContentError, ContentResult};
pub use material::{Material, MaterialService};
pub use rating::{Rating, RatingService};
pub use review::{Review, ReviewService};
pub use roles_admin::RoleAdminService;
pub use rules::{authorize_operation, rule_for, Operation};
pub use store::{ContentStore, MemoryContentStore};
pub use tag::{Tag, TagService};
