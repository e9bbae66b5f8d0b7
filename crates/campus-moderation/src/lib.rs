//! # Campus Moderation
//!
//! The moderation workflow for materials submitted into courses on the
//! Campus platform.
//!
//! ## Overview
//!
//! The campus-moderation crate handles:
//! - **Status**: the `pending → approved | rejected` state machine
//! - **Submissions**: one material entering one course, with distinct
//!   uploader and course-owner identities
//! - **Store**: the async persistence seam with compare-and-set
//!   transition semantics
//! - **Service**: the workflow gating every transition through the
//!   policy engine
//!
//! ## Workflow
//!
//! ```text
//! submit(material, uploader, course_owner)
//!   ├─ uploader == course_owner ──▶ Approved   (auto)
//!   └─ otherwise ─────────────────▶ Pending
//!                                      ├─ approve(course_owner) ─▶ Approved
//!                                      └─ reject(course_owner) ──▶ Rejected
//! ```
//!
//! Approval is owner-only: it takes the `approve_material` capability
//! plus ownership of the receiving course, and no `Any`-scoped
//! capability substitutes for the ownership match. Terminal states stay
//! terminal; a second decision reports "already decided" rather than
//! "not allowed".

pub mod error;
pub mod service;
pub mod status;
pub mod store;
pub mod submission;

// Re-export main types for convenience
pub use error::{ModerationError, ModerationResult};
pub use service::ModerationService;
pub use status::ModerationStatus;
pub use store::{MemorySubmissionStore, ModerationStore};
pub use submission::Submission;
