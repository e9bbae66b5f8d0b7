//! # Access rules
//!
//! An access rule declares, for one operation, which decision shape the
//! policy engine applies. Declaring the shape once per operation (rather
//! than hand-composing capability and ownership checks at every call
//! site) is what keeps a strict-ownership action from accidentally
//! growing an "any" escape hatch.

use serde::{Deserialize, Serialize};

use campus_rbac::Capability;

/// The decision shape for a single operation.
///
/// Three shapes exist and all three must stay representable:
///
/// - [`AccessRule::Capability`]: plain capability check, no ownership
///   concept (creating a course, creating a tag).
/// - [`AccessRule::OwnOrAny`]: the ownership override pattern. Granted
///   when the actor holds the `own` capability AND owns the resource, or
///   holds the `any` capability regardless of ownership.
/// - [`AccessRule::OwnerOnly`]: strict ownership plus capability. No
///   `any` override exists; an administrator's `Any`-scoped capabilities
///   do not reach these operations.
///
/// # Examples
///
/// ```
/// use campus_policy::AccessRule;
/// use campus_rbac::Capability;
///
/// let update = AccessRule::own_or_any(
///     Capability::UpdateOwnMaterial,
///     Capability::UpdateAnyMaterial,
/// );
/// assert!(update.needs_owner());
///
/// let create = AccessRule::Capability(Capability::CreateCourse);
/// assert!(!create.needs_owner());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccessRule {
    /// Plain capability check; the operation has no owner.
    Capability(Capability),

    /// Own-with-ownership or any-regardless-of-ownership.
    OwnOrAny {
        /// Granted together with an ownership match.
        own: Capability,
        /// Granted regardless of ownership.
        any: Capability,
    },

    /// Capability plus a literal identity match, never delegated.
    OwnerOnly(Capability),
}

impl AccessRule {
    /// Build an own-or-any rule.
    pub fn own_or_any(own: Capability, any: Capability) -> Self {
        AccessRule::OwnOrAny { own, any }
    }

    /// Build an own-or-any rule from an `Own`-scoped capability and its
    /// catalog counterpart.
    ///
    /// Returns `None` when the capability has no `Any` counterpart;
    /// those operations are owner-only by construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_policy::AccessRule;
    /// use campus_rbac::Capability;
    ///
    /// let rule = AccessRule::paired(Capability::DeleteOwnRating).unwrap();
    /// assert_eq!(
    ///     rule,
    ///     AccessRule::own_or_any(Capability::DeleteOwnRating, Capability::DeleteAnyRating),
    /// );
    ///
    /// // No any-variant exists for password changes
    /// assert!(AccessRule::paired(Capability::ChangeOwnPassword).is_none());
    /// ```
    pub fn paired(own: Capability) -> Option<Self> {
        own.any_variant().map(|any| AccessRule::OwnOrAny { own, any })
    }

    /// Whether evaluating this rule requires a resolved resource owner.
    pub fn needs_owner(&self) -> bool {
        !matches!(self, AccessRule::Capability(_))
    }

    /// The capability named by the rule.
    ///
    /// For [`AccessRule::OwnOrAny`] this is the `own` variant; denial
    /// diagnostics may carry the more specific one.
    pub fn primary(&self) -> Capability {
        match self {
            AccessRule::Capability(cap) => *cap,
            AccessRule::OwnOrAny { own, .. } => *own,
            AccessRule::OwnerOnly(cap) => *cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paired_builds_from_catalog() {
        let rule = AccessRule::paired(Capability::UpdateOwnCourse).unwrap();
        assert_eq!(
            rule,
            AccessRule::OwnOrAny {
                own: Capability::UpdateOwnCourse,
                any: Capability::UpdateAnyCourse,
            }
        );
    }

    #[test]
    fn test_paired_refuses_unpaired_capabilities() {
        assert!(AccessRule::paired(Capability::ChangeOwnPassword).is_none());
        assert!(AccessRule::paired(Capability::ApproveMaterial).is_none());
        assert!(AccessRule::paired(Capability::UpdateOwnRating).is_none());
    }

    #[test]
    fn test_needs_owner() {
        assert!(!AccessRule::Capability(Capability::CreateTag).needs_owner());
        assert!(AccessRule::OwnerOnly(Capability::ChangeOwnPassword).needs_owner());
        assert!(AccessRule::paired(Capability::DeleteOwnTag).unwrap().needs_owner());
    }

    #[test]
    fn test_primary() {
        assert_eq!(
            AccessRule::paired(Capability::DeleteOwnMaterial).unwrap().primary(),
            Capability::DeleteOwnMaterial
        );
        assert_eq!(
            AccessRule::OwnerOnly(Capability::ApproveMaterial).primary(),
            Capability::ApproveMaterial
        );
    }
}
