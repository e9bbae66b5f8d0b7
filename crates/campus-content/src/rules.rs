//! # The access-rule table
//!
//! Every operation on every resource kind declares its decision shape
//! exactly once, here. Services never hand-compose capability and
//! ownership checks; they look the rule up and pass it to the policy
//! engine. One table, one place where a strict-ownership operation
//! could accidentally grow an "any" escape hatch, and it is reviewed
//! as such.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_policy::{AccessRule, PolicyEngine};
use campus_rbac::{Actor, Capability, ResourceKind};

use crate::error::{ContentError, ContentResult};

/// Operations the service layer performs on resources.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// View or list resources.
    Read,
    /// Create a new resource.
    Create,
    /// Modify an existing resource.
    Update,
    /// Remove an existing resource.
    Delete,
    /// Decide a pending submission.
    Approve,
    /// Replace account credentials.
    ChangePassword,
    /// Grant or revoke a role.
    Assign,
}

/// Look up the access rule for an operation on a resource kind.
///
/// Returns `None` for combinations that do not exist (there is no
/// approving a tag); callers treat `None` as a denial, never as an
/// open door.
///
/// # Examples
///
/// ```
/// use campus_content::{rule_for, Operation};
/// use campus_policy::AccessRule;
/// use campus_rbac::{Capability, ResourceKind};
///
/// // Reads are universal
/// assert_eq!(
///     rule_for(ResourceKind::Material, Operation::Read),
///     Some(AccessRule::Capability(Capability::ReadResources)),
/// );
///
/// // Approval is owner-only
/// assert_eq!(
///     rule_for(ResourceKind::Material, Operation::Approve),
///     Some(AccessRule::OwnerOnly(Capability::ApproveMaterial)),
/// );
///
/// // Nonsense combinations stay closed
/// assert_eq!(rule_for(ResourceKind::Tag, Operation::Approve), None);
/// ```
pub fn rule_for(kind: ResourceKind, operation: Operation) -> Option<AccessRule> {
    use Capability as C;

    match (kind, operation) {
        (_, Operation::Read) => Some(AccessRule::Capability(C::ReadResources)),

        (ResourceKind::Course, Operation::Create) => Some(AccessRule::Capability(C::CreateCourse)),
        (ResourceKind::Course, Operation::Update) => AccessRule::paired(C::UpdateOwnCourse),
        (ResourceKind::Course, Operation::Delete) => AccessRule::paired(C::DeleteOwnCourse),

        (ResourceKind::Material, Operation::Create) => {
            Some(AccessRule::Capability(C::UploadMaterial))
        }
        (ResourceKind::Material, Operation::Update) => AccessRule::paired(C::UpdateOwnMaterial),
        (ResourceKind::Material, Operation::Delete) => AccessRule::paired(C::DeleteOwnMaterial),
        (ResourceKind::Material, Operation::Approve) => {
            Some(AccessRule::OwnerOnly(C::ApproveMaterial))
        }

        (ResourceKind::Rating, Operation::Create) => Some(AccessRule::Capability(C::RateMaterial)),
        // Nobody edits someone else's stars, so no any-variant exists
        (ResourceKind::Rating, Operation::Update) => Some(AccessRule::OwnerOnly(C::UpdateOwnRating)),
        (ResourceKind::Rating, Operation::Delete) => AccessRule::paired(C::DeleteOwnRating),

        (ResourceKind::Review, Operation::Create) => {
            Some(AccessRule::Capability(C::ReviewMaterial))
        }
        (ResourceKind::Review, Operation::Update) => Some(AccessRule::OwnerOnly(C::UpdateOwnReview)),
        (ResourceKind::Review, Operation::Delete) => AccessRule::paired(C::DeleteOwnReview),

        (ResourceKind::Tag, Operation::Create) => Some(AccessRule::Capability(C::CreateTag)),
        (ResourceKind::Tag, Operation::Delete) => AccessRule::paired(C::DeleteOwnTag),

        (ResourceKind::Account, Operation::ChangePassword) => {
            Some(AccessRule::OwnerOnly(C::ChangeOwnPassword))
        }

        (ResourceKind::Role, Operation::Update) => Some(AccessRule::Capability(C::ManageRoles)),
        (ResourceKind::Role, Operation::Assign) => Some(AccessRule::Capability(C::AssignRoles)),

        _ => None,
    }
}

/// Authorize one operation through the rule table.
///
/// The single guard every content service calls before touching its
/// store: look the rule up, hand it to the engine, convert a denial
/// into a typed error. Combinations absent from the table fail closed.
///
/// # Arguments
///
/// * `engine` - The policy engine
/// * `actor` - The acting identity, or `None` for anonymous
/// * `kind` - The resource kind being operated on
/// * `operation` - The attempted operation
/// * `owner_id` - The resource owner, where the rule shape needs one
pub fn authorize_operation(
    engine: &PolicyEngine,
    actor: Option<&Actor>,
    kind: ResourceKind,
    operation: Operation,
    owner_id: Option<Uuid>,
) -> ContentResult<()> {
    let rule =
        rule_for(kind, operation).ok_or(ContentError::UndeclaredOperation { kind, operation })?;
    engine.authorize(actor, rule, owner_id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_are_universal_for_every_kind() {
        for kind in ResourceKind::all() {
            assert_eq!(
                rule_for(kind, Operation::Read),
                Some(AccessRule::Capability(Capability::ReadResources)),
            );
        }
    }

    #[test]
    fn test_own_or_any_shapes_come_from_catalog_pairs() {
        assert_eq!(
            rule_for(ResourceKind::Course, Operation::Delete),
            Some(AccessRule::own_or_any(
                Capability::DeleteOwnCourse,
                Capability::DeleteAnyCourse,
            )),
        );
        assert_eq!(
            rule_for(ResourceKind::Rating, Operation::Delete),
            Some(AccessRule::own_or_any(
                Capability::DeleteOwnRating,
                Capability::DeleteAnyRating,
            )),
        );
    }

    #[test]
    fn test_strict_ownership_operations_stay_owner_only() {
        for (kind, operation, capability) in [
            (
                ResourceKind::Material,
                Operation::Approve,
                Capability::ApproveMaterial,
            ),
            (
                ResourceKind::Account,
                Operation::ChangePassword,
                Capability::ChangeOwnPassword,
            ),
            (
                ResourceKind::Rating,
                Operation::Update,
                Capability::UpdateOwnRating,
            ),
            (
                ResourceKind::Review,
                Operation::Update,
                Capability::UpdateOwnReview,
            ),
        ] {
            assert_eq!(
                rule_for(kind, operation),
                Some(AccessRule::OwnerOnly(capability)),
                "{kind:?}/{operation:?} must not gain an any override"
            );
        }
    }

    #[test]
    fn test_undeclared_combinations_are_closed() {
        assert_eq!(rule_for(ResourceKind::Tag, Operation::Approve), None);
        assert_eq!(rule_for(ResourceKind::Course, Operation::ChangePassword), None);
        assert_eq!(rule_for(ResourceKind::Account, Operation::Create), None);
    }

    #[test]
    fn test_authorize_operation_fails_closed_on_undeclared() {
        use campus_rbac::Role;

        let engine = PolicyEngine::new();
        let admin = Actor::with_roles(Uuid::now_v7(), vec![Role::administrator()]);

        // Even an administrator is denied an operation nobody declared.
        let err = authorize_operation(
            &engine,
            Some(&admin),
            ResourceKind::Tag,
            Operation::Approve,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::UndeclaredOperation { .. }));
    }

    #[test]
    fn test_authorize_operation_passes_declared_rules_to_the_engine() {
        use campus_rbac::Role;

        let engine = PolicyEngine::new();
        let teacher = Actor::with_roles(Uuid::now_v7(), vec![Role::course_owner()]);

        assert!(authorize_operation(
            &engine,
            Some(&teacher),
            ResourceKind::Course,
            Operation::Create,
            None,
        )
        .is_ok());

        let err = authorize_operation(
            &engine,
            None,
            ResourceKind::Course,
            Operation::Create,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::Forbidden(_)));
    }
}
