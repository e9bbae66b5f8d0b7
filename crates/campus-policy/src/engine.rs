//! # Policy engine
//!
//! The single decision point: given an actor, an access rule, and an
//! optional resource owner, decide allow or deny. Decisions are pure
//! functions of their arguments: no I/O, no shared state, safe to call
//! concurrently. Role data is read through the snapshot passed in; a
//! role edited mid-flight is reflected by the next call, not this one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use campus_rbac::{Actor, Capability};

use crate::error::{AccessError, AccessResult};
use crate::observer::DecisionObserver;
use crate::rule::AccessRule;

/// Why a decision denied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// No authenticated actor, and the capability is not universal.
    Anonymous,
    /// The actor does not hold the required capability.
    MissingCapability(Capability),
    /// The capability is held, but the actor does not own the resource.
    NotOwner(Capability),
    /// The rule needs a resource owner and none could be resolved.
    /// Absent lookups fail closed.
    OwnerUnresolved,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::Anonymous => write!(f, "anonymous caller"),
            DenialReason::MissingCapability(cap) => write!(f, "missing capability {cap}"),
            DenialReason::NotOwner(cap) => write!(f, "{cap} requires resource ownership"),
            DenialReason::OwnerUnresolved => write!(f, "resource owner could not be resolved"),
        }
    }
}

/// Outcome of a policy decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The operation may proceed.
    Allow,
    /// The operation is denied, with the reason.
    Deny(DenialReason),
}

impl Decision {
    /// Check if the decision allows the operation.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Get the denial reason, if denied.
    pub fn reason(&self) -> Option<DenialReason> {
        match self {
            Decision::Allow => None,
            Decision::Deny(reason) => Some(*reason),
        }
    }
}

/// One evaluated decision, as handed to observers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// The acting identity, if any
    pub actor_id: Option<Uuid>,
    /// The rule that was evaluated
    pub rule: AccessRule,
    /// The resource owner the rule was evaluated against
    pub owner_id: Option<Uuid>,
    /// The outcome
    pub decision: Decision,
}

/// The policy decision engine.
///
/// Stateless apart from an optional [`DecisionObserver`]; cheap to
/// clone and share. Every mutating operation in the platform asks this
/// engine before touching a store.
///
/// # Examples
///
/// ```
/// use campus_policy::{AccessRule, PolicyEngine};
/// use campus_rbac::{Actor, Capability, Role};
/// use uuid::Uuid;
///
/// let engine = PolicyEngine::new();
/// let teacher = Actor::with_roles(Uuid::now_v7(), vec![Role::course_owner()]);
///
/// // Plain capability check
/// assert!(engine.has_capability(Some(&teacher), Capability::CreateCourse));
///
/// // Ownership-scoped check
/// let rule = AccessRule::paired(Capability::UpdateOwnMaterial).unwrap();
/// let decision = engine.evaluate(Some(&teacher), rule, Some(teacher.id));
/// assert!(decision.is_allowed());
/// ```
#[derive(Clone, Default)]
pub struct PolicyEngine {
    observer: Option<Arc<dyn DecisionObserver>>,
}

impl fmt::Debug for PolicyEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyEngine")
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl PolicyEngine {
    /// Create an engine without an observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine that reports every evaluated decision to the
    /// given observer. The observer sees outcomes; it cannot change them.
    pub fn with_observer(observer: Arc<dyn DecisionObserver>) -> Self {
        Self {
            observer: Some(observer),
        }
    }

    /// Check whether an actor holds a capability.
    ///
    /// The universal `read_resources` capability is granted to every
    /// caller, anonymous included, before roles are consulted. All other
    /// capabilities deny anonymous callers and otherwise resolve through
    /// the actor's effective capability set.
    ///
    /// Pure: two calls with unchanged role data return the same answer.
    pub fn has_capability(&self, actor: Option<&Actor>, capability: Capability) -> bool {
        if capability.is_universal() {
            return true;
        }
        match actor {
            Some(actor) => actor.effective_capabilities().contains(capability),
            None => false,
        }
    }

    /// Evaluate an access rule.
    ///
    /// # Arguments
    ///
    /// * `actor` - The acting identity, or `None` for anonymous
    /// * `rule` - The decision shape for the attempted operation
    /// * `owner_id` - The resource owner, where the rule needs one; for
    ///   ownership-shaped rules `None` fails closed
    ///
    /// # Returns
    ///
    /// [`Decision::Allow`] or [`Decision::Deny`] with the reason. Denial
    /// is a value, never an error or a panic.
    pub fn evaluate(
        &self,
        actor: Option<&Actor>,
        rule: AccessRule,
        owner_id: Option<Uuid>,
    ) -> Decision {
        let decision = self.decide(actor, rule, owner_id);
        if let Some(observer) = &self.observer {
            observer.on_decision(&DecisionRecord {
                actor_id: actor.map(|a| a.id),
                rule,
                owner_id,
                decision,
            });
        }
        decision
    }

    /// Evaluate an access rule and convert a denial into a typed error.
    ///
    /// Services call this at the top of every mutating operation and
    /// propagate the error with `?`.
    pub fn authorize(
        &self,
        actor: Option<&Actor>,
        rule: AccessRule,
        owner_id: Option<Uuid>,
    ) -> AccessResult<()> {
        match self.evaluate(actor, rule, owner_id) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => {
                let capability = match reason {
                    DenialReason::MissingCapability(cap) | DenialReason::NotOwner(cap) => cap,
                    _ => rule.primary(),
                };
                Err(AccessError::Forbidden {
                    capability,
                    actor_id: actor.map(|a| a.id),
                    reason,
                })
            }
        }
    }

    fn decide(&self, actor: Option<&Actor>, rule: AccessRule, owner_id: Option<Uuid>) -> Decision {
        match rule {
            AccessRule::Capability(capability) => {
                if self.has_capability(actor, capability) {
                    Decision::Allow
                } else if actor.is_none() {
                    Decision::Deny(DenialReason::Anonymous)
                } else {
                    Decision::Deny(DenialReason::MissingCapability(capability))
                }
            }
            AccessRule::OwnOrAny { own, any } => {
                if self.has_capability(actor, any) {
                    return Decision::Allow;
                }
                let Some(actor) = actor else {
                    return Decision::Deny(DenialReason::Anonymous);
                };
                if !self.has_capability(Some(actor), own) {
                    return Decision::Deny(DenialReason::MissingCapability(own));
                }
                match owner_id {
                    None => Decision::Deny(DenialReason::OwnerUnresolved),
                    Some(owner) if actor.id == owner => Decision::Allow,
                    Some(_) => Decision::Deny(DenialReason::NotOwner(own)),
                }
            }
            AccessRule::OwnerOnly(capability) => {
                let Some(actor) = actor else {
                    return Decision::Deny(DenialReason::Anonymous);
                };
                if !self.has_capability(Some(actor), capability) {
                    return Decision::Deny(DenialReason::MissingCapability(capability));
                }
                match owner_id {
                    None => Decision::Deny(DenialReason::OwnerUnresolved),
                    Some(owner) if actor.id == owner => Decision::Allow,
                    Some(_) => Decision::Deny(DenialReason::NotOwner(capability)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::DecisionObserver;
    use campus_rbac::Role;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn teacher() -> Actor {
        Actor::with_roles(Uuid::now_v7(), vec![Role::course_owner()])
    }

    fn admin() -> Actor {
        Actor::with_roles(Uuid::now_v7(), vec![Role::administrator()])
    }

    #[test]
    fn test_zero_role_actor_has_only_universal_read() {
        let engine = PolicyEngine::new();
        let actor = Actor::new(Uuid::now_v7());

        assert!(engine.has_capability(Some(&actor), Capability::ReadResources));
        for capability in Capability::all() {
            if capability != Capability::ReadResources {
                assert!(
                    !engine.has_capability(Some(&actor), capability),
                    "{capability} must deny a zero-role actor"
                );
            }
        }
    }

    #[test]
    fn test_anonymous_read_is_allowed() {
        // Anonymous browsing is intended: the catalog is public.
        let engine = PolicyEngine::new();
        assert!(engine.has_capability(None, Capability::ReadResources));
    }

    #[test]
    fn test_anonymous_denied_everything_else() {
        let engine = PolicyEngine::new();
        for capability in Capability::all() {
            if capability != Capability::ReadResources {
                assert!(!engine.has_capability(None, capability));
            }
        }
    }

    #[test]
    fn test_has_capability_is_idempotent() {
        let engine = PolicyEngine::new();
        let actor = teacher();
        let first = engine.has_capability(Some(&actor), Capability::ApproveMaterial);
        let second = engine.has_capability(Some(&actor), Capability::ApproveMaterial);
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn test_own_scoped_requires_both_capability_and_ownership() {
        let engine = PolicyEngine::new();
        let actor = teacher();
        let rule = AccessRule::paired(Capability::UpdateOwnMaterial).unwrap();

        // Scenario A: own resource allowed
        assert!(engine.evaluate(Some(&actor), rule, Some(actor.id)).is_allowed());

        // Someone else's resource denied
        let other = Uuid::now_v7();
        assert_eq!(
            engine.evaluate(Some(&actor), rule, Some(other)).reason(),
            Some(DenialReason::NotOwner(Capability::UpdateOwnMaterial))
        );

        // Capability missing entirely denied, even on an owned resource
        let student = Actor::new(Uuid::now_v7());
        assert_eq!(
            engine.evaluate(Some(&student), rule, Some(student.id)).reason(),
            Some(DenialReason::MissingCapability(Capability::UpdateOwnMaterial))
        );
    }

    #[test]
    fn test_any_scoped_ignores_ownership() {
        // Scenario B: administrator deletes someone else's material.
        let engine = PolicyEngine::new();
        let actor = admin();
        let rule = AccessRule::paired(Capability::DeleteOwnMaterial).unwrap();

        let someone_else = Uuid::now_v7();
        assert!(engine
            .evaluate(Some(&actor), rule, Some(someone_else))
            .is_allowed());
    }

    #[test]
    fn test_owner_only_rejects_any_scoped_overrides() {
        // An administrator's Any-scoped capabilities must not reach
        // owner-only operations.
        let engine = PolicyEngine::new();
        let actor = admin();
        let rule = AccessRule::OwnerOnly(Capability::ChangeOwnPassword);

        let someone_else = Uuid::now_v7();
        assert_eq!(
            engine.evaluate(Some(&actor), rule, Some(someone_else)).reason(),
            Some(DenialReason::NotOwner(Capability::ChangeOwnPassword))
        );

        // The same administrator may change their own password.
        assert!(engine.evaluate(Some(&actor), rule, Some(actor.id)).is_allowed());
    }

    #[test]
    fn test_unresolved_owner_fails_closed() {
        let engine = PolicyEngine::new();
        let actor = teacher();

        let rule = AccessRule::paired(Capability::UpdateOwnMaterial).unwrap();
        assert_eq!(
            engine.evaluate(Some(&actor), rule, None).reason(),
            Some(DenialReason::OwnerUnresolved)
        );

        let strict = AccessRule::OwnerOnly(Capability::ApproveMaterial);
        assert_eq!(
            engine.evaluate(Some(&actor), strict, None).reason(),
            Some(DenialReason::OwnerUnresolved)
        );
    }

    #[test]
    fn test_anonymous_can_pass_universal_rule() {
        let engine = PolicyEngine::new();
        let rule = AccessRule::Capability(Capability::ReadResources);
        assert!(engine.evaluate(None, rule, None).is_allowed());
    }

    #[test]
    fn test_authorize_maps_denial_to_forbidden() {
        let engine = PolicyEngine::new();
        let rule = AccessRule::Capability(Capability::CreateCourse);

        let err = engine.authorize(None, rule, None).unwrap_err();
        assert!(err.is_forbidden());

        let actor = teacher();
        assert!(engine.authorize(Some(&actor), rule, None).is_ok());
    }

    #[test]
    fn test_decision_serializes_for_audit_sinks() {
        let denied = Decision::Deny(DenialReason::MissingCapability(Capability::CreateCourse));
        let json = serde_json::to_string(&denied).unwrap();
        assert!(json.contains("create_course"));

        let round_tripped: Decision = serde_json::from_str(&json).unwrap();
        assert_eq!(round_tripped, denied);
    }

    #[test]
    fn test_observer_sees_every_decision() {
        #[derive(Default)]
        struct Counter {
            seen: AtomicUsize,
            denied: AtomicUsize,
        }
        impl DecisionObserver for Counter {
            fn on_decision(&self, record: &DecisionRecord) {
                self.seen.fetch_add(1, Ordering::SeqCst);
                if !record.decision.is_allowed() {
                    self.denied.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        let counter = Arc::new(Counter::default());
        let engine = PolicyEngine::with_observer(counter.clone());
        let actor = teacher();

        let rule = AccessRule::Capability(Capability::CreateCourse);
        engine.evaluate(Some(&actor), rule, None);
        engine.evaluate(None, rule, None);

        assert_eq!(counter.seen.load(Ordering::SeqCst), 2);
        assert_eq!(counter.denied.load(Ordering::SeqCst), 1);
    }
}
