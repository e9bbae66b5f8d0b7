//! Decision observation
//!
//! An optional hook for making policy decisions observable. The engine
//! reports every evaluated decision to the configured observer; the
//! observer never influences the outcome.

use crate::engine::DecisionRecord;

/// Observes evaluated policy decisions.
///
/// Implementations must be cheap and non-blocking; they run inline with
/// the decision.
pub trait DecisionObserver: Send + Sync {
    /// Called once per evaluated decision.
    fn on_decision(&self, record: &DecisionRecord);
}

/// Observer that logs decisions through `tracing`.
///
/// Allows log at debug level, denials at warn with the actor, the rule,
/// and the reason, which is what an operator greps for when a user
/// reports "not allowed".
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DecisionObserver for TracingObserver {
    fn on_decision(&self, record: &DecisionRecord) {
        match record.decision.reason() {
            None => {
                tracing::debug!(
                    actor = ?record.actor_id,
                    rule = ?record.rule,
                    owner = ?record.owner_id,
                    "authorization allowed"
                );
            }
            Some(reason) => {
                tracing::warn!(
                    actor = ?record.actor_id,
                    rule = ?record.rule,
                    owner = ?record.owner_id,
                    %reason,
                    "authorization denied"
                );
            }
        }
    }
}
