//! Extensibility hooks — synchronous callbacks around the dispatch
//! lifecycle. Hosts use these to observe dispatches and to steer
//! unresolved-payload handling per call.

use std::sync::Arc;

use switchyard_core::{Payload, UnresolvedAction, UnresolvedReason};

use crate::error::DispatchError;

/// Raised when a payload cannot be routed or handled. The hook receives the
/// event mutably and may rewrite `action` before the dispatcher applies it;
/// the policy is late-bound per call, not fixed at configuration time.
pub struct UnresolvedEvent {
    pub payload: Arc<Payload>,
    pub reason: UnresolvedReason,
    pub action: UnresolvedAction,
}

/// Lifecycle hooks. All default to no-ops. Hooks run inline on the dispatch
/// path and must not block.
pub trait DispatchHooks: Send + Sync {
    fn execute_begin(&self, _payload: &Arc<Payload>) {}

    fn execute_complete(&self, _payload: &Arc<Payload>, _success: bool) {}

    fn request_error(&self, _payload: &Arc<Payload>, _error: &DispatchError) {}

    fn request_unresolved(&self, _event: &mut UnresolvedEvent) {}
}

/// Hook set that does nothing.
pub struct NoopHooks;

impl DispatchHooks for NoopHooks {}
