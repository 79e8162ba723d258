//! Task scheduler boundary — asynchronous re-entry into the engine.

use std::sync::Arc;

use switchyard_core::Payload;

/// Re-dispatches payloads without blocking the current call.
///
/// Implementations typically hand the payload back to
/// [`crate::Dispatcher::dispatch`] on a worker task. The dispatcher submits
/// two kinds of traffic here: responses proven internally resolvable, and
/// synthesized failure responses. `origin` labels the submitter for
/// diagnostics.
pub trait TaskScheduler: Send + Sync {
    fn execute_or_enqueue(&self, payload: Arc<Payload>, origin: &str);
}
