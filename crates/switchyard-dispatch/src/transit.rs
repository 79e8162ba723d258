//! Per-payload transit state.
//!
//! Created at dispatch entry, destroyed when the call returns. Accumulates
//! every outcome of the dispatch so the terminal signal resolves to a single
//! boolean.

use std::sync::Arc;
use std::time::Instant;

use switchyard_core::{Payload, RouteScope};

use crate::error::DispatchError;

pub struct TransitState {
    pub(crate) payload: Arc<Payload>,
    current_scope: RouteScope,
    max_transits: u32,
    started: Instant,
    pub(crate) transmit_ok: bool,
    pub(crate) execute_ok: bool,
    pub(crate) last_error: Option<DispatchError>,
    pub(crate) responses: Vec<Arc<Payload>>,
}

impl TransitState {
    pub fn new(payload: Arc<Payload>, max_transits: u32, started: Instant) -> Self {
        let current_scope = payload.scope();
        Self {
            payload,
            current_scope,
            max_transits,
            started,
            transmit_ok: true,
            execute_ok: true,
            last_error: None,
            responses: Vec::new(),
        }
    }

    /// When this payload entered the dispatcher.
    pub fn started(&self) -> Instant {
        self.started
    }

    /// Reject payloads that were cancelled before dispatch or that carry no
    /// message.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.payload.cancel().is_cancelled() {
            return Err(DispatchError::Cancelled);
        }
        if self.payload.message().is_none() {
            return Err(DispatchError::MissingMessage);
        }
        Ok(())
    }

    /// Count this pass through the dispatcher and enforce the transit bound.
    pub fn record_transit(&self) -> Result<(), DispatchError> {
        let transits = self.payload.record_transit();
        if transits > self.max_transits {
            return Err(DispatchError::TransitsExceeded {
                transits,
                max: self.max_transits,
            });
        }
        Ok(())
    }

    /// Routing scope for the rest of this dispatch. Starts as the payload's
    /// own scope; re-routing narrows it.
    pub fn current_scope(&self) -> RouteScope {
        self.current_scope
    }

    pub fn set_current_scope(&mut self, scope: RouteScope) {
        self.current_scope = scope;
    }

    /// Overall success: transmit-succeeded OR execute-succeeded. Kept OR
    /// deliberately — a payload that fails local execution but never needed
    /// to transmit still reads successful. The test suite pins this down
    /// rather than changing it to AND.
    pub fn is_success(&self) -> bool {
        self.transmit_ok || self.execute_ok
    }

    /// Record an error without deciding the outcome.
    pub fn capture(&mut self, error: DispatchError) {
        self.last_error = Some(error);
    }

    /// A fatal error for this call: nothing succeeded.
    pub fn fault(&mut self, error: DispatchError) {
        self.transmit_ok = false;
        self.execute_ok = false;
        self.last_error = Some(error);
    }

    /// Fold one transmission outcome into the state. Errors are recorded and
    /// mark the transmission failed; they never propagate.
    pub fn merge_send(&mut self, outcome: Result<bool, DispatchError>) {
        match outcome {
            Ok(delivered) => self.transmit_ok = self.transmit_ok && delivered,
            Err(error) => {
                self.transmit_ok = false;
                self.last_error = Some(error);
            }
        }
    }

    pub fn is_faulted(&self) -> bool {
        self.last_error.is_some()
    }

    pub fn last_error(&self) -> Option<&DispatchError> {
        self.last_error.as_ref()
    }

    /// Terminal acknowledgment toward the transport. Safe to reach from any
    /// path; the payload ignores every call after the first.
    pub fn signal(&self) {
        self.payload.signal(self.is_success());
    }
}
