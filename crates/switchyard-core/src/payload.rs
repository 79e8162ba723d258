//! Payload — one message in transit.
//!
//! Wraps a message with the metadata the dispatcher needs: routing scope,
//! hop counter, optional security principal, a cancellation token, and the
//! completion callback that releases the originating transport resource.
//! Payloads are shared as `Arc<Payload>`; the fields the dispatcher mutates
//! in flight use interior mutability so no outer lock is needed.

use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::message::{Message, Status, PRIORITY_LOW};
use crate::route::RouteScope;

/// Security identity attached to a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub subject: String,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }
}

type Completion = Box<dyn FnOnce(bool) + Send>;

pub struct Payload {
    message: Option<Message>,
    scope: AtomicU8,
    transits: AtomicU32,
    principal: Mutex<Option<Principal>>,
    cancel: CancellationToken,
    completion: Mutex<Option<Completion>>,
}

impl Payload {
    pub fn new(message: Message, scope: RouteScope) -> Payload {
        Self::build(Some(message), scope)
    }

    /// A payload with no decodable message. Transports hand these over when
    /// a frame arrives empty; validation fails them downstream.
    pub fn without_message(scope: RouteScope) -> Payload {
        Self::build(None, scope)
    }

    fn build(message: Option<Message>, scope: RouteScope) -> Payload {
        Payload {
            message,
            scope: AtomicU8::new(scope.bits()),
            transits: AtomicU32::new(0),
            principal: Mutex::new(None),
            cancel: CancellationToken::new(),
            completion: Mutex::new(None),
        }
    }

    /// Attach the identity this payload executes under.
    pub fn with_principal(self, principal: Principal) -> Self {
        self.set_principal(principal);
        self
    }

    /// Share the creating transport's cancellation token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Register the callback that releases the transport resource when the
    /// payload reaches its terminal signal.
    pub fn on_complete(self, callback: impl FnOnce(bool) + Send + 'static) -> Self {
        *self.completion.lock().unwrap() = Some(Box::new(callback));
        self
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn scope(&self) -> RouteScope {
        RouteScope::from_bits(self.scope.load(Ordering::SeqCst))
    }

    pub fn set_scope(&self, scope: RouteScope) {
        self.scope.store(scope.bits(), Ordering::SeqCst);
    }

    /// Number of times this payload has passed through the dispatcher.
    pub fn transits(&self) -> u32 {
        self.transits.load(Ordering::SeqCst)
    }

    /// Count one more pass through the dispatcher; returns the new total.
    pub fn record_transit(&self) -> u32 {
        self.transits.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn principal(&self) -> Option<Principal> {
        self.principal.lock().unwrap().clone()
    }

    pub fn has_principal(&self) -> bool {
        self.principal.lock().unwrap().is_some()
    }

    pub fn set_principal(&self, principal: Principal) {
        *self.principal.lock().unwrap() = Some(principal);
    }

    pub fn cancel(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Release the originating transport resource. The first call wins;
    /// later calls are no-ops, so a payload is never acknowledged twice.
    pub fn signal(&self, success: bool) {
        let callback = self.completion.lock().unwrap().take();
        if let Some(callback) = callback {
            callback(success);
        }
    }

    /// Whether a response can be built for this payload. Requires a reply
    /// address on the message; responses themselves carry none.
    pub fn can_respond(&self) -> bool {
        self.message
            .as_ref()
            .map(|m| m.reply_to.is_some())
            .unwrap_or(false)
    }

    /// Build the canonical failure response for this payload: the given
    /// status plus below-normal priority so it cannot starve regular
    /// traffic. `None` when the payload cannot respond.
    pub fn fail_response(&self, status: Status) -> Option<Payload> {
        let mut message = self.message.as_ref()?.to_response(status)?;
        message.priority = PRIORITY_LOW;
        Some(Payload::new(message, RouteScope::BOTH))
    }
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Payload")
            .field("message", &self.message.as_ref().map(|m| m.id_hex()))
            .field("scope", &self.scope())
            .field("transits", &self.transits())
            .finish()
    }
}
