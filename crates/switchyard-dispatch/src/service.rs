//! Collaborator contracts between the dispatcher and command handling.
//!
//! The dispatcher never runs handlers itself; it asks a [`CommandExecutor`]
//! to execute a payload or to probe whether it could. Applications register
//! [`MessageHandler`]s with the in-memory registry or supply their own
//! executor implementation.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use switchyard_core::{Address, Message, Payload, Principal};

/// Executes payloads against the locally registered handlers.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run the payload against registered handlers, appending any generated
    /// response payloads to `responses`. Returns whether the payload was
    /// handled.
    async fn execute(
        &self,
        payload: &Arc<Payload>,
        identity: Option<&Principal>,
        responses: &mut Vec<Arc<Payload>>,
    ) -> Result<bool>;

    /// Capability probe: would [`CommandExecutor::execute`] handle this
    /// payload, without running it.
    fn resolve(&self, payload: &Payload) -> bool;
}

/// One locally registered command handler.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// The destination this handler serves.
    fn address(&self) -> Address;

    /// Handle one message, returning any response messages.
    async fn handle(&self, message: &Message, identity: Option<&Principal>)
        -> Result<Vec<Message>>;
}
