//! Handler registry — maps destination addresses to registered handlers.
//!
//! The engine-side [`CommandExecutor`] implementation. Multiple addresses
//! can map to one handler; resolution is an exact address match.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use switchyard_core::{Address, Payload, Principal, RouteScope};

use crate::service::{CommandExecutor, MessageHandler};

#[derive(Default)]
pub struct HandlerRegistry {
    /// destination -> handler.
    handlers: DashMap<Address, Arc<dyn MessageHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Register a handler under its own address.
    pub fn register(&self, handler: Arc<dyn MessageHandler>) {
        self.handlers.insert(handler.address(), handler);
    }

    /// Register an additional destination -> handler mapping.
    /// Use when a handler serves multiple destinations.
    pub fn register_address(&self, address: Address, handler: Arc<dyn MessageHandler>) {
        self.handlers.insert(address, handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[async_trait]
impl CommandExecutor for HandlerRegistry {
    async fn execute(
        &self,
        payload: &Arc<Payload>,
        identity: Option<&Principal>,
        responses: &mut Vec<Arc<Payload>>,
    ) -> Result<bool> {
        let Some(message) = payload.message() else {
            return Ok(false);
        };
        let handler = match self.handlers.get(&message.destination) {
            Some(entry) => entry.value().clone(),
            None => return Ok(false),
        };

        let generated = handler.handle(message, identity).await?;
        for response in generated {
            responses.push(Arc::new(Payload::new(response, RouteScope::default())));
        }
        Ok(true)
    }

    fn resolve(&self, payload: &Payload) -> bool {
        payload
            .message()
            .map(|m| self.handlers.contains_key(&m.destination))
            .unwrap_or(false)
    }
}
