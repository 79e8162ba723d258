//! Channel gateway — the outbound communication boundary.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use switchyard_core::Payload;

/// Hands payloads to whatever transport owns the destination channel.
///
/// `Ok(false)` means no matching outgoing channel is registered; the
/// dispatcher routes that through its invalid-channel policy. Transport
/// failures are returned as errors and isolated per transmission.
#[async_trait]
pub trait ChannelGateway: Send + Sync {
    async fn send(&self, payload: &Arc<Payload>) -> Result<bool>;
}
