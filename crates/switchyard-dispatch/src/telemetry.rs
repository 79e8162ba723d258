//! Telemetry sink — fire-and-forget observability around the dispatch
//! lifecycle. Implementations must not fail; there is nowhere for a
//! telemetry error to go.

use std::time::Duration;

use switchyard_core::{Payload, UnresolvedReason};

use crate::error::DispatchError;

pub trait Telemetry: Send + Sync {
    /// A payload passed validation and entered routing.
    fn payload_incoming(&self, payload: &Payload);

    /// A dispatch failed with a captured error.
    fn payload_exception(&self, payload: &Payload, error: &DispatchError);

    /// A payload could not be routed or handled.
    fn payload_unresolved(&self, payload: &Payload, reason: UnresolvedReason);

    /// A dispatch reached its terminal signal.
    fn payload_complete(&self, payload: &Payload, elapsed: Duration, success: bool);
}

/// Default sink: structured `tracing` events.
pub struct TracingTelemetry;

fn destination(payload: &Payload) -> String {
    payload
        .message()
        .map(|m| m.destination.to_string())
        .unwrap_or_else(|| "-".to_string())
}

impl Telemetry for TracingTelemetry {
    fn payload_incoming(&self, payload: &Payload) {
        tracing::debug!(
            destination = %destination(payload),
            transits = payload.transits(),
            "payload received"
        );
    }

    fn payload_exception(&self, payload: &Payload, error: &DispatchError) {
        tracing::warn!(
            destination = %destination(payload),
            error = %error,
            "payload dispatch failed"
        );
    }

    fn payload_unresolved(&self, payload: &Payload, reason: UnresolvedReason) {
        tracing::warn!(
            destination = %destination(payload),
            reason = %reason,
            "payload unresolved"
        );
    }

    fn payload_complete(&self, payload: &Payload, elapsed: Duration, success: bool) {
        tracing::debug!(
            destination = %destination(payload),
            elapsed_ms = elapsed.as_millis() as u64,
            success,
            "payload complete"
        );
    }
}
