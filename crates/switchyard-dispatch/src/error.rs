//! Dispatch error taxonomy.

use thiserror::Error;

/// Errors raised while routing a payload. Every variant is caught inside
/// [`crate::Dispatcher::dispatch`]; none escape to the caller. The outcome
/// is observable only through the payload signal, counters, and telemetry.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The payload's cancellation trigger fired before validation.
    #[error("dispatch cancelled before validation")]
    Cancelled,

    /// The payload carries no message.
    #[error("payload carries no message")]
    MissingMessage,

    /// The payload passed through the dispatcher too many times.
    #[error("transit count {transits} exceeds configured maximum {max}")]
    TransitsExceeded { transits: u32, max: u32 },

    /// The command executor failed while running the payload.
    #[error("command execution failed: {0}")]
    Execution(anyhow::Error),

    /// An outgoing transmission failed.
    #[error("channel transmission failed: {0}")]
    Transmission(anyhow::Error),
}
