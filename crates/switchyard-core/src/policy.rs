//! Unresolved-payload vocabulary: what went wrong and what to do about it.

use serde::{Deserialize, Serialize};

/// Why a payload could not be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// No local handler matched the destination.
    HandlerNotFound,
    /// No outgoing channel matched the destination.
    ChannelNotFound,
}

impl UnresolvedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HandlerNotFound => "handler not found",
            Self::ChannelNotFound => "outgoing channel not found",
        }
    }
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the dispatcher does with a payload it cannot route or handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedAction {
    /// Drop silently.
    Ignore,
    /// Synthesize a failure response back to the sender when possible.
    FailResponse,
    /// Reserved: surface the condition to the host.
    Fault,
}

impl std::str::FromStr for UnresolvedAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Self::Ignore),
            "fail_response" => Ok(Self::FailResponse),
            "fault" => Ok(Self::Fault),
            other => Err(format!("unknown unresolved action: {other}")),
        }
    }
}
