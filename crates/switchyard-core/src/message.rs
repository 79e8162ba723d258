//! Message model — addressed units of work moving through the dispatcher.
//!
//! A `Message` is immutable once built. Everything the dispatcher mutates in
//! flight (routing scope, hop count, principal, completion) lives on the
//! payload wrapper, not here.

use serde::{Deserialize, Serialize};

/// Logical destination of a message: a named channel plus the command
/// selector within that channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// Named channel the message travels on.
    pub channel: String,
    /// Message kind within the channel.
    pub kind: String,
    /// Action selector within the kind.
    pub action: String,
}

impl Address {
    pub fn new(
        channel: impl Into<String>,
        kind: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            kind: kind.into(),
            action: action.into(),
        }
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.channel, self.kind, self.action)
    }
}

/// Processing status carried on response messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: u16,
    pub description: String,
}

impl Status {
    pub fn new(code: u16, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

/// Status code set on synthesized failure responses.
pub const STATUS_UNRESOLVED: u16 = 501;

/// Default priority for newly created messages.
pub const PRIORITY_NORMAL: i32 = 1;

/// Below-normal priority. Failure responses use this so they cannot starve
/// regular traffic.
pub const PRIORITY_LOW: i32 = -1;

/// One addressed unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Deduplication id: `blake3(destination || timestamp_le || body)`.
    pub id: [u8; 32],

    /// Where the message should be executed or delivered.
    pub destination: Address,

    /// Where responses to this message should be sent.
    /// `None` means the message cannot be responded to.
    pub reply_to: Option<Address>,

    /// Id of the request this message responds to.
    pub in_response_to: Option<[u8; 32]>,

    /// Channel priority. Negative values are shed first under pressure.
    pub priority: i32,

    /// Processing status, set on responses.
    pub status: Option<Status>,

    /// Unix timestamp in milliseconds.
    pub timestamp: u64,

    /// Message content. Structure is an application concern.
    pub body: serde_json::Value,
}

impl Message {
    /// Create a new request message addressed to `destination`.
    pub fn new(destination: Address, body: serde_json::Value) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;

        let id = Self::generate_id(&destination, timestamp, &body);

        Self {
            id,
            destination,
            reply_to: None,
            in_response_to: None,
            priority: PRIORITY_NORMAL,
            status: None,
            timestamp,
            body,
        }
    }

    /// Attach the address responses should be delivered to.
    pub fn with_reply_to(mut self, reply_to: Address) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    /// Build the response skeleton for this message, addressed back to the
    /// sender. Returns `None` when there is no reply address. The response
    /// carries no reply address of its own, so responses cannot chain.
    pub fn to_response(&self, status: Status) -> Option<Message> {
        let destination = self.reply_to.clone()?;
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let body = serde_json::Value::Null;
        let id = Self::generate_id(&destination, timestamp, &body);

        Some(Message {
            id,
            destination,
            reply_to: None,
            in_response_to: Some(self.id),
            priority: PRIORITY_NORMAL,
            status: Some(status),
            timestamp,
            body,
        })
    }

    /// Short hex id for log output.
    pub fn id_hex(&self) -> String {
        hex::encode(&self.id[..8])
    }

    fn generate_id(destination: &Address, timestamp: u64, body: &serde_json::Value) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(destination.channel.as_bytes());
        hasher.update(destination.kind.as_bytes());
        hasher.update(destination.action.as_bytes());
        hasher.update(&timestamp.to_le_bytes());
        hasher.update(body.to_string().as_bytes());

        let mut id = [0u8; 32];
        id.copy_from_slice(hasher.finalize().as_bytes());
        id
    }
}
