//! Routing scope — where a payload is allowed to be processed.
//!
//! Two independent flags: internal (local command execution) and external
//! (outbound channel transmission). Both set means "try internal, fall back
//! external". Call sites use the named combinators, never raw bit tests.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteScope(u8);

impl RouteScope {
    /// May be executed against local handlers.
    pub const INTERNAL: RouteScope = RouteScope(0b01);
    /// May be forwarded to an outgoing channel.
    pub const EXTERNAL: RouteScope = RouteScope(0b10);
    /// Try internal first, fall back to external.
    pub const BOTH: RouteScope = RouteScope(0b11);

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Reconstruct a scope from its bit representation. Unknown bits are
    /// dropped.
    pub const fn from_bits(bits: u8) -> RouteScope {
        RouteScope(bits & Self::BOTH.0)
    }

    pub const fn contains(self, other: RouteScope) -> bool {
        self.0 & other.0 == other.0
    }

    /// Internal flag absent: the payload may only leave through a sender.
    pub const fn is_external_only(self) -> bool {
        self.0 & Self::INTERNAL.0 == 0
    }

    /// External flag absent: the payload may only run against local handlers.
    pub const fn is_internal_only(self) -> bool {
        self.0 & Self::EXTERNAL.0 == 0
    }
}

impl Default for RouteScope {
    fn default() -> Self {
        Self::BOTH
    }
}
