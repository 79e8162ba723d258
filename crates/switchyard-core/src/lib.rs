//! switchyard-core — shared message model, routing vocabulary, and dispatch policy.
//! All other Switchyard crates depend on this one.

pub mod config;
pub mod message;
pub mod payload;
pub mod policy;
pub mod route;

pub use message::{Address, Message, Status};
pub use payload::{Payload, Principal};
pub use policy::{UnresolvedAction, UnresolvedReason};
pub use route::RouteScope;
