//! switchyard-dispatch — message dispatch and transit-control engine.
//!
//! Payloads enter through [`Dispatcher::dispatch`], are validated and
//! hop-checked, run against local handlers and/or leave through the channel
//! gateway, and are always terminally signalled exactly once. The
//! [`ResourceRateLimiter`] aggregates per-resource pressure into the
//! throttle factor admission control reads.

pub mod counters;
pub mod dispatcher;
pub mod error;
pub mod gateway;
pub mod hooks;
pub mod limiter;
pub mod registry;
pub mod scheduler;
pub mod service;
pub mod telemetry;
pub mod transit;

pub use counters::{CountersSnapshot, DispatchCounters};
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use gateway::ChannelGateway;
pub use hooks::{DispatchHooks, NoopHooks, UnresolvedEvent};
pub use limiter::{ResourceProfile, ResourceRateLimiter};
pub use registry::HandlerRegistry;
pub use scheduler::TaskScheduler;
pub use service::{CommandExecutor, MessageHandler};
pub use telemetry::{Telemetry, TracingTelemetry};
pub use transit::TransitState;
