//! Dispatcher — routes payloads from arrival to terminal acknowledgment.
//!
//! One entry point, [`Dispatcher::dispatch`]. Every path through it
//! converges on the same cleanup block: signal the payload exactly once,
//! settle the counters, emit completion telemetry. The dispatcher holds no
//! per-payload state of its own; everything in flight lives on the
//! [`TransitState`] created for the call.

use std::sync::Arc;

use futures::future::join_all;

use switchyard_core::config::DispatchPolicy;
use switchyard_core::message::STATUS_UNRESOLVED;
use switchyard_core::{
    Payload, Principal, RouteScope, Status, UnresolvedAction, UnresolvedReason,
};

use crate::counters::DispatchCounters;
use crate::error::DispatchError;
use crate::gateway::ChannelGateway;
use crate::hooks::{DispatchHooks, NoopHooks, UnresolvedEvent};
use crate::scheduler::TaskScheduler;
use crate::service::CommandExecutor;
use crate::telemetry::{Telemetry, TracingTelemetry};
use crate::transit::TransitState;

/// Originator label for responses re-queued internally.
const ORIGIN_DISPATCHER: &str = "dispatcher";
/// Originator label for synthesized failure responses.
const ORIGIN_UNRESOLVED: &str = "dispatcher-unresolved";

pub struct Dispatcher {
    policy: DispatchPolicy,
    commands: Arc<dyn CommandExecutor>,
    gateway: Arc<dyn ChannelGateway>,
    scheduler: Arc<dyn TaskScheduler>,
    telemetry: Arc<dyn Telemetry>,
    hooks: Arc<dyn DispatchHooks>,
    counters: Arc<DispatchCounters>,
}

impl Dispatcher {
    pub fn new(
        policy: DispatchPolicy,
        commands: Arc<dyn CommandExecutor>,
        gateway: Arc<dyn ChannelGateway>,
        scheduler: Arc<dyn TaskScheduler>,
    ) -> Self {
        Self {
            policy,
            commands,
            gateway,
            scheduler,
            telemetry: Arc::new(TracingTelemetry),
            hooks: Arc::new(NoopHooks),
            counters: Arc::new(DispatchCounters::new()),
        }
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn Telemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn DispatchHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn counters(&self) -> Arc<DispatchCounters> {
        self.counters.clone()
    }

    /// Route one payload. Never returns an error: the outcome is reported
    /// through the payload's signal, the counters, and telemetry. Safe to
    /// call concurrently for independent payloads.
    pub async fn dispatch(&self, payload: Arc<Payload>) {
        let started = self.counters.active_increment();
        // The identity travels with the call, never through ambient state,
        // so concurrent dispatches cannot observe each other's principal.
        let identity = payload.principal();
        let mut transit = TransitState::new(payload.clone(), self.policy.max_transits, started);

        self.hooks.execute_begin(&payload);

        if let Err(error) = self.run(&mut transit, identity.as_ref()).await {
            self.telemetry.payload_exception(&payload, &error);
            self.hooks.request_error(&payload, &error);
            transit.fault(error);
        }

        // Terminal block: every dispatch ends here exactly once.
        let success = transit.is_success();
        transit.signal();
        let elapsed = self.counters.active_decrement(transit.started());
        self.telemetry.payload_complete(&payload, elapsed, success);
        if !success {
            self.counters.error_increment();
        }
        self.hooks.execute_complete(&payload, success);
    }

    async fn run(
        &self,
        transit: &mut TransitState,
        identity: Option<&Principal>,
    ) -> Result<(), DispatchError> {
        transit.validate()?;
        self.telemetry.payload_incoming(&transit.payload);
        transit.record_transit()?;

        if transit.current_scope().is_external_only() {
            // Shortcut for external traffic: straight out, no local execution.
            let payload = transit.payload.clone();
            self.transmit_payload(&payload, transit).await;
        } else {
            self.execute_commands(transit, identity).await;
            if !transit.responses.is_empty() {
                self.transmit_responses(transit, identity).await;
            }
        }
        Ok(())
    }

    /// Run the payload against the command executor, then decide what an
    /// unhandled payload becomes: external traffic, or an unresolved report.
    async fn execute_commands(&self, transit: &mut TransitState, identity: Option<&Principal>) {
        let payload = transit.payload.clone();
        match self
            .commands
            .execute(&payload, identity, &mut transit.responses)
            .await
        {
            Ok(handled) => transit.execute_ok = handled,
            // Only the error is recorded; the flag keeps its prior value.
            Err(error) => transit.capture(DispatchError::Execution(error)),
        }

        if transit.execute_ok {
            return;
        }

        // Unhandled. If the payload itself still permits external routing,
        // hand it to the senders instead: force the scope external so it
        // cannot loop back in, and queue the original payload itself.
        if !payload.scope().is_internal_only() {
            transit.set_current_scope(RouteScope::EXTERNAL);
            transit.responses.push(payload);
            return;
        }

        self.process_unhandled(
            self.policy.unresolved_action,
            UnresolvedReason::HandlerNotFound,
            &payload,
        );
    }

    /// Fan generated responses out: proven-resolvable ones back into the
    /// engine, the rest through the gateway in parallel.
    async fn transmit_responses(&self, transit: &mut TransitState, identity: Option<&Principal>) {
        // Follow-on identity: responses inherit the dispatching call's
        // principal unless they brought their own.
        if let Some(identity) = identity {
            for response in transit.responses.iter().filter(|p| !p.has_principal()) {
                response.set_principal(identity.clone());
            }
        }

        // Disjoint, exhaustive split: a response routes internally when the
        // current scope still permits it AND the executor proves it
        // resolvable. Everything else leaves through the gateway.
        let route_internal = transit.current_scope().contains(RouteScope::INTERNAL);
        let (internal, external): (Vec<_>, Vec<_>) = transit
            .responses
            .iter()
            .cloned()
            .partition(|p| route_internal && self.commands.resolve(p));

        for payload in internal {
            // Proven resolvable; internal-only stops any re-route loop.
            payload.set_scope(RouteScope::INTERNAL);
            self.scheduler.execute_or_enqueue(payload, ORIGIN_DISPATCHER);
        }

        // Issue every external send before awaiting any. One failure is
        // folded into the state without cancelling its siblings.
        let outcomes = join_all(external.iter().map(|p| self.send(p))).await;
        for outcome in outcomes {
            transit.merge_send(outcome);
        }
    }

    /// Send one payload, capturing any failure into the transit state.
    async fn transmit_payload(&self, payload: &Arc<Payload>, transit: &mut TransitState) {
        let outcome = self.send(payload).await;
        transit.merge_send(outcome);
    }

    /// Hand the payload to the channel gateway. An undelivered payload (no
    /// matching outgoing channel) goes through unresolved processing.
    async fn send(&self, payload: &Arc<Payload>) -> Result<bool, DispatchError> {
        let delivered = self
            .gateway
            .send(payload)
            .await
            .map_err(DispatchError::Transmission)?;

        if !delivered {
            self.process_unhandled(
                self.policy.invalid_channel_action,
                UnresolvedReason::ChannelNotFound,
                payload,
            );
        }
        Ok(delivered)
    }

    /// Central failure hook for payloads that cannot be routed or handled.
    /// The unresolved event may rewrite the action before it is applied.
    fn process_unhandled(
        &self,
        action: UnresolvedAction,
        reason: UnresolvedReason,
        payload: &Arc<Payload>,
    ) {
        self.telemetry.payload_unresolved(payload, reason);

        let mut event = UnresolvedEvent {
            payload: payload.clone(),
            reason,
            action,
        };
        self.hooks.request_unresolved(&mut event);

        match event.action {
            UnresolvedAction::Ignore => {}
            UnresolvedAction::FailResponse => {
                if !payload.can_respond() {
                    return;
                }
                let status = Status::new(STATUS_UNRESOLVED, reason.as_str());
                if let Some(response) = payload.fail_response(status) {
                    self.scheduler
                        .execute_or_enqueue(Arc::new(response), ORIGIN_UNRESOLVED);
                }
            }
            // Reserved: surfacing the condition is the host's decision.
            UnresolvedAction::Fault => {}
        }
    }
}
