use crate::*;

/// Local execution: a registered handler runs and the payload signals
/// success.
#[tokio::test]
async fn test_local_execution_signals_success() {
    init_tracing();
    let eng = engine(policy(4), RecordingGateway::for_channels(&["*"]));
    let handler = CountingHandler::new(address("orders"));
    eng.registry.register(handler.clone());

    let (payload, signals) = tracked_payload(message_to("orders"), RouteScope::BOTH);
    eng.dispatcher.dispatch(payload).await;

    assert_eq!(handler.hits(), 1);
    assert!(eng.gateway.sent().is_empty());
    assert_eq!(signals.lock().unwrap().as_slice(), &[true]);
    assert_eq!(eng.dispatcher.counters().completed(), 1);
}

/// External-only payloads bypass local handlers entirely, even when one is
/// registered for the destination.
#[tokio::test]
async fn test_external_only_bypasses_handlers() {
    init_tracing();
    let eng = engine(policy(4), RecordingGateway::for_channels(&["*"]));
    let handler = CountingHandler::new(address("orders"));
    eng.registry.register(handler.clone());

    let (payload, signals) = tracked_payload(message_to("orders"), RouteScope::EXTERNAL);
    eng.dispatcher.dispatch(payload).await;

    assert_eq!(handler.hits(), 0);
    assert_eq!(eng.gateway.sent().len(), 1);
    assert_eq!(signals.lock().unwrap().as_slice(), &[true]);
}

/// A payload no handler claims falls back to the gateway when its scope
/// still permits external routing.
#[tokio::test]
async fn test_unhandled_payload_falls_back_to_gateway() {
    init_tracing();
    let eng = engine(policy(4), RecordingGateway::for_channels(&["orders"]));

    let (payload, signals) = tracked_payload(message_to("orders"), RouteScope::BOTH);
    eng.dispatcher.dispatch(payload.clone()).await;

    let sent = eng.gateway.sent();
    assert_eq!(sent.len(), 1);
    // The original payload itself was forwarded, not a copy.
    assert!(Arc::ptr_eq(&sent[0], &payload));
    assert_eq!(signals.lock().unwrap().as_slice(), &[true]);
}

/// A response proven resolvable is re-queued through the scheduler and
/// executed by its own handler without touching the gateway.
#[tokio::test]
async fn test_resolvable_response_reenters_the_engine() {
    init_tracing();
    let eng = engine(policy(4), RecordingGateway::for_channels(&["*"]));
    eng.registry.register(ForwardingHandler::new(
        address("orders"),
        vec![address("billing")],
    ));
    let billing = CountingHandler::new(address("billing"));
    eng.registry.register(billing.clone());

    let (payload, signals) = tracked_payload(message_to("orders"), RouteScope::BOTH);
    eng.dispatcher.dispatch(payload).await;
    settle().await;

    assert_eq!(eng.scheduler.submissions(), 1);
    assert_eq!(billing.hits(), 1);
    assert!(eng.gateway.sent().is_empty());
    assert_eq!(signals.lock().unwrap().as_slice(), &[true]);
}

/// Redelivering the same payload past the transit bound fails it
/// deterministically and counts an error.
#[tokio::test]
async fn test_transit_bound_stops_redelivery_loops() {
    init_tracing();
    let eng = engine(policy(3), RecordingGateway::for_channels(&["*"]));
    let handler = CountingHandler::new(address("orders"));
    eng.registry.register(handler.clone());

    let (payload, signals) = tracked_payload(message_to("orders"), RouteScope::BOTH);
    for _ in 0..4 {
        eng.dispatcher.dispatch(payload.clone()).await;
    }

    // Three passes within the bound, the fourth rejected.
    assert_eq!(handler.hits(), 3);
    assert_eq!(signals.lock().unwrap().len(), 1);
    assert_eq!(eng.dispatcher.counters().errors(), 1);
    assert_eq!(payload.transits(), 4);
}
