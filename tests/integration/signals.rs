use crate::*;

/// Every path through the dispatcher signals exactly once: success,
/// cancellation, missing message, transit exhaustion, unresolved.
#[tokio::test]
async fn test_every_path_signals_exactly_once() {
    init_tracing();
    let eng = engine(policy(2), RecordingGateway::for_channels(&["*"]));
    let handler = CountingHandler::new(address("orders"));
    eng.registry.register(handler.clone());

    // Success.
    let (payload, signals) = tracked_payload(message_to("orders"), RouteScope::BOTH);
    eng.dispatcher.dispatch(payload).await;
    assert_eq!(signals.lock().unwrap().len(), 1);

    // Cancelled before dispatch.
    let (payload, signals) = tracked_payload(message_to("orders"), RouteScope::BOTH);
    payload.cancel().cancel();
    eng.dispatcher.dispatch(payload).await;
    assert_eq!(signals.lock().unwrap().as_slice(), &[false]);

    // Missing message.
    let signals = Arc::new(Mutex::new(Vec::new()));
    let signals2 = signals.clone();
    let payload = Arc::new(
        Payload::without_message(RouteScope::BOTH)
            .on_complete(move |success| signals2.lock().unwrap().push(success)),
    );
    eng.dispatcher.dispatch(payload).await;
    assert_eq!(signals.lock().unwrap().as_slice(), &[false]);

    // Transit bound exceeded.
    let (payload, signals) = tracked_payload(message_to("orders"), RouteScope::BOTH);
    payload.record_transit();
    payload.record_transit();
    eng.dispatcher.dispatch(payload).await;
    assert_eq!(signals.lock().unwrap().as_slice(), &[false]);

    // Unresolved internal-only.
    let (payload, signals) = tracked_payload(message_to("nowhere"), RouteScope::INTERNAL);
    eng.dispatcher.dispatch(payload).await;
    assert_eq!(signals.lock().unwrap().len(), 1);
}

/// Concurrent dispatches carry their own identities; no payload ever sees
/// another call's principal.
#[tokio::test]
async fn test_concurrent_dispatches_keep_identities_separate() {
    init_tracing();
    let eng = engine(policy(4), RecordingGateway::for_channels(&["*"]));
    let handler = CapturingHandler::new(address("orders"));
    eng.registry.register(handler.clone());

    let mut joins = Vec::new();
    for i in 0..16 {
        let dispatcher = eng.dispatcher.clone();
        joins.push(tokio::spawn(async move {
            let subject = format!("svc-{i}");
            let message = Message::new(
                address("orders"),
                serde_json::json!({ "expected_subject": subject }),
            );
            let payload = Arc::new(
                Payload::new(message, RouteScope::BOTH)
                    .with_principal(Principal::new(subject)),
            );
            dispatcher.dispatch(payload).await;
        }));
    }
    for join in joins {
        join.await.unwrap();
    }

    let seen = handler.seen();
    assert_eq!(seen.len(), 16);
    for (message, identity) in seen {
        let expected = message.body["expected_subject"].as_str().unwrap();
        assert_eq!(identity.expect("identity present").subject, expected);
    }
}

/// After a concurrent burst the active gauge settles to zero and every
/// dispatch was counted.
#[tokio::test]
async fn test_counters_settle_after_concurrent_burst() {
    init_tracing();
    let eng = engine(policy(4), RecordingGateway::for_channels(&["*"]));
    let handler = CountingHandler::new(address("orders"));
    eng.registry.register(handler.clone());

    let mut joins = Vec::new();
    for _ in 0..32 {
        let dispatcher = eng.dispatcher.clone();
        joins.push(tokio::spawn(async move {
            let (payload, _signals) = tracked_payload(message_to("orders"), RouteScope::BOTH);
            dispatcher.dispatch(payload).await;
        }));
    }
    for join in joins {
        join.await.unwrap();
    }

    let snapshot = eng.dispatcher.counters().snapshot();
    assert_eq!(snapshot.active, 0);
    assert_eq!(snapshot.completed, 32);
    assert_eq!(snapshot.errors, 0);
    assert_eq!(handler.hits(), 32);
}
