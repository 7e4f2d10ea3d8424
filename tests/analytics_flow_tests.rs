mod support;

use bidtrace::app::Enablement;
use bidtrace::domain::{Label, ReportCommand, BIDS_CATEGORY, ROLLUP_CATEGORY};
use bidtrace::testkit::events::{auction_end, auction_init, request, response, timeout, won};

use support::harness::{options, Harness};

const ALL_BID_METRICS: &str = r#"{
    "sampling": "1",
    "wdc_options": {
        "bid_request": true,
        "bid_timeout": true,
        "bid_response": true,
        "bid_won": true,
        "bid_timing": true,
        "bid_rollup": true
    },
    "enableDistribution": true
}"#;

#[test]
fn won_event_reports_minor_units() {
    let mut h = Harness::new();
    let sink = h.install_sink();

    let enablement = h
        .adapter
        .enable(None, &options(r#"{"sampling":1,"wdc_options":{"bid_won":true}}"#));
    assert_eq!(enablement, Enablement::Enabled);

    h.bus.publish(won("acme", 2.5));

    let commands = sink.commands();
    assert_eq!(
        commands,
        vec![ReportCommand::event("send", BIDS_CATEGORY, "Wins", "acme", Some(250))]
    );
    assert_eq!(
        commands[0].to_args(),
        serde_json::json!(["send", "event", "Prebid.js Bids", "Wins", "acme", 250, {"nonInteraction": true}])
    );
}

#[test]
fn early_events_drain_in_order_once_sink_appears() {
    let mut h = Harness::new();
    h.bus.publish(request("A"));
    h.bus.publish(response("A", 1.2, None, "div-gpt-ad-1"));
    h.bus.publish(won("A", 1.2));

    h.adapter.enable(
        None,
        &options(r#"{"wdc_options":{"bid_request":true,"bid_response":true,"bid_won":true}}"#),
    );
    assert_eq!(h.pending(), 3);

    let sink = h.install_sink();
    assert!(sink.is_empty());

    h.bus.publish(auction_init());
    h.bus.publish(auction_init());

    let actions: Vec<_> = sink.commands().into_iter().map(|c| c.action).collect();
    assert_eq!(actions, vec!["Requests", "Bids", "Wins"]);
    assert_eq!(h.pending(), 0);
    assert_eq!(h.adapter.with_session(|s| s.queue().dispatched()), Some(3));
}

#[test]
fn enabling_twice_sends_the_same_calls_as_once() {
    fn run(enable_calls: usize) -> usize {
        let mut h = Harness::new();
        let sink = h.install_sink();
        h.bus.publish(request("early"));
        for _ in 0..enable_calls {
            h.adapter.enable(None, &options(ALL_BID_METRICS));
        }
        h.bus.publish(auction_init());
        h.bus.publish(response("acme", 1.0, Some(320), "div-gpt-ad-1"));
        h.bus.publish(timeout(&["slow"]));
        h.bus.publish(auction_end());
        h.bus.publish(won("acme", 1.0));
        sink.len()
    }

    assert_eq!(run(1), run(2));
    assert_eq!(run(1), 8);
}

#[test]
fn rollup_reports_best_not_sum_or_first() {
    let mut h = Harness::new();
    let sink = h.install_sink();
    h.adapter
        .enable(None, &options(r#"{"wdc_options":{"bid_rollup":true}}"#));

    h.bus.publish(auction_init());
    h.bus.publish(response("a", 1.0, Some(100), "div-gpt-ad-top"));
    h.bus.publish(response("b", 2.0, Some(100), "div-gpt-ad-top"));
    h.bus.publish(auction_end());

    assert_eq!(
        sink.commands(),
        vec![ReportCommand::event(
            "send",
            ROLLUP_CATEGORY,
            "Bid Round Total",
            Label::Number(1),
            Some(200)
        )]
    );
    assert_eq!(
        h.adapter.with_session(|s| s.rollup().tracked_placements()),
        Some(0)
    );
}

#[test]
fn responses_between_auctions_do_not_leak_into_next_rollup() {
    let mut h = Harness::new();
    let sink = h.install_sink();
    h.adapter
        .enable(None, &options(r#"{"wdc_options":{"bid_rollup":true,"experiment":"x"}}"#));

    h.bus.publish(auction_init());
    h.bus.publish(response("a", 1.5, Some(100), "div-gpt-ad-top"));
    h.bus.publish(auction_end());

    h.bus.publish(response("late", 9.0, Some(100), "div-gpt-ad-top"));

    h.bus.publish(auction_init());
    h.bus.publish(response("b", 0.75, Some(100), "div-gpt-ad-top"));
    h.bus.publish(auction_end());

    let rollups: Vec<_> = sink
        .commands()
        .into_iter()
        .map(|c| (c.action, c.label, c.value))
        .collect();
    assert_eq!(
        rollups,
        vec![
            ("Bid Round Total x".to_string(), Label::Number(1), Some(150)),
            ("Bid Round Total x".to_string(), Label::Number(2), Some(75)),
        ]
    );
}

#[test]
fn zero_sampling_never_reports() {
    let mut h = Harness::new();
    let sink = h.install_sink();
    h.bus.publish(request("early"));

    let enablement = h.adapter.enable(
        None,
        &options(r#"{"sampling":"0","wdc_options":{"bid_request":true,"bid_won":true}}"#),
    );
    assert_eq!(enablement, Enablement::SampledOut);

    for i in 0..100 {
        h.bus.publish(request(&format!("bidder-{i}")));
        h.bus.publish(won("acme", 1.0));
    }

    assert!(sink.is_empty());
    assert_eq!(h.bus.subscriber_count(), 0);
    assert!(h.adapter.with_session(|_| ()).is_none());
}

#[test]
fn tracker_and_global_shape_every_call() {
    let mut h = Harness::new();
    let sink = bidtrace::testkit::sink::RecordingSink::new();
    h.sinks
        .install("pageGa", std::sync::Arc::new(sink.clone()));

    h.adapter.enable(
        Some("ga"),
        &options(r#"{"trackerName":"pb","global":"pageGa","wdc_options":{"bid_timeout":true}}"#),
    );
    assert_eq!(h.adapter.tracker_send(), Some("pb.send"));

    h.bus.publish(timeout(&["x", "y"]));

    let commands = sink.commands();
    assert_eq!(commands.len(), 2);
    assert!(commands.iter().all(|c| c.tracker_method == "pb.send"));
    assert_eq!(commands[1].label, Label::from("y"));
}

#[test]
fn rollup_log_reports_each_auction_to_diagnostics() {
    use std::sync::Arc;

    use bidtrace::app::AnalyticsAdapter;
    use bidtrace::domain::{AuctionEvent, BidResponse};
    use bidtrace::testkit::diagnostics::RecordingDiagnostics;

    let h = Harness::new();
    let diagnostics = RecordingDiagnostics::new();
    let mut adapter = AnalyticsAdapter::new(h.bus.clone(), h.sinks.clone())
        .with_diagnostics(Arc::new(diagnostics.clone()));
    adapter.enable(None, &options(r#"{"wdc_options":{"rollup_log":true}}"#));

    h.bus.publish(auction_init());
    h.bus.publish(AuctionEvent::BidResponse(BidResponse {
        bidder_code: Some("acme".into()),
        cpm: 0.8,
        time_to_respond: Some(210),
        ad_unit_code: "div-gpt-ad-top".into(),
        ad_id: Some("ad-7".into()),
        status_message: Some("Bid available".into()),
    }));
    h.bus.publish(auction_end());
    h.bus.publish(auction_init());
    h.bus.publish(auction_end());

    let summaries = diagnostics.summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0][0].bidder.as_deref(), Some("acme"));
    assert_eq!(summaries[0][0].ad_id.as_deref(), Some("ad-7"));
    assert!(!summaries[0][0].rendered);
    assert_eq!(diagnostics.empty_auctions(), 1);
}
