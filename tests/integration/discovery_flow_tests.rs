//! Boot and gateway discovery, driven through the full scheduler.

use ecs_node::app::events::AppEvent;
use ecs_node::config::NodeConfig;
use ecs_node::link::MacAddress;
use ecs_node::link::discovery::DISCOVERY_PAYLOAD;
use ecs_node::scheduler::{NodePhase, Scheduler};

use super::mock_hw::{GATEWAY, MockNode, RecordingSink, started_node};

#[test]
fn start_configures_probe_and_joins_network() {
    let (node, hw, sink) = started_node();

    assert_eq!(hw.resolution, Some(10));
    assert_eq!(hw.network.as_deref(), Some("ecs-mesh"));
    assert!(!hw.led_on, "indicator starts off");
    assert_eq!(node.phase(), NodePhase::Discovery);
    assert!(matches!(
        sink.events.first(),
        Some(AppEvent::Started { network }) if network.as_str() == "ecs-mesh"
    ));
}

#[test]
fn start_fails_when_transport_cannot_join() {
    let mut node = Scheduler::new(NodeConfig::default()).unwrap();
    let mut hw = MockNode::new();
    hw.fail_begin = true;
    let mut sink = RecordingSink::new();

    assert!(node.start(&mut hw, &mut sink).is_err());
    assert!(sink.events.is_empty());
}

#[test]
fn probes_every_interval_until_reply() {
    let (mut node, mut hw, mut sink) = started_node();

    for t in (0..1200).step_by(100) {
        node.poll(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.broadcasts.len(), 3, "probes at 0, 500 and 1000");
    assert!(hw.broadcasts.iter().all(|b| b == DISCOVERY_PAYLOAD));
    assert_eq!(hw.begins, 0, "no sampling during discovery");

    hw.queue_reply(GATEWAY);
    node.poll(1200, &mut hw, &mut sink);

    assert_eq!(node.phase(), NodePhase::Running);
    assert_eq!(node.gateway(), Some(GATEWAY));
    assert_eq!(hw.begins, 1, "eager conversion on resolution");
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::GatewayResolved(g) if *g == GATEWAY)),
        1
    );

    for t in (1300..5000).step_by(100) {
        node.poll(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.broadcasts.len(), 3, "probing stops once resolved");
    assert_eq!(node.status().probes_sent, 3);
}

#[test]
fn sampling_held_off_while_gateway_unknown() {
    let (mut node, mut hw, mut sink) = started_node();

    for t in (0..60_000).step_by(250) {
        node.poll(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.begins, 0);
    assert!(hw.unicasts.is_empty());
    assert_eq!(node.phase(), NodePhase::Discovery);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ConversionRequested)), 0);
}

#[test]
fn first_reply_wins() {
    let (mut node, mut hw, mut sink) = started_node();
    let other = MacAddress::new([0x02, 0, 0, 0, 0, 0x01]);

    hw.queue_reply(GATEWAY);
    hw.queue_reply(other);
    node.poll(0, &mut hw, &mut sink);
    assert_eq!(node.gateway(), Some(GATEWAY));
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ReplyIgnored { sender, .. } if *sender == other)),
        1
    );

    hw.queue_reply(other);
    node.poll(100, &mut hw, &mut sink);
    assert_eq!(node.gateway(), Some(GATEWAY), "later unicasts never rebind");
}

#[test]
fn searching_blink_runs_while_probing() {
    let (mut node, mut hw, mut sink) = started_node();

    let mut lit = Vec::new();
    for t in (0..1000).step_by(50) {
        node.poll(t, &mut hw, &mut sink);
        lit.push(hw.led_on);
    }
    // 100 ms on, 400 ms off, repeating.
    assert!(hw.led_on_calls >= 2);
    assert!(lit.iter().any(|&l| l) && lit.iter().any(|&l| !l));
}

#[test]
fn transport_ticks_every_poll() {
    let (mut node, mut hw, mut sink) = started_node();
    for t in 0..25 {
        node.poll(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.ticks, 25);
}

#[test]
fn probe_cadence_survives_clock_wrap() {
    let (mut node, mut hw, mut sink) = started_node();
    let start = u32::MAX - 700;

    let mut t = start;
    for _ in 0..15 {
        node.poll(t, &mut hw, &mut sink);
        t = t.wrapping_add(100);
    }
    // 1500 ms across the wrap: probes at +0, +500, +1000.
    assert_eq!(hw.broadcasts.len(), 3);
}

#[test]
fn resolution_swaps_searching_for_three_short_flashes() {
    let (mut node, mut hw, mut sink) = started_node();

    for t in 0..400 {
        node.poll(t, &mut hw, &mut sink);
    }
    assert!(!hw.led_on, "searching pattern is in its off phase at 400");

    hw.queue_reply(GATEWAY);
    let mut rising = Vec::new();
    let mut falling = Vec::new();
    let mut was_on = hw.led_on;
    for t in 400..1_400 {
        node.poll(t, &mut hw, &mut sink);
        if hw.led_on != was_on {
            if hw.led_on {
                rising.push(t);
            } else {
                falling.push(t);
            }
            was_on = hw.led_on;
        }
    }

    assert_eq!(node.phase(), NodePhase::Running);
    assert_eq!(hw.begins, 1, "eager conversion still starts on resolution");
    // 50 ms on, 50 ms off, three times; then dark, searching never resumes.
    assert_eq!(rising, vec![400, 500, 600]);
    assert_eq!(falling, vec![450, 550, 650]);
    assert!(!hw.led_on);
}
