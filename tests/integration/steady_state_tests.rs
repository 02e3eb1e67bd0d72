//! Sampling, dispatch and delivery confirmation after discovery.

use ecs_node::app::events::AppEvent;
use ecs_node::config::NodeConfig;
use ecs_node::error::{Error, TransportError};
use ecs_node::link::record::{self, RECORD_LEN};
use ecs_node::scheduler::NodePhase;

use super::mock_hw::{GATEWAY, resolved_node, started_node_with};

#[test]
fn next_conversion_waits_full_interval_after_completion() {
    let (mut node, mut hw, mut sink) = resolved_node();
    assert_eq!(hw.begins, 1);

    hw.finish_conversion(21.0);
    node.poll(100, &mut hw, &mut sink);
    assert_eq!(node.status().last_sample_ms, Some(100));

    for t in (200..15_100).step_by(100) {
        node.poll(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.begins, 1, "nothing requested before 15100");

    node.poll(15_100, &mut hw, &mut sink);
    assert_eq!(hw.begins, 2);
}

#[test]
fn completed_reading_is_sent_once_with_exact_payload() {
    let (mut node, mut hw, mut sink) = resolved_node();

    hw.finish_conversion(42.5);
    node.poll(100, &mut hw, &mut sink);

    assert_eq!(hw.unicasts.len(), 1);
    let (payload, to) = &hw.unicasts[0];
    assert_eq!(*to, GATEWAY);
    assert_eq!(payload.len(), RECORD_LEN);
    assert_eq!(
        &payload[..10],
        &[0x45, 0x43, 0x53, 0x5F, 0x54, 0x00, 0x00, 0x00, 0x2A, 0x42]
    );
    assert!(!node.has_pending_reading());

    let decoded = record::decode(payload).unwrap();
    assert_eq!(decoded.node.as_str(), "ECS_T");
    assert!((decoded.celsius - 42.5).abs() < f32::EPSILON);

    for t in (200..10_000).step_by(100) {
        node.poll(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.unicasts.len(), 1, "no resend");
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ReadingSent { .. })), 1);
}

#[test]
fn every_completion_is_dispatched() {
    let mut config = NodeConfig::default();
    config.sampling_interval_ms = 1_000;
    let (mut node, mut hw, mut sink) = started_node_with(config);
    hw.queue_reply(GATEWAY);

    let mut t = 0;
    for _ in 0..300 {
        node.poll(t, &mut hw, &mut sink);
        if hw.converting && !hw.complete && t % 700 == 0 {
            hw.finish_conversion(20.0 + (t / 1000) as f32);
        }
        assert!(!node.has_pending_reading());
        t += 50;
    }
    assert!(hw.reads >= 5);
    assert_eq!(hw.reads as usize, hw.unicasts.len());
}

#[test]
fn send_failure_is_reported_and_not_retried() {
    let (mut node, mut hw, mut sink) = resolved_node();
    hw.fail_unicast = true;

    hw.finish_conversion(19.5);
    node.poll(100, &mut hw, &mut sink);

    assert_eq!(hw.unicast_attempts, 1);
    assert!(!node.has_pending_reading(), "reading dropped on failure");
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::SendFailed {
                error: Error::Transport(TransportError::SendFailed),
                ..
            }
        )),
        1
    );
    assert_eq!(node.status().dispatch.send_errors, 1);

    for t in (200..5_000).step_by(100) {
        node.poll(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.unicast_attempts, 1);
}

#[test]
fn confirmations_update_stats() {
    let (mut node, mut hw, mut sink) = resolved_node();
    hw.finish_conversion(22.0);
    node.poll(100, &mut hw, &mut sink);

    hw.queue_confirm(GATEWAY, 1, false);
    node.poll(200, &mut hw, &mut sink);

    let stats = node.status().dispatch;
    assert_eq!(stats.sent, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.confirmed, 0);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::SendConfirmed { success: false, .. })),
        1
    );
    assert_eq!(node.phase(), NodePhase::Running, "delivery failure is only reported");
}

#[test]
fn stuck_probe_goes_silent_but_loop_keeps_running() {
    let (mut node, mut hw, mut sink) = resolved_node();
    let ticks_before = hw.ticks;

    for t in (100..120_000).step_by(100) {
        node.poll(t, &mut hw, &mut sink);
    }
    assert_eq!(hw.begins, 1);
    assert!(hw.unicasts.is_empty());
    assert_eq!(hw.ticks - ticks_before, 1199);

    // Transport delegate traffic is still serviced.
    hw.queue_confirm(GATEWAY, 7, true);
    node.poll(120_000, &mut hw, &mut sink);
    assert_eq!(node.status().dispatch.confirmed, 1);
}

#[test]
fn status_snapshot_reflects_progress() {
    let (mut node, mut hw, mut sink) = resolved_node();
    hw.finish_conversion(20.0);
    node.poll(100, &mut hw, &mut sink);

    let status = node.status();
    assert_eq!(status.phase, NodePhase::Running);
    assert_eq!(status.gateway, Some(GATEWAY));
    assert_eq!(status.probes_sent, 1);
    assert_eq!(status.last_sample_ms, Some(100));
    assert_eq!(status.dispatch.sent, 1);
}
