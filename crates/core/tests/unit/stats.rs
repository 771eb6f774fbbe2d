//! # Statistics Tests

use rtlbridge_core::stats::SessionStats;
use rtlbridge_core::{CallbackId, SessionConfig};

use crate::common::harness::{clock_cycle, counter_session};

#[test]
fn test_events_per_step() {
    let stats = SessionStats::default();
    assert!(stats.events_per_step().abs() < f64::EPSILON);

    let stats = SessionStats {
        steps: 4,
        events_queued: 6,
        ..SessionStats::default()
    };
    assert!((stats.events_per_step() - 1.5).abs() < f64::EPSILON);
}

#[test]
fn test_counters_follow_the_session() {
    let (mut sim, ids) = counter_session(SessionConfig::default());
    sim.write(ids.en, 1).unwrap();
    sim.wait(ids.count, CallbackId(1)).unwrap();

    clock_cycle(&mut sim, ids);
    assert!(sim.write(ids.count, 3).is_err());
    sim.reset();

    let stats = sim.stats();
    assert_eq!(stats.steps, 1);
    // The clock write at CombUpdateDone adds a second settle.
    assert_eq!(stats.phases, 4);
    assert_eq!(stats.edges, 1);
    assert_eq!(stats.changes_detected, 1);
    assert_eq!(stats.events_queued, 1);
    assert_eq!(stats.resets, 1);
    // en, clk up, clk down
    assert_eq!(stats.writes, 3);
    assert_eq!(stats.writes_rejected, 1);
}

#[test]
fn test_summary_lists_every_counter() {
    let stats = SessionStats {
        steps: 2,
        phases: 6,
        edges: 2,
        changes_detected: 3,
        events_queued: 5,
        resets: 1,
        writes: 7,
        writes_rejected: 2,
    };
    let text = stats.to_string();
    assert!(text.contains("steps            2"));
    assert!(text.contains("events queued    5 (2.50/step)"));
    assert!(text.contains("writes           7 (2 rejected)"));
    assert_eq!(text.lines().count(), 7);
}
