//! Integration test: a run is a pure function of configuration and seed.

use latsim_engine::{simulate_with_sink, Phase, RecordingSink, RunReport};
use latsim_test_utils::fixtures::asep_fixture_config;
use latsim_test_utils::OpenAsep;

fn run(seed: u64) -> (RecordingSink, RunReport) {
    let mut config = asep_fixture_config();
    config.seed = seed;
    config.t_skip = 5.0;
    config.t_max = 25.0;
    let mut sink = RecordingSink::new();
    let report = simulate_with_sink(&config, &mut sink).unwrap();
    (sink, report)
}

#[test]
fn same_seed_reproduces_trajectory_and_summary() {
    let (a, ra) = run(1234);
    let (b, rb) = run(1234);

    assert!(!a.events.is_empty());
    assert_eq!(a.events, b.events);
    assert_eq!(a.states, b.states);
    assert_eq!(ra.results, rb.results);
    assert_eq!(ra.endconfig, rb.endconfig);
    assert_eq!(ra.metrics, rb.metrics);
}

#[test]
fn different_seeds_diverge() {
    let (a, _) = run(1);
    let (b, _) = run(2);
    assert_ne!(a.events, b.events);
}

#[test]
fn phases_are_contiguous() {
    let (sink, report) = run(77);
    let warm: Vec<_> = sink.phase_events(Phase::WarmUp).collect();
    let measured: Vec<_> = sink.phase_events(Phase::Measure).collect();
    assert_eq!(warm.len() as u64, report.metrics.warmup_events);
    assert_eq!(measured.len() as u64, report.metrics.measured_events);

    // Every warm-up event precedes every measured one.
    let split = warm.len();
    assert!(sink.events[..split].iter().all(|e| e.phase == Phase::WarmUp));
    assert!(warm.iter().all(|e| e.time <= 5.0));
    assert!(measured.iter().all(|e| e.time >= 5.0 && e.time < 25.0));
}

#[test]
fn waiting_times_sum_to_event_times() {
    let config = OpenAsep::new(12).boundaries(0.5, 0.5).config(10.0, 9);
    let mut sink = RecordingSink::new();
    simulate_with_sink(&config, &mut sink).unwrap();

    let mut t = 0.0;
    for e in &sink.events {
        t += e.dt;
        assert!((e.time - t).abs() < 1e-9);
    }
}
