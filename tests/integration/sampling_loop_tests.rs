//! Integration tests for the SamplingLoop → classifier → sinks pipeline.
//!
//! These run on the host and drive the loop with scripted sensors and a
//! virtual clock, so a 15 s interval costs nothing.

use super::mock_hw::{
    CountingDelay, FakeScd4xBus, MockDisplay, MockSensor, RecordingSink, SensorCall,
    VirtualClock,
};

use fermentmon::Error;
use fermentmon::adapters::display::{AsciiPanel, StatusDisplay};
use fermentmon::adapters::log_sink::SerialLogSink;
use fermentmon::app::events::AppEvent;
use fermentmon::app::service::{CycleOutcome, LoopState, SamplingLoop};
use fermentmon::config::MonitorConfig;
use fermentmon::sensors::Scd4x;
use fermentmon::status::StatusCode;

fn started(script: Vec<Option<(f32, f32, f32)>>) -> (SamplingLoop, MockSensor, VirtualClock, RecordingSink) {
    let mut app = SamplingLoop::new(MonitorConfig::default());
    let mut sensor = MockSensor::new(script);
    let clock = VirtualClock::new();
    let mut sink = RecordingSink::new(clock.handle());
    app.start(&mut sensor, &mut sink).unwrap();
    (app, sensor, clock, sink)
}

fn run_cycles(
    n: usize,
    app: &mut SamplingLoop,
    sensor: &mut MockSensor,
    display: &mut MockDisplay,
    sink: &mut RecordingSink,
    clock: &mut VirtualClock,
) -> Vec<CycleOutcome> {
    (0..n)
        .map(|_| app.cycle(sensor, display, sink, clock).unwrap())
        .collect()
}

// ── Startup ──────────────────────────────────────────────────

#[test]
fn start_handshakes_before_periodic_mode() {
    let (app, sensor, _clock, sink) = started(vec![]);

    assert_eq!(
        sensor.calls,
        vec![SensorCall::Begin, SensorCall::StartPeriodic]
    );
    assert_eq!(app.state(), LoopState::Sampling);
    assert_eq!(
        sink.events,
        vec![(0, AppEvent::Started { interval_ms: 15_000 })]
    );
}

#[test]
fn failed_handshake_halts_for_good() {
    let mut app = SamplingLoop::new(MonitorConfig::default());
    let mut sensor = MockSensor::failing_handshake();
    let mut clock = VirtualClock::new();
    let mut sink = RecordingSink::new(clock.handle());
    let mut display = MockDisplay::default();

    let err = app.start(&mut sensor, &mut sink).unwrap_err();
    assert!(matches!(err, Error::Init(_)));
    assert_eq!(app.state(), LoopState::Halted);
    assert_eq!(sensor.calls, vec![SensorCall::Begin], "no periodic start after a failed handshake");
    assert!(matches!(sink.events.as_slice(), [(_, AppEvent::Halted(_))]));

    // Terminal: no sampling, no retry.
    assert!(matches!(
        app.cycle(&mut sensor, &mut display, &mut sink, &mut clock),
        Err(Error::Halted)
    ));
    assert!(matches!(app.start(&mut sensor, &mut sink), Err(Error::Halted)));
    assert_eq!(sensor.reads(), 0);
    assert_eq!(sensor.calls.len(), 1);
    assert!(clock.sleeps.is_empty());
    assert!(display.frames.is_empty());
    assert_eq!(sink.events.len(), 1, "halt notice is emitted once");
}

#[test]
fn failed_handshake_writes_halt_line() {
    let mut app = SamplingLoop::new(MonitorConfig::default());
    let mut sensor = MockSensor::failing_handshake();
    let mut sink = SerialLogSink::new(Vec::new());

    assert!(app.start(&mut sensor, &mut sink).is_err());
    let out = String::from_utf8(sink.writer().clone()).unwrap();
    assert_eq!(out, "HALT: sensor handshake failed\n");
}

#[test]
fn cycle_before_start_is_rejected() {
    let mut app = SamplingLoop::new(MonitorConfig::default());
    let mut sensor = MockSensor::new([Some((900.0, 20.0, 70.0))]);
    let mut clock = VirtualClock::new();
    let mut sink = RecordingSink::new(clock.handle());
    let mut display = MockDisplay::default();

    assert!(matches!(
        app.cycle(&mut sensor, &mut display, &mut sink, &mut clock),
        Err(Error::NotStarted)
    ));
    assert_eq!(sensor.reads(), 0);
}

// ── Per-cycle dispatch ───────────────────────────────────────

#[test]
fn vent_reading_produces_expected_log_line() {
    let mut app = SamplingLoop::new(MonitorConfig::default());
    let mut sensor = MockSensor::new([Some((12_000.0, 22.0, 65.0))]);
    let mut display = MockDisplay::default();
    let mut clock = VirtualClock::new();
    let mut sink = SerialLogSink::new(Vec::new());

    app.start(&mut sensor, &mut sink).unwrap();
    let outcome = app
        .cycle(&mut sensor, &mut display, &mut sink, &mut clock)
        .unwrap();

    assert!(matches!(
        outcome,
        CycleOutcome::Sampled { status: StatusCode::Vent, .. }
    ));
    let out = String::from_utf8(sink.writer().clone()).unwrap();
    assert_eq!(out, "CO2:12000 ppm\tT:22.0 C\tRH:65.0 %\tVENT\n");
    assert_eq!(display.frames.len(), 1);
    assert_eq!(display.frames[0].1, StatusCode::Vent);
}

#[test]
fn display_and_log_receive_the_same_pair() {
    let (mut app, mut sensor, mut clock, mut sink) =
        started(vec![Some((1_200.0, 14.0, 70.0)), Some((500.0, 20.0, 70.0))]);
    let mut display = MockDisplay::default();

    run_cycles(2, &mut app, &mut sensor, &mut display, &mut sink, &mut clock);

    let logged: Vec<_> = sink.samples().into_iter().map(|(_, r, s)| (r, s)).collect();
    assert_eq!(logged, display.frames);
    assert_eq!(display.frames[0].1, StatusCode::Cold);
    assert_eq!(display.frames[1].1, StatusCode::Idle);
    assert_eq!(display.frames[0].0.co2_ppm, 1_200);
}

#[test]
fn miss_skips_dispatch_but_still_sleeps() {
    let (mut app, mut sensor, mut clock, mut sink) = started(vec![None]);
    let mut display = MockDisplay::default();

    let outcomes = run_cycles(1, &mut app, &mut sensor, &mut display, &mut sink, &mut clock);

    assert_eq!(outcomes, vec![CycleOutcome::Skipped]);
    assert!(display.frames.is_empty());
    assert!(sink.samples().is_empty());
    assert_eq!(clock.sleeps, vec![15_000]);
    assert_eq!(app.state(), LoopState::Sampling);
}

#[test]
fn miss_does_not_reuse_previous_values() {
    let (mut app, mut sensor, mut clock, mut sink) =
        started(vec![Some((900.0, 20.0, 70.0)), None, None]);
    let mut display = MockDisplay::default();

    run_cycles(3, &mut app, &mut sensor, &mut display, &mut sink, &mut clock);

    assert_eq!(display.frames.len(), 1);
    assert_eq!(sink.samples().len(), 1);
}

// ── Pacing ───────────────────────────────────────────────────

#[test]
fn emissions_are_one_interval_apart() {
    let script = vec![Some((900.0, 20.0, 70.0)); 4];
    let (mut app, mut sensor, mut clock, mut sink) = started(script);
    let mut display = MockDisplay::default();

    run_cycles(4, &mut app, &mut sensor, &mut display, &mut sink, &mut clock);

    let times: Vec<u64> = sink.samples().iter().map(|(t, _, _)| *t).collect();
    assert_eq!(times, vec![0, 15_000, 30_000, 45_000]);
}

#[test]
fn missed_cycle_leaves_a_double_gap() {
    let script = vec![Some((900.0, 20.0, 70.0)), None, Some((900.0, 20.0, 70.0))];
    let (mut app, mut sensor, mut clock, mut sink) = started(script);
    let mut display = MockDisplay::default();

    run_cycles(3, &mut app, &mut sensor, &mut display, &mut sink, &mut clock);

    let times: Vec<u64> = sink.samples().iter().map(|(t, _, _)| *t).collect();
    assert_eq!(times, vec![0, 30_000]);
    assert_eq!(clock.sleeps.len(), 3);
}

#[test]
fn configured_interval_is_used() {
    let config = MonitorConfig {
        poll_interval_ms: 2_000,
        ..MonitorConfig::default()
    };
    let mut app = SamplingLoop::new(config);
    let mut sensor = MockSensor::new([None, None]);
    let mut clock = VirtualClock::new();
    let mut sink = RecordingSink::new(clock.handle());
    let mut display = MockDisplay::default();

    app.start(&mut sensor, &mut sink).unwrap();
    run_cycles(2, &mut app, &mut sensor, &mut display, &mut sink, &mut clock);

    assert_eq!(clock.sleeps, vec![2_000, 2_000]);
}

// ── Full stack ───────────────────────────────────────────────

#[test]
fn scd4x_to_serial_line_and_panel() {
    // 12000 ppm, 22.0 C, 65.0 %RH in SCD4x raw words.
    let mut bus = FakeScd4xBus::new().with_measurement([12_000, 25_091, 42_598]);
    bus.ready.push_back(true);
    let mut sensor = Scd4x::new(bus, CountingDelay::default());
    let mut display = StatusDisplay::new(AsciiPanel::new());
    let mut sink = SerialLogSink::new(Vec::new());
    let mut clock = VirtualClock::new();
    let mut app = SamplingLoop::new(MonitorConfig::default());

    app.start(&mut sensor, &mut sink).unwrap();
    app.cycle(&mut sensor, &mut display, &mut sink, &mut clock)
        .unwrap();
    // Second cycle: sensor reports not ready.
    let outcome = app
        .cycle(&mut sensor, &mut display, &mut sink, &mut clock)
        .unwrap();

    assert_eq!(outcome, CycleOutcome::Skipped);
    let out = String::from_utf8(sink.writer().clone()).unwrap();
    assert_eq!(out, "CO2:12000 ppm\tT:22.0 C\tRH:65.0 %\tVENT\n");
    assert_eq!(display.panel().frames(), 1);
    assert!(display.frame().lit_in(0..128, 0..20) > 0);
}
