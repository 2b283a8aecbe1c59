//! Integration tests for the SCD4x driver against a simulated I2C bus.

use super::mock_hw::{CountingDelay, FakeScd4xBus};

use fermentmon::app::ports::SensorPort;
use fermentmon::error::SensorError;
use fermentmon::sensors::Scd4x;

fn driver(bus: FakeScd4xBus) -> Scd4x<FakeScd4xBus, CountingDelay> {
    Scd4x::new(bus, CountingDelay::default())
}

// ── Handshake ────────────────────────────────────────────────

#[test]
fn begin_stops_then_reads_serial() {
    let mut scd = driver(FakeScd4xBus::new());

    assert!(scd.begin());

    let (bus, delay) = scd.release();
    assert_eq!(
        bus.commands,
        vec![FakeScd4xBus::STOP_PERIODIC, FakeScd4xBus::GET_SERIAL]
    );
    assert!(delay.total_ns >= 500_000_000, "stop needs its settle time");
}

#[test]
fn serial_number_concatenates_words() {
    let mut scd = driver(FakeScd4xBus::new());
    assert_eq!(scd.serial_number().unwrap(), 0x1234_5678_9ABC);
}

#[test]
fn begin_fails_when_bus_nacks() {
    let mut bus = FakeScd4xBus::new();
    bus.nack = true;
    let mut scd = driver(bus);

    assert!(!scd.begin());
}

#[test]
fn begin_fails_on_corrupted_serial() {
    let mut bus = FakeScd4xBus::new();
    bus.corrupt_reads = true;
    let mut scd = driver(bus);

    assert!(!scd.begin());
    assert_eq!(scd.serial_number(), Err(SensorError::CrcMismatch));
}

#[test]
fn wrong_address_is_not_acknowledged() {
    let mut scd = Scd4x::with_address(FakeScd4xBus::new(), CountingDelay::default(), 0x10);
    assert!(!scd.begin());
}

// ── Measurement ──────────────────────────────────────────────

#[test]
fn read_before_start_reports_no_data() {
    let mut bus = FakeScd4xBus::new();
    bus.ready.push_back(true);
    let mut scd = driver(bus);
    assert!(scd.begin());

    assert!(!scd.read_measurement());
    assert_eq!(scd.measure(), Err(SensorError::NotStarted));
}

#[test]
fn not_ready_skips_the_read() {
    let mut scd = driver(FakeScd4xBus::new().with_measurement([600, 0x6667, 0x5EB9]));
    assert!(scd.begin());
    scd.start_periodic_measurement();

    assert!(!scd.read_measurement());

    let (bus, _) = scd.release();
    assert!(bus.is_periodic());
    assert!(!bus.commands.contains(&FakeScd4xBus::READ_MEASUREMENT));
}

#[test]
fn ready_measurement_is_converted() {
    let mut bus = FakeScd4xBus::new().with_measurement([500, 0x6667, 0x5EB9]);
    bus.ready.push_back(true);
    let mut scd = driver(bus);
    assert!(scd.begin());
    scd.start_periodic_measurement();

    assert!(scd.read_measurement());
    assert!((scd.co2() - 500.0).abs() < f32::EPSILON);
    assert!((scd.temperature() - 25.0).abs() < 0.01);
    assert!((scd.humidity() - 37.0).abs() < 0.01);
}

#[test]
fn corrupted_measurement_keeps_previous_values() {
    let mut bus = FakeScd4xBus::new().with_measurement([800, 0x6667, 0x5EB9]);
    bus.ready.extend([true, true]);
    bus.corrupt_measurements.extend([false, true]);
    let mut scd = driver(bus);
    assert!(scd.begin());
    scd.start_periodic_measurement();

    assert!(scd.read_measurement());
    let before = scd.last_measurement();

    assert!(!scd.read_measurement(), "CRC failure is a miss");
    assert_eq!(scd.last_measurement(), before);
    assert!((scd.co2() - 800.0).abs() < f32::EPSILON);
}

#[test]
fn bus_failure_mid_run_is_a_miss() {
    let mut bus = FakeScd4xBus::new().with_measurement([800, 0x6667, 0x5EB9]);
    bus.ready.extend([true, true]);
    // Bus goes away after stop, serial, start, data-ready, read, data-ready.
    bus.nack_after = Some(6);
    let mut scd = driver(bus);
    assert!(scd.begin());
    scd.start_periodic_measurement();
    assert!(scd.read_measurement());
    let before = scd.last_measurement();

    assert!(!scd.read_measurement());
    assert_eq!(scd.last_measurement(), before);
}
