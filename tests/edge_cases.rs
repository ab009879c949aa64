//! Edge case and boundary condition tests for the quadrature encoder

use quad_encoder::{
    hal::{MockCounter, MockCounterError},
    unwrap_delta, EncoderConfig, InitialCount, QuadratureEncoder,
};

// ============================================================================
// Half-Period Boundary Tests
// ============================================================================

#[test]
fn exactly_half_period_forward_is_not_corrected() {
    let mut encoder = QuadratureEncoder::new(MockCounter::new(1000));

    encoder.counter_mut().set_count(500);
    assert_eq!(encoder.update().unwrap().delta, 500);
}

#[test]
fn exactly_half_period_backward_is_not_corrected() {
    let counter = MockCounter::new(1000).with_count(700);
    let mut encoder = QuadratureEncoder::seeded(counter).unwrap();

    encoder.counter_mut().set_count(200);
    assert_eq!(encoder.update().unwrap().delta, -500);
}

#[test]
fn one_past_half_period_is_corrected() {
    let mut encoder = QuadratureEncoder::new(MockCounter::new(1000));

    encoder.counter_mut().set_count(501);
    assert_eq!(encoder.update().unwrap().delta, -499);
}

#[test]
fn motion_beyond_half_period_is_misread() {
    // +550 real motion is indistinguishable from -450
    let counter = MockCounter::new(1000).with_count(100);
    let mut encoder = QuadratureEncoder::seeded(counter).unwrap();

    encoder.counter_mut().set_count(650);
    assert_eq!(encoder.update().unwrap().delta, -450);
    assert!(550 > encoder.max_delta_per_update());
}

#[test]
fn odd_period_half_boundary() {
    assert_eq!(unwrap_delta(32767, 0, 65535), 32767);
    assert_eq!(unwrap_delta(32768, 0, 65535), -32767);
}

#[test]
fn smallest_period() {
    // Counter alternates 0, 1
    let mut encoder = QuadratureEncoder::new(MockCounter::new(1));
    encoder.counter_mut().step(1);
    assert_eq!(encoder.update().unwrap().delta, 0);
    assert_eq!(encoder.raw_count(), 1);
}

// ============================================================================
// Counter Range Tests
// ============================================================================

#[test]
fn counter_at_top_of_range() {
    let mut encoder = QuadratureEncoder::new(MockCounter::new(65535));

    encoder.counter_mut().step(-1);
    let reading = encoder.update().unwrap();

    assert_eq!(encoder.raw_count(), 65535);
    // 65535 - 0 - 65535
    assert_eq!(reading.delta, 0);
}

#[test]
fn thirty_two_bit_counter() {
    let counter = MockCounter::new(u32::MAX).with_count(u32::MAX - 10);
    let mut encoder = QuadratureEncoder::seeded(counter).unwrap();

    encoder.counter_mut().set_count(u32::MAX - 5);
    assert_eq!(encoder.update().unwrap().delta, 5);

    encoder.counter_mut().set_count(u32::MAX - 1_000_000);
    assert_eq!(encoder.update().unwrap().delta, -999_995);
}

#[test]
fn position_handles_large_values() {
    let mut encoder = QuadratureEncoder::new(MockCounter::new(1000));
    encoder.set_position(i64::from(i32::MAX) + 10);

    encoder.counter_mut().set_count(5);
    assert_eq!(encoder.update().unwrap().position, i64::from(i32::MAX) + 15);
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn read_error_is_returned_unchanged() {
    let mut encoder = QuadratureEncoder::new(MockCounter::new(1000));
    encoder.counter_mut().fail_next();

    assert_eq!(encoder.update(), Err(MockCounterError::ReadFailed));
    assert!(!encoder.has_updated());
    assert_eq!(encoder.position(), 0);
}

#[test]
fn read_error_during_resync_keeps_reference() {
    let counter = MockCounter::new(1000).with_count(300);
    let mut encoder = QuadratureEncoder::seeded(counter).unwrap();

    encoder.counter_mut().set_count(800);
    encoder.counter_mut().fail_next();
    assert!(encoder.resync().is_err());
    assert_eq!(encoder.raw_count(), 300);
}

#[test]
fn read_error_in_with_config() {
    let mut counter = MockCounter::new(1000);
    counter.fail_next();
    let config = EncoderConfig::default()
        .with_period(1000)
        .with_initial_count(InitialCount::ReadHardware);

    assert!(QuadratureEncoder::with_config(counter, &config).is_err());
}

// ============================================================================
// Delta Before First Update
// ============================================================================

#[test]
fn delta_before_first_update_is_zero() {
    let encoder = QuadratureEncoder::new(MockCounter::new(1000));
    assert_eq!(encoder.delta(), 0);
    assert!(!encoder.has_updated());
}

#[test]
fn zero_delta_update_still_counts() {
    let mut encoder = QuadratureEncoder::new(MockCounter::new(1000));
    let reading = encoder.update().unwrap();

    assert_eq!(reading.delta, 0);
    assert!(encoder.has_updated());
    assert_eq!(encoder.update_count(), 1);
}
