//! Serialization tests (requires the `serde` feature)

#![cfg(feature = "serde")]

use quad_encoder::{EncoderConfig, EncoderReading, InitialCount};

#[test]
fn reading_serializes_as_object() {
    let reading = EncoderReading {
        position: -1200,
        delta: 35,
    };
    let json = serde_json::to_string(&reading).unwrap();
    assert_eq!(json, r#"{"position":-1200,"delta":35}"#);
}

#[test]
fn initial_count_uses_snake_case() {
    let json = serde_json::to_string(&InitialCount::ReadHardware).unwrap();
    assert_eq!(json, r#""read_hardware""#);
}

#[test]
fn config_loads_from_json() {
    let json = r#"{
        "label": "left-wheel",
        "period": 4095,
        "initial_count": "zero",
        "reversed": true,
        "filter_cycles": 200,
        "poll_interval_ms": 5
    }"#;
    let config: EncoderConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.label.as_str(), "left-wheel");
    assert_eq!(config.period, 4095);
    assert_eq!(config.initial_count, InitialCount::Zero);
    assert!(config.reversed);
    assert!(config.validate(u16::MAX as u32).is_ok());
}
