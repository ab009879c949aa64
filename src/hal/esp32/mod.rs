//! ESP32 hardware abstraction layer for quadrature encoders.
//!
//! The ESP32 has no general-purpose timer with an encoder mode, so the
//! pulse counter (PCNT) peripheral stands in for it. PCNT is available on
//! ESP32, ESP32-S2 and ESP32-S3 (not on ESP32-C3).

mod counter;

pub use counter::Esp32PcntCounter;

