//! # quad-encoder
//!
//! A quadrature encoder driver for timer/counter peripherals running in
//! encoder mode.
//!
//! ## Features
//!
//! - **Hardware abstraction**: the counter is injected through the
//!   [`QuadratureCounter`] trait, never a global peripheral
//! - **Wraparound correction**: modulo-`(period + 1)` counter readings become
//!   signed deltas, choosing the shorter way around the counter
//! - **Wide position**: deltas accumulate into an `i64`
//! - **Recalibration**: move the logical origin without disturbing delta
//!   tracking
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Counter abstraction
//! - `encoder` - Unwrap and accumulate logic
//! - `config` - Encoder configuration
//! - `hal` - Concrete counters (mock for testing, esp32 PCNT for hardware)
//!
//! ## Example
//!
//! ```rust
//! use quad_encoder::{QuadratureEncoder, hal::MockCounter};
//!
//! let mut counter = MockCounter::new(1000);
//! let mut encoder = QuadratureEncoder::new(&mut counter);
//!
//! // Shaft turns 40 counts backwards through zero
//! encoder.counter_mut().set_count(961);
//! let reading = encoder.update().unwrap();
//! assert_eq!(reading.delta, -39);
//!
//! // Zero the logical origin here
//! encoder.set_position(0);
//! assert_eq!(encoder.position(), 0);
//! assert_eq!(encoder.delta(), -39);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Encoder configuration.
pub mod config;
/// Quadrature encoder driver with wraparound correction.
pub mod encoder;
/// Configuration errors.
pub mod error;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use config::{EncoderConfig, InitialCount};
pub use encoder::{fold_count, unwrap_delta, EncoderReading, QuadratureEncoder};
pub use error::ConfigError;
pub use traits::{QuadratureCounter, DEFAULT_PERIOD};
