//! Quadrature encoder position tracking with counter wraparound correction.
//!
//! This module provides [`QuadratureEncoder`], which turns the readings of a
//! modulo-`(period + 1)` hardware counter into a signed per-update delta and
//! an accumulated position much wider than the counter itself.
//!
//! # Overview
//!
//! The encoder:
//! - Reads the raw counter once per [`update()`](QuadratureEncoder::update)
//! - Picks the shorter way around the counter's circle as the true motion
//! - Folds that delta into a 64-bit position
//! - Lets callers move the logical origin with
//!   [`set_position()`](QuadratureEncoder::set_position)
//!
//! # Example
//!
//! ```rust
//! use quad_encoder::{QuadratureEncoder, hal::MockCounter};
//!
//! let mut counter = MockCounter::new(1000);
//! let mut encoder = QuadratureEncoder::new(&mut counter);
//!
//! // Control loop tick
//! let reading = encoder.update().unwrap();
//! assert_eq!(reading.position, 0);
//! ```
//!
//! # Wraparound
//!
//! When the counter rolls over between two polls the naive difference is
//! close to a full period. It is corrected back into `(-period/2, period/2]`:
//!
//! ```rust
//! use quad_encoder::{QuadratureEncoder, hal::MockCounter};
//!
//! let mut counter = MockCounter::new(1000);
//! counter.set_count(950);
//! let mut encoder = QuadratureEncoder::seeded(&mut counter).unwrap();
//!
//! encoder.counter_mut().set_count(10);
//! let reading = encoder.update().unwrap();
//! assert_eq!(reading.delta, 60);
//! ```
//!
//! # Velocity Limit
//!
//! Motion of more than half the counter range between two polls is
//! indistinguishable from a smaller motion in the opposite direction. Poll
//! at least as often as [`max_delta_per_update()`](QuadratureEncoder::max_delta_per_update)
//! requires for the fastest expected shaft speed.

use crate::config::{EncoderConfig, InitialCount};
use crate::traits::QuadratureCounter;

/// Reduces a counter value into `0..=period`.
///
/// Counters that report signed values, or a reading past the top of the
/// range, land on the equivalent count modulo `period + 1`.
///
/// # Examples
///
/// ```
/// use quad_encoder::fold_count;
///
/// assert_eq!(fold_count(-1, 1000), 1000);
/// assert_eq!(fold_count(1001, 1000), 0);
/// assert_eq!(fold_count(42, 1000), 42);
/// ```
pub fn fold_count(count: i64, period: u32) -> u32 {
    let modulus = i64::from(period) + 1;
    // Result is in 0..=period, which fits in u32
    count.rem_euclid(modulus) as u32
}

/// Corrects a raw counter difference for wraparound.
///
/// Returns the signed change from `last` to `raw` on a counter that wraps
/// over `0..=period`, choosing the interpretation whose magnitude does not
/// exceed half the period. The half period is real-valued, so for an odd
/// `period` such as 65535 a difference of 32767 is kept and 32768 is
/// corrected. A difference of exactly `period / 2` is never corrected.
/// Wrapped differences are shifted by `period` counts. Inputs above
/// `period` are first reduced with [`fold_count`].
///
/// # Examples
///
/// ```
/// use quad_encoder::unwrap_delta;
///
/// assert_eq!(unwrap_delta(150, 100, 1000), 50);
/// assert_eq!(unwrap_delta(10, 950, 1000), 60);
/// assert_eq!(unwrap_delta(960, 10, 1000), -50);
/// assert_eq!(unwrap_delta(600, 100, 1000), 500);
/// ```
pub fn unwrap_delta(raw: u32, last: u32, period: u32) -> i32 {
    let raw = fold_count(i64::from(raw), period);
    let last = fold_count(i64::from(last), period);
    let period = i64::from(period);
    let mut delta = i64::from(raw) - i64::from(last);

    // d > period/2 without losing the half count on odd periods
    if delta > 0 && 2 * delta > period {
        delta -= period;
    } else if delta < 0 && -2 * delta > period {
        delta += period;
    }

    // |delta| <= period/2 <= i32::MAX here
    delta as i32
}

/// Quadrature encoder driver.
///
/// Owns a [`QuadratureCounter`] and tracks the last raw reading, the
/// accumulated position and the most recent delta.
///
/// # Type Parameter
///
/// - `C`: The hardware counter ([`QuadratureCounter`] trait). Pass
///   `&mut counter` to keep ownership of the counter outside the encoder.
///
/// # Thread Safety
///
/// The encoder is designed for a single polling owner. For shared access
/// from several tasks, wrap it in a mutex.
#[derive(Debug)]
pub struct QuadratureEncoder<C: QuadratureCounter> {
    counter: C,
    period: u32,
    last_raw_count: u32,
    position: i64,
    last_delta: i32,
    reversed: bool,
    updates: u32,
}

impl<C: QuadratureCounter> QuadratureEncoder<C> {
    /// Create an encoder that assumes the counter starts at zero.
    ///
    /// No hardware access happens here. If the counter was not cleared when
    /// it was configured, the first [`update()`](Self::update) reports the
    /// counter's starting value as motion. Use [`seeded()`](Self::seeded) to
    /// avoid that.
    pub fn new(counter: C) -> Self {
        let period = counter.period();
        log::debug!("quadrature encoder created, period {}", period);
        Self {
            counter,
            period,
            last_raw_count: 0,
            position: 0,
            last_delta: 0,
            reversed: false,
            updates: 0,
        }
    }

    /// Create an encoder whose reference count is read from the hardware.
    ///
    /// The first update then only reports motion that happened after
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns the counter's error if the initial read fails.
    pub fn seeded(counter: C) -> Result<Self, C::Error> {
        let mut encoder = Self::new(counter);
        encoder.resync()?;
        Ok(encoder)
    }

    /// Create an encoder following an [`EncoderConfig`].
    ///
    /// Applies the initial-count policy and direction inversion. The
    /// config's `period` describes how the counter was set up; the encoder
    /// always uses the counter's own [`period()`](QuadratureCounter::period).
    ///
    /// # Errors
    ///
    /// Returns the counter's error if [`InitialCount::ReadHardware`] is
    /// selected and the read fails.
    pub fn with_config(counter: C, config: &EncoderConfig) -> Result<Self, C::Error> {
        let mut encoder = match config.initial_count {
            InitialCount::Zero => Self::new(counter),
            InitialCount::ReadHardware => Self::seeded(counter)?,
        };
        encoder.reversed = config.reversed;
        if encoder.period != config.period {
            log::warn!(
                "encoder '{}': counter period {} differs from configured {}",
                config.label.as_str(),
                encoder.period,
                config.period
            );
        }
        Ok(encoder)
    }

    /// Read the counter and fold the motion since the last update into the
    /// position. Call this every control loop tick.
    ///
    /// # Errors
    ///
    /// Returns the counter's error if the read fails. State is left
    /// untouched in that case.
    pub fn update(&mut self) -> Result<EncoderReading, C::Error> {
        // Backends promise 0..=period; fold anything else back into range
        let raw = fold_count(i64::from(self.counter.count()?), self.period);

        let mut delta = unwrap_delta(raw, self.last_raw_count, self.period);
        if self.reversed {
            delta = -delta;
        }

        self.last_raw_count = raw;
        self.position = self.position.wrapping_add(i64::from(delta));
        self.last_delta = delta;
        self.updates = self.updates.saturating_add(1);

        Ok(self.reading())
    }

    /// Re-read the counter into the reference count without reporting
    /// motion. Position and delta are unchanged.
    ///
    /// # Errors
    ///
    /// Returns the counter's error if the read fails.
    pub fn resync(&mut self) -> Result<u32, C::Error> {
        let raw = fold_count(i64::from(self.counter.count()?), self.period);
        self.last_raw_count = raw;
        Ok(raw)
    }

    /// Get the accumulated position.
    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Move the logical origin.
    ///
    /// Only the accumulated position changes. The next delta is still
    /// computed from the raw counter difference.
    pub fn set_position(&mut self, position: i64) {
        log::debug!("encoder position set {} -> {}", self.position, position);
        self.position = position;
    }

    /// Set the accumulated position to zero.
    pub fn reset(&mut self) {
        self.set_position(0);
    }

    /// Get the delta computed by the most recent update.
    ///
    /// Reads 0 before the first update; see [`has_updated()`](Self::has_updated).
    #[inline]
    pub fn delta(&self) -> i32 {
        self.last_delta
    }

    /// Get the last position and delta without reading the counter.
    pub fn reading(&self) -> EncoderReading {
        EncoderReading {
            position: self.position,
            delta: self.last_delta,
        }
    }

    /// Get the raw count observed at the last update.
    #[inline]
    pub fn raw_count(&self) -> u32 {
        self.last_raw_count
    }

    /// Get the counter modulus.
    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Largest motion between two updates that is decoded correctly.
    #[inline]
    pub fn max_delta_per_update(&self) -> u32 {
        self.period / 2
    }

    /// Check whether the delta is inverted.
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Invert the sign of every subsequent delta.
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    /// Check if [`update()`](Self::update) has succeeded at least once.
    #[inline]
    pub fn has_updated(&self) -> bool {
        self.updates > 0
    }

    /// Number of successful updates (saturates at `u32::MAX`).
    #[inline]
    pub fn update_count(&self) -> u32 {
        self.updates
    }

    /// Borrow the hardware counter.
    pub fn counter(&self) -> &C {
        &self.counter
    }

    /// Mutably borrow the hardware counter.
    pub fn counter_mut(&mut self) -> &mut C {
        &mut self.counter
    }

    /// Release the hardware counter.
    pub fn release(self) -> C {
        self.counter
    }
}

/// Position and delta produced by one update.
///
/// # Example
///
/// ```rust
/// use quad_encoder::{QuadratureEncoder, hal::MockCounter};
///
/// let mut counter = MockCounter::new(1000);
/// let mut encoder = QuadratureEncoder::new(&mut counter);
/// encoder.counter_mut().step(25);
///
/// let (position, delta) = encoder.update().unwrap().into();
/// assert_eq!((position, delta), (25, 25));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncoderReading {
    /// Accumulated position in counts.
    pub position: i64,
    /// Motion since the previous update in counts.
    pub delta: i32,
}

impl From<EncoderReading> for (i64, i32) {
    fn from(reading: EncoderReading) -> Self {
        (reading.position, reading.delta)
    }
}
