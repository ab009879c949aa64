//! Mock implementations for testing without hardware.
//!
//! This module provides a software stand-in for a timer in encoder mode,
//! so the wraparound logic can be driven through arbitrary count sequences
//! on the desktop.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockCounter`] | [`QuadratureCounter`] | Modulo counter with scripted readings and read failures |
//!
//! # Example
//!
//! ```rust
//! use quad_encoder::QuadratureEncoder;
//! use quad_encoder::hal::MockCounter;
//!
//! let mut counter = MockCounter::new(1000);
//! counter.set_count(950);
//! let mut encoder = QuadratureEncoder::seeded(&mut counter).unwrap();
//!
//! // Roll over the top of the counter
//! encoder.counter_mut().set_count(10);
//! let reading = encoder.update().unwrap();
//! assert_eq!(reading.delta, 60);
//! assert_eq!(reading.position, 60);
//! ```
//!
//! [`QuadratureCounter`]: crate::traits::QuadratureCounter

extern crate alloc;
use alloc::collections::VecDeque;

use core::fmt;

use crate::traits::QuadratureCounter;

/// Error returned by [`MockCounter`] when a failure was injected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockCounterError {
    /// The simulated register read failed.
    ReadFailed,
}

impl fmt::Display for MockCounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "mock counter read failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MockCounterError {}

/// Mock quadrature counter for testing.
///
/// Holds a live count in `0..=period` that wraps like hardware does.
/// Readings queued with [`queue_counts()`](Self::queue_counts) are returned
/// first, in FIFO order, and are returned verbatim (even out of range).
///
/// # Example
///
/// ```rust
/// use quad_encoder::hal::MockCounter;
/// use quad_encoder::traits::QuadratureCounter;
///
/// let mut counter = MockCounter::new(99);
///
/// // Live count wraps modulo period + 1
/// counter.step(-3);
/// assert_eq!(counter.count().unwrap(), 97);
///
/// // Scripted readings come out first
/// counter.queue_counts(&[5, 6]);
/// assert_eq!(counter.count().unwrap(), 5);
/// assert_eq!(counter.count().unwrap(), 6);
/// assert_eq!(counter.count().unwrap(), 97);
///
/// // Failure injection
/// counter.fail_next();
/// assert!(counter.count().is_err());
/// assert_eq!(counter.read_count, 5);
/// ```
#[derive(Debug)]
pub struct MockCounter {
    period: u32,
    current: u32,
    scripted: VecDeque<u32>,
    fail_next: bool,
    /// Number of times `count` was called.
    pub read_count: usize,
}

impl MockCounter {
    /// Creates a counter with the given modulus, starting at 0.
    pub fn new(period: u32) -> Self {
        Self {
            period,
            current: 0,
            scripted: VecDeque::new(),
            fail_next: false,
            read_count: 0,
        }
    }

    /// Creates a counter starting at `count` (reduced into range).
    pub fn with_count(mut self, count: u32) -> Self {
        self.set_count(count);
        self
    }

    /// Sets the live count, reduced modulo `period + 1`.
    pub fn set_count(&mut self, count: u32) {
        self.current = (u64::from(count) % self.modulus()) as u32;
    }

    /// Moves the live count by `ticks`, wrapping in either direction.
    pub fn step(&mut self, ticks: i64) {
        let modulus = self.modulus() as i128;
        let next = (i128::from(self.current) + i128::from(ticks)).rem_euclid(modulus);
        self.current = next as u32;
    }

    /// Queue a reading to be returned before the live count
    pub fn queue_count(&mut self, count: u32) {
        self.scripted.push_back(count);
    }

    /// Queue multiple readings
    pub fn queue_counts(&mut self, counts: &[u32]) {
        self.scripted.extend(counts.iter().copied());
    }

    /// Make the next read fail
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    /// The live count without consuming a read.
    pub fn current(&self) -> u32 {
        self.current
    }

    fn modulus(&self) -> u64 {
        u64::from(self.period) + 1
    }
}

impl Default for MockCounter {
    fn default() -> Self {
        Self::new(crate::traits::DEFAULT_PERIOD)
    }
}

impl QuadratureCounter for MockCounter {
    type Error = MockCounterError;

    fn period(&self) -> u32 {
        self.period
    }

    fn count(&mut self) -> Result<u32, MockCounterError> {
        self.read_count += 1;
        if self.fail_next {
            self.fail_next = false;
            return Err(MockCounterError::ReadFailed);
        }
        Ok(self.scripted.pop_front().unwrap_or(self.current))
    }
}

// ============================================================================
// Tests
// ============================================================================
