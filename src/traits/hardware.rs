//! Hardware abstraction traits for quadrature counter peripherals.
//!
//! The encoder core never touches a peripheral register directly. Instead it
//! is handed something that implements [`QuadratureCounter`]: a free-running
//! up/down counter that wraps modulo `period + 1`.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`QuadratureCounter`] | Read the live count and report the modulus |
//!
//! # Implementation
//!
//! Configuring a timer in encoder mode is hardware specific and happens in
//! each backend's constructor, which hands back a ready-to-read counter.
//! For testing and desktop development, use [`MockCounter`](crate::hal::MockCounter).
//! For ESP32 hardware, use `hal::esp32::Esp32PcntCounter` (requires the
//! `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use quad_encoder::traits::QuadratureCounter;
//! use quad_encoder::hal::MockCounter;
//!
//! let mut counter = MockCounter::new(1000);
//! counter.step(-1);
//!
//! // Decrementing past zero wraps to the top of the range
//! assert_eq!(counter.count().unwrap(), 1000);
//! assert_eq!(counter.period(), 1000);
//! ```

/// Default counter modulus for a 16-bit timer.
pub const DEFAULT_PERIOD: u32 = 65535;

/// A hardware up/down counter driven by two quadrature inputs.
///
/// The counter free-runs in hardware. Software only ever reads it.
///
/// # Implementation Notes
///
/// - `count()` must return a value in `0..=period()`
/// - Incrementing past `period()` wraps to 0, decrementing past 0 wraps
///   to `period()`
/// - `period()` is fixed for the lifetime of the counter
///
/// # Example Implementation
///
/// ```rust,ignore
/// use quad_encoder::traits::QuadratureCounter;
///
/// struct Tim3Qei { /* register block */ }
///
/// impl QuadratureCounter for Tim3Qei {
///     type Error = core::convert::Infallible;
///
///     fn period(&self) -> u32 {
///         u16::MAX as u32
///     }
///
///     fn count(&mut self) -> Result<u32, Self::Error> {
///         Ok(self.regs.cnt.read().bits())
///     }
/// }
/// ```
pub trait QuadratureCounter {
    /// Error type for counter reads.
    type Error;

    /// The counter modulus. Counts range over `0..=period`.
    fn period(&self) -> u32;

    /// Reads the current raw count.
    fn count(&mut self) -> Result<u32, Self::Error>;
}

impl<C: QuadratureCounter + ?Sized> QuadratureCounter for &mut C {
    type Error = C::Error;

    #[inline]
    fn period(&self) -> u32 {
        (**self).period()
    }

    #[inline]
    fn count(&mut self) -> Result<u32, Self::Error> {
        (**self).count()
    }
}
