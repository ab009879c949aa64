//! Quadrature counter on the ESP32 pulse counter (PCNT) peripheral.
//!
//! Both PCNT channels of one unit are used so that every edge on A and B
//! is counted (x4 decoding). The unit's limits are set to `±(period + 1)`;
//! the hardware resets the count to zero when either limit is reached, so
//! the signed count reduced modulo `period + 1` behaves exactly like a
//! timer in encoder mode wrapping over `0..=period`.
//!
//! # Wiring
//!
//! - A → GPIO18
//! - B → GPIO19
//! - VCC → 3.3V
//! - GND → GND

use crate::config::EncoderConfig;
use crate::encoder::fold_count;
use crate::traits::QuadratureCounter;
use esp_idf_hal::gpio::{AnyInputPin, InputPin};
use esp_idf_hal::pcnt::{
    Pcnt, PcntChannel, PcntChannelConfig, PcntControlMode, PcntCountMode, PcntDriver, PinIndex,
};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::sys::EspError;

/// PCNT-backed quadrature counter for ESP32.
///
/// # Example
///
/// ```ignore
/// use quad_encoder::hal::esp32::Esp32PcntCounter;
/// use quad_encoder::{EncoderConfig, QuadratureEncoder};
///
/// let peripherals = Peripherals::take()?;
/// let config = EncoderConfig::default().with_period(4095);
/// let counter = Esp32PcntCounter::new(
///     peripherals.pcnt0,
///     peripherals.pins.gpio18, // A
///     peripherals.pins.gpio19, // B
///     &config,
/// )?;
///
/// let mut encoder = QuadratureEncoder::with_config(counter, &config)?;
/// loop {
///     let reading = encoder.update()?;
///     // feed reading.position / reading.delta to the control loop
/// }
/// ```
pub struct Esp32PcntCounter<'d> {
    unit: PcntDriver<'d>,
    period: u32,
}

impl<'d> Esp32PcntCounter<'d> {
    /// Largest modulus: `period + 1` must fit the signed 16-bit limit registers.
    pub const MAX_PERIOD: u32 = i16::MAX as u32 - 1;

    /// Configures a PCNT unit to decode quadrature signals on `pin_a` and
    /// `pin_b`, wrapping modulo `config.period + 1`.
    ///
    /// The count is cleared, so an encoder built with
    /// [`InitialCount::Zero`](crate::config::InitialCount::Zero) starts in
    /// sync with the hardware.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured period does not fit the PCNT
    /// limits or if the peripheral driver fails to initialize.
    pub fn new<PCNT: Pcnt>(
        pcnt: impl Peripheral<P = PCNT> + 'd,
        pin_a: impl Peripheral<P = impl InputPin> + 'd,
        pin_b: impl Peripheral<P = impl InputPin> + 'd,
        config: &EncoderConfig,
    ) -> anyhow::Result<Self> {
        config.validate(Self::MAX_PERIOD)?;

        let mut unit = PcntDriver::new(
            pcnt,
            Some(pin_a),
            Some(pin_b),
            Option::<AnyInputPin>::None,
            Option::<AnyInputPin>::None,
        )?;

        let limit = (config.period + 1) as i16;

        // Channel 0: edges on A, direction from B
        unit.channel_config(
            PcntChannel::Channel0,
            PinIndex::Pin0,
            PinIndex::Pin1,
            &PcntChannelConfig {
                lctrl_mode: PcntControlMode::Reverse,
                hctrl_mode: PcntControlMode::Keep,
                pos_mode: PcntCountMode::Decrement,
                neg_mode: PcntCountMode::Increment,
                counter_h_lim: limit,
                counter_l_lim: -limit,
            },
        )?;

        // Channel 1: edges on B, direction from A
        unit.channel_config(
            PcntChannel::Channel1,
            PinIndex::Pin1,
            PinIndex::Pin0,
            &PcntChannelConfig {
                lctrl_mode: PcntControlMode::Reverse,
                hctrl_mode: PcntControlMode::Keep,
                pos_mode: PcntCountMode::Increment,
                neg_mode: PcntCountMode::Decrement,
                counter_h_lim: limit,
                counter_l_lim: -limit,
            },
        )?;

        if config.filter_cycles > 0 {
            unit.set_filter_value(config.filter_cycles.min(1023))?;
            unit.filter_enable()?;
        } else {
            unit.filter_disable()?;
        }

        unit.counter_pause()?;
        unit.counter_clear()?;
        unit.counter_resume()?;

        log::info!(
            "encoder '{}': PCNT configured, period {}, filter {} cycles",
            config.label.as_str(),
            config.period,
            config.filter_cycles
        );

        Ok(Self {
            unit,
            period: config.period,
        })
    }

    /// Resets the hardware count to zero.
    ///
    /// Call [`QuadratureEncoder::resync()`](crate::QuadratureEncoder::resync)
    /// afterwards if an encoder is already tracking this counter.
    pub fn clear(&mut self) -> Result<(), EspError> {
        self.unit.counter_pause()?;
        self.unit.counter_clear()?;
        self.unit.counter_resume()
    }

    /// Signed count as held by the PCNT unit, in `-(period+1)..=period+1`.
    pub fn signed_count(&self) -> Result<i16, EspError> {
        self.unit.get_counter_value()
    }
}

impl QuadratureCounter for Esp32PcntCounter<'_> {
    type Error = EspError;

    #[inline]
    fn period(&self) -> u32 {
        self.period
    }

    fn count(&mut self) -> Result<u32, EspError> {
        let signed = self.unit.get_counter_value()?;
        Ok(fold_count(i64::from(signed), self.period))
    }
}
