//! Encoder configuration shared between desktop tests and target firmware.
//!
//! Uses `heapless::String` for the label so the config stays `no_std`
//! friendly.
//!
//! # Example
//!
//! ```rust
//! use quad_encoder::config::{EncoderConfig, InitialCount};
//!
//! // 16-bit timer, assume counter was cleared
//! let config = EncoderConfig::default();
//! assert_eq!(config.period, 65535);
//!
//! // Or customize
//! let config = EncoderConfig::default()
//!     .with_label("left-wheel")
//!     .with_period(4095)
//!     .with_initial_count(InitialCount::ReadHardware)
//!     .with_reversed(true);
//! assert!(config.validate(u16::MAX as u32).is_ok());
//! ```

use heapless::String as HString;

use crate::error::ConfigError;
use crate::traits::DEFAULT_PERIOD;

/// Maximum length of an encoder label
pub const MAX_LABEL: usize = 32;

/// Type alias for encoder labels
pub type Label = HString<MAX_LABEL>;

/// Create a Label from a &str, truncating if too long
pub fn label(s: &str) -> Label {
    let mut hs = Label::new();
    // Stop at the last char boundary that fits
    let valid_end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|end| *end <= MAX_LABEL)
        .last()
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

/// How the encoder picks its reference count at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InitialCount {
    /// Assume the counter reads 0 (cleared when it was configured).
    #[default]
    Zero,
    /// Read the counter once and use that value.
    ReadHardware,
}

/// Quadrature encoder configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncoderConfig {
    /// Name used in log messages
    pub label: Label,
    /// Counter modulus; counts range over `0..=period`
    pub period: u32,
    /// Reference count policy
    pub initial_count: InitialCount,
    /// Invert the sign of every delta (A/B swapped)
    pub reversed: bool,
    /// Input glitch filter in APB clock cycles (0 = disabled)
    pub filter_cycles: u16,
    /// Poll interval of the control loop in milliseconds
    pub poll_interval_ms: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            label: label("encoder"),
            period: DEFAULT_PERIOD,
            initial_count: InitialCount::Zero,
            reversed: false,
            filter_cycles: 0,
            poll_interval_ms: 10,
        }
    }
}

impl EncoderConfig {
    /// Set the label
    pub fn with_label(mut self, name: &str) -> Self {
        self.label = label(name);
        self
    }

    /// Set the counter modulus
    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    /// Set the reference count policy
    pub fn with_initial_count(mut self, initial_count: InitialCount) -> Self {
        self.initial_count = initial_count;
        self
    }

    /// Set direction inversion
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Set the input glitch filter
    pub fn with_filter_cycles(mut self, cycles: u16) -> Self {
        self.filter_cycles = cycles;
        self
    }

    /// Set the poll interval
    pub fn with_poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Check the modulus against what a counter backend can represent.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroPeriod`] if `period` is 0
    /// - [`ConfigError::PeriodTooLarge`] if `period` exceeds `max_period`
    /// - [`ConfigError::ZeroPollInterval`] if `poll_interval_ms` is 0
    pub fn validate(&self, max_period: u32) -> Result<(), ConfigError> {
        if self.period == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.period > max_period {
            return Err(ConfigError::PeriodTooLarge {
                period: self.period,
                max: max_period,
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Fastest shaft speed, in counts per second, that decodes correctly at
    /// the configured poll interval.
    ///
    /// ```rust
    /// use quad_encoder::config::EncoderConfig;
    ///
    /// let config = EncoderConfig::default()
    ///     .with_period(1000)
    ///     .with_poll_interval_ms(10);
    /// assert_eq!(config.max_counts_per_second(), 50_000);
    /// ```
    pub fn max_counts_per_second(&self) -> u64 {
        if self.poll_interval_ms == 0 {
            return u64::MAX;
        }
        u64::from(self.period / 2) * 1000 / u64::from(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.label.as_str(), "encoder");
        assert_eq!(config.period, 65535);
        assert_eq!(config.initial_count, InitialCount::Zero);
        assert!(!config.reversed);
        assert_eq!(config.filter_cycles, 0);
    }

    #[test]
    fn builder_pattern() {
        let config = EncoderConfig::default()
            .with_label("spindle")
            .with_period(1999)
            .with_initial_count(InitialCount::ReadHardware)
            .with_reversed(true)
            .with_filter_cycles(100)
            .with_poll_interval_ms(5);

        assert_eq!(config.label.as_str(), "spindle");
        assert_eq!(config.period, 1999);
        assert_eq!(config.initial_count, InitialCount::ReadHardware);
        assert!(config.reversed);
        assert_eq!(config.filter_cycles, 100);
        assert_eq!(config.poll_interval_ms, 5);
    }

    #[test]
    fn label_truncation() {
        let long_input = "a".repeat(100);
        let s = label(&long_input);
        assert_eq!(s.len(), MAX_LABEL);
    }

    #[test]
    fn label_truncation_respects_char_boundary() {
        // 31 ASCII bytes followed by a 2-byte char that does not fit
        let mut input = "b".repeat(31);
        input.push('é');
        let s = label(&input);
        assert_eq!(s.len(), 31);
    }

    #[test]
    fn validate_rejects_zero_period() {
        let config = EncoderConfig::default().with_period(0);
        assert_eq!(config.validate(u32::MAX), Err(ConfigError::ZeroPeriod));
    }

    #[test]
    fn validate_rejects_oversized_period() {
        let config = EncoderConfig::default().with_period(65535);
        assert_eq!(
            config.validate(32766),
            Err(ConfigError::PeriodTooLarge {
                period: 65535,
                max: 32766
            })
        );
    }

    #[test]
    fn validate_rejects_zero_poll_interval() {
        let config = EncoderConfig::default().with_poll_interval_ms(0);
        assert_eq!(config.validate(u32::MAX), Err(ConfigError::ZeroPollInterval));
    }

    #[test]
    fn validate_accepts_limit() {
        let config = EncoderConfig::default().with_period(32766);
        assert!(config.validate(32766).is_ok());
    }

    #[test]
    fn max_counts_per_second_uses_half_period() {
        let config = EncoderConfig::default().with_poll_interval_ms(1);
        assert_eq!(config.max_counts_per_second(), 32767 * 1000);
    }
}
