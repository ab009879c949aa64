//! Configuration errors.
//!
//! Runtime counter failures are not wrapped: they surface as the counter
//! backend's own `Error` type through
//! [`QuadratureEncoder::update()`](crate::QuadratureEncoder::update).

use core::fmt;

/// Invalid encoder configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The counter modulus is zero.
    ZeroPeriod,
    /// The counter modulus does not fit the hardware counter.
    PeriodTooLarge {
        /// Requested modulus
        period: u32,
        /// Largest modulus the backend supports
        max: u32,
    },
    /// The poll interval is zero.
    ZeroPollInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPeriod => write!(f, "counter period must be non-zero"),
            Self::PeriodTooLarge { period, max } => {
                write!(f, "counter period {} exceeds hardware maximum {}", period, max)
            }
            Self::ZeroPollInterval => write!(f, "poll interval must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
