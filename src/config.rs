//! Pulse configuration.

use crate::colors::GREEN;
use crate::time::TimeDuration;
use palette::Srgb;

/// Default pulse window length.
pub const DEFAULT_PULSE_DURATION_MS: u64 = 3000;

/// Default pulse color.
pub const DEFAULT_PULSE_COLOR: Srgb = GREEN;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pulse duration is zero.
    ZeroDuration,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroDuration => write!(f, "pulse duration must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Immutable pulse parameters: how long one pulse window lasts and which color
/// it pulses in.
///
/// The duration doubles as the animation period handed to the device, so one
/// window is one full breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseConfig<D: TimeDuration> {
    duration: D,
    color: Srgb,
}

impl<D: TimeDuration> PulseConfig<D> {
    /// Creates a validated configuration.
    ///
    /// # Errors
    /// * `ZeroDuration` - `duration` is zero
    pub fn new(duration: D, color: Srgb) -> Result<Self, ConfigError> {
        if duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(Self { duration, color })
    }

    /// Default color with a custom duration.
    pub fn with_duration_millis(millis: u64) -> Result<Self, ConfigError> {
        Self::new(D::from_millis(millis), DEFAULT_PULSE_COLOR)
    }

    /// Returns the length of one pulse window.
    pub fn duration(&self) -> D {
        self.duration
    }

    /// Returns the pulse color.
    pub fn color(&self) -> Srgb {
        self.color
    }
}

impl<D: TimeDuration> Default for PulseConfig<D> {
    fn default() -> Self {
        Self {
            duration: D::from_millis(DEFAULT_PULSE_DURATION_MS),
            color: DEFAULT_PULSE_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLUE;
    use crate::time::Millis;
    extern crate std;
    use std::string::ToString;

    #[test]
    fn default_is_three_seconds_of_green() {
        let config = PulseConfig::<Millis>::default();
        assert_eq!(config.duration(), Millis(3000));
        assert_eq!(config.color(), GREEN);
    }

    #[test]
    fn new_rejects_zero_duration() {
        let result = PulseConfig::new(Millis(0), BLUE);
        assert_eq!(result, Err(ConfigError::ZeroDuration));
    }

    #[test]
    fn with_duration_millis_keeps_default_color() {
        let config = PulseConfig::<Millis>::with_duration_millis(10_000).unwrap();
        assert_eq!(config.duration(), Millis(10_000));
        assert_eq!(config.color(), DEFAULT_PULSE_COLOR);
    }

    #[test]
    fn error_message_formats() {
        assert_eq!(
            ConfigError::ZeroDuration.to_string(),
            "pulse duration must be non-zero"
        );
    }
}
