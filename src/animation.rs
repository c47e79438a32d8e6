//! Pulse animation devices.
//!
//! Defines the [`PulseAnimation`] contract the controller drives, the
//! [`RgbLed`] trait for hardware abstraction, and [`PulsingLed`], a software
//! pulse animation that renders onto any [`RgbLed`].

use crate::colors::{COLOR_OFF, scale};
use crate::log;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use palette::Srgb;

/// Lowest brightness reached during a pulse.
pub const PULSE_LOW_BRIGHTNESS: f32 = 0.15;

/// Highest brightness reached during a pulse.
pub const PULSE_HIGH_BRIGHTNESS: f32 = 0.85;

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your LED hardware (GPIO, PWM, SPI, etc.) to allow
/// [`PulsingLed`] to control it.
pub trait RgbLed {
    /// Sets the LED to the specified RGB color.
    ///
    /// Color components are in the range 0.0-1.0. Implementations should
    /// convert these to their hardware's native format (e.g., PWM duty cycles,
    /// 8-bit RGB values). Handle any hardware errors internally - this method
    /// cannot fail.
    fn set_color(&mut self, color: Srgb);
}

/// A device that plays a continuous pulse effect on command.
///
/// Only the pulse controller issues these commands.
pub trait PulseAnimation<D: TimeDuration> {
    /// Begins pulsing `color`, one breathing cycle every `period`, until
    /// stopped. Replaces any effect already running.
    fn start_pulse(&mut self, color: Srgb, period: D);

    /// Halts the effect immediately. The output may keep its last level.
    fn stop(&mut self);

    /// Forces the output intensity, 0.0 (dark) to 1.0 (full).
    fn set_brightness(&mut self, brightness: f32);

    /// Returns true while a pulse effect is running.
    fn is_running(&self) -> bool;
}

/// Timing hint returned by frame rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming {
    /// Animation in progress. Service again at your desired frame rate
    /// (16-33ms gives 30-60 FPS).
    Continuous,

    /// Nothing is animating. No servicing needed until the next press.
    Idle,
}

/// A device whose frames are computed in software and must be serviced.
pub trait Render {
    /// Computes the current frame and pushes it to the output.
    fn render(&mut self) -> ServiceTiming;
}

/// Brightness envelope of a pulse at `elapsed` into a cycle of `period`.
///
/// Raised cosine between [`PULSE_LOW_BRIGHTNESS`] and
/// [`PULSE_HIGH_BRIGHTNESS`]: starts low, peaks at half period, returns low.
pub fn pulse_brightness(elapsed_ms: u64, period_ms: u64) -> f32 {
    if period_ms == 0 {
        return PULSE_HIGH_BRIGHTNESS;
    }

    let phase = (elapsed_ms % period_ms) as f32 / period_ms as f32;
    let angle = phase * 2.0 * core::f32::consts::PI;
    let swing = 0.5 * (1.0 - libm::cosf(angle));

    PULSE_LOW_BRIGHTNESS + (PULSE_HIGH_BRIGHTNESS - PULSE_LOW_BRIGHTNESS) * swing
}

/// Software pulse animation for a single RGB LED.
///
/// Owns the LED and tracks the pulse start time; [`render`](Render::render)
/// must be called at frame rate while running. The LED is written only when
/// the computed color changes.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `L` - LED implementation type
/// * `T` - Time source implementation type
pub struct PulsingLed<'t, I: TimeInstant, L: RgbLed, T: TimeSource<I>> {
    led: L,
    time_source: &'t T,
    color: Srgb,
    period: I::Duration,
    start_time: Option<I>,
    current_color: Srgb,
}

impl<'t, I: TimeInstant, L: RgbLed, T: TimeSource<I>> PulsingLed<'t, I, L, T> {
    /// Creates a stopped animation with the LED turned off.
    pub fn new(mut led: L, time_source: &'t T) -> Self {
        led.set_color(COLOR_OFF);

        Self {
            led,
            time_source,
            color: COLOR_OFF,
            period: I::Duration::ZERO,
            start_time: None,
            current_color: COLOR_OFF,
        }
    }

    /// Returns the color currently shown on the LED.
    pub fn current_color(&self) -> Srgb {
        self.current_color
    }

    /// Returns the time since the pulse started, if running.
    pub fn elapsed_time(&self) -> Option<I::Duration> {
        self.start_time
            .map(|start| self.time_source.now().duration_since(start))
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Consumes the animation, returning the LED.
    pub fn into_led(self) -> L {
        self.led
    }

    fn write(&mut self, color: Srgb) {
        if color != self.current_color {
            self.led.set_color(color);
            self.current_color = color;
        }
    }
}

impl<'t, I: TimeInstant, L: RgbLed, T: TimeSource<I>> PulseAnimation<I::Duration>
    for PulsingLed<'t, I, L, T>
{
    fn start_pulse(&mut self, color: Srgb, period: I::Duration) {
        self.color = color;
        self.period = period;
        self.start_time = Some(self.time_source.now());
        self.render();
    }

    fn stop(&mut self) {
        self.start_time = None;
    }

    fn set_brightness(&mut self, brightness: f32) {
        let color = scale(self.color, brightness);
        self.write(color);
    }

    fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

impl<'t, I: TimeInstant, L: RgbLed, T: TimeSource<I>> Render for PulsingLed<'t, I, L, T> {
    fn render(&mut self) -> ServiceTiming {
        let Some(elapsed) = self.elapsed_time() else {
            return ServiceTiming::Idle;
        };

        let brightness = pulse_brightness(elapsed.as_millis(), self.period.as_millis());
        let color = scale(self.color, brightness);
        self.write(color);
        log::debug!("pulse frame at {} ms, brightness {}", elapsed.as_millis(), brightness);

        ServiceTiming::Continuous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_starts_low_and_peaks_at_half_period() {
        assert!((pulse_brightness(0, 1000) - PULSE_LOW_BRIGHTNESS).abs() < 0.001);
        assert!((pulse_brightness(500, 1000) - PULSE_HIGH_BRIGHTNESS).abs() < 0.001);
        assert!((pulse_brightness(1000, 1000) - PULSE_LOW_BRIGHTNESS).abs() < 0.001);
    }

    #[test]
    fn envelope_is_symmetric() {
        let rising = pulse_brightness(250, 1000);
        let falling = pulse_brightness(750, 1000);
        assert!((rising - falling).abs() < 0.001);
        assert!(rising > PULSE_LOW_BRIGHTNESS && rising < PULSE_HIGH_BRIGHTNESS);
    }

    #[test]
    fn zero_period_holds_high_level() {
        assert_eq!(pulse_brightness(123, 0), PULSE_HIGH_BRIGHTNESS);
    }
}
