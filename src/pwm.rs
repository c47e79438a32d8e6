//! PWM-driven RGB LED.

use crate::animation::RgbLed;
use crate::log;
use embedded_hal::pwm::SetDutyCycle;
use palette::Srgb;

/// How the LED's shared pin is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Shared anode to VCC; a channel lights when its pin is driven low, so
    /// duty is inverted.
    CommonAnode,
    /// Shared cathode to ground; duty maps directly to brightness.
    CommonCathode,
}

/// RGB LED implementation for three PWM channels.
///
/// Handles duty cycle conversion and common anode inversion. Channel write
/// errors are logged and dropped since [`RgbLed::set_color`] cannot fail.
pub struct PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    red: R,
    green: G,
    blue: B,
    polarity: Polarity,
}

impl<R, G, B> PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    /// Creates a new RGB LED controller.
    ///
    /// # Arguments
    /// * `red` - PWM channel for red LED
    /// * `green` - PWM channel for green LED
    /// * `blue` - PWM channel for blue LED
    /// * `polarity` - How the shared pin is wired
    pub fn new(red: R, green: G, blue: B, polarity: Polarity) -> Self {
        Self {
            red,
            green,
            blue,
            polarity,
        }
    }

    /// Returns how the LED is wired.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Consumes the LED, returning the channels.
    pub fn into_channels(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }

    /// Returns references to the channels.
    pub fn channels(&self) -> (&R, &G, &B) {
        (&self.red, &self.green, &self.blue)
    }
}

/// Converts a 0.0-1.0 channel value into a duty cycle out of `max_duty`.
pub fn to_duty(value: f32, max_duty: u16, polarity: Polarity) -> u16 {
    let value_clamped = value.clamp(0.0, 1.0);
    let duty = (value_clamped * max_duty as f32) as u16;

    match polarity {
        Polarity::CommonAnode => max_duty - duty,
        Polarity::CommonCathode => duty,
    }
}

fn write_channel<P: SetDutyCycle>(channel: &mut P, value: f32, polarity: Polarity, name: &str) {
    let duty = to_duty(value, channel.max_duty_cycle(), polarity);
    if channel.set_duty_cycle(duty).is_err() {
        log::warn!("PWM write failed on {} channel", name);
    }
}

impl<R, G, B> RgbLed for PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_color(&mut self, color: Srgb) {
        write_channel(&mut self.red, color.red, self.polarity, "red");
        write_channel(&mut self.green, color.green, self.polarity, "green");
        write_channel(&mut self.blue, color.blue, self.polarity, "blue");
    }
}
