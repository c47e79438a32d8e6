//! Color constants and brightness helpers.
//!
//! All colors are `palette::Srgb<f32>` with components in 0.0-1.0.

use palette::Srgb;

pub const COLOR_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);
pub const RED: Srgb = Srgb::new(1.0, 0.0, 0.0);
pub const GREEN: Srgb = Srgb::new(0.0, 1.0, 0.0);
pub const BLUE: Srgb = Srgb::new(0.0, 0.0, 1.0);
pub const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

/// Scales every channel of `color` by `brightness`, clamped to 0.0-1.0.
#[inline]
pub fn scale(color: Srgb, brightness: f32) -> Srgb {
    let brightness = brightness.clamp(0.0, 1.0);
    Srgb::new(
        color.red * brightness,
        color.green * brightness,
        color.blue * brightness,
    )
}
