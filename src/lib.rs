#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`PulseController`**: Two-state machine (`Idle`/`Pulsing`) that starts or restarts a pulse on every press and ends it when the timer expires
//! - **`PulseConfig`**: Immutable pulse duration and color
//! - **`PressEvent`**: A button press, with the time since the previous one for diagnostics
//! - **`PulseDispatcher`**: Runs the controller's handlers inside a critical section, for interrupt context
//! - **`PulseAnimation`**: Trait to implement for your animation device (start / stop / brightness)
//! - **`OneShotTimer`**: Trait to implement for your timer; `SoftTimer` implements it on any `TimeSource`
//! - **`PulsingLed`**: Software pulse animation for any `RgbLed`
//! - **`RgbLed`**: Trait to implement for your LED hardware; `PwmRgbLed` implements it for `embedded-hal` PWM channels
//! - **`RisingEdgeDetector`**: Turns pin levels or edge interrupts into press events
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Colors are `Srgb<f32>` (0.0-1.0 range). When implementing `RgbLed` for your
//! hardware, convert these values to your device's native format.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

mod log;

pub mod animation;
pub mod colors;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod edge;
pub mod pwm;
pub mod time;
pub mod timer;

pub use animation::{
    PULSE_HIGH_BRIGHTNESS, PULSE_LOW_BRIGHTNESS, PulseAnimation, PulsingLed, Render, RgbLed,
    ServiceTiming,
};
pub use colors::{BLUE, COLOR_OFF, GREEN, RED, WHITE};
pub use config::{ConfigError, DEFAULT_PULSE_COLOR, DEFAULT_PULSE_DURATION_MS, PulseConfig};
pub use controller::{PulseController, PulseState, Transition};
pub use dispatch::{PulseDispatcher, PulseEvent};
pub use edge::{Edge, PressEvent, RisingEdgeDetector};
pub use pwm::{Polarity, PwmRgbLed};
pub use time::{Millis, TimeDuration, TimeInstant, TimeSource};
pub use timer::{OneShotTimer, PolledTimer, SoftTimer};

#[cfg(feature = "std")]
pub use time::{StdInstant, StdTimeSource};
