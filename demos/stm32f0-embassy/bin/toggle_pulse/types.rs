use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::signal::Signal;
use toggle_pulse::PressEvent;

// Re-export the time types from the library
pub use stm32f0_embassy::time_wrapper::{EmbassyDuration, EmbassyInstant, EmbassyTimeSource};

/// Signal from button_task to pulse_task for every accepted press
pub static PRESS_SIGNAL: Signal<ThreadModeRawMutex, PressEvent<EmbassyDuration>> = Signal::new();

/// How long one press keeps the LED pulsing
pub const PULSE_DURATION_MS: u64 = 3000;

/// Render interval while a pulse is running (~60 fps)
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Rising edges closer together than this are contact bounce
pub const DEBOUNCE_MS: u64 = 50;
