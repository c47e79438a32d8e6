//! Press detection on a pull-down, active-high button line.
//!
//! Only the press transition (low to high) produces a [`PressEvent`]. A release
//! never does, so one physical press restarts the pulse exactly once.

use crate::time::{TimeDuration, TimeInstant};
use embedded_hal::digital::InputPin;

/// A button press delivered to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent<D> {
    /// Time since the previous press, `None` for the first one.
    ///
    /// Diagnostic only; never used for control decisions.
    pub delta: Option<D>,
}

impl<D> PressEvent<D> {
    /// Creates a press with the time since the previous one.
    pub const fn new(delta: Option<D>) -> Self {
        Self { delta }
    }

    /// A press with no predecessor.
    pub const fn first() -> Self {
        Self { delta: None }
    }
}

/// Signal transition reported by an edge interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high: the button was pressed.
    Rising,
    /// High to low: the button was released.
    Falling,
}

/// Turns level samples or edge interrupts into press events.
///
/// The optional debounce window drops rising edges that arrive sooner than
/// `debounce` after the previous accepted press. Leave it at zero when the
/// input driver already filters bounces.
pub struct RisingEdgeDetector<I: TimeInstant> {
    level_high: bool,
    last_press: Option<I>,
    debounce: I::Duration,
}

impl<I: TimeInstant> RisingEdgeDetector<I> {
    /// Creates a detector with no software debounce, assuming the line rests low.
    pub fn new() -> Self {
        Self::with_debounce(I::Duration::ZERO)
    }

    /// Creates a detector with a software debounce window.
    pub fn with_debounce(debounce: I::Duration) -> Self {
        Self {
            level_high: false,
            last_press: None,
            debounce,
        }
    }

    /// Feeds one level sample taken at `now`.
    ///
    /// Returns a press only on a low-to-high transition.
    pub fn sample(&mut self, level_high: bool, now: I) -> Option<PressEvent<I::Duration>> {
        let was_high = core::mem::replace(&mut self.level_high, level_high);
        if level_high && !was_high {
            self.accept_press(now)
        } else {
            None
        }
    }

    /// Feeds an edge reported by an interrupt at `now`.
    pub fn on_edge(&mut self, edge: Edge, now: I) -> Option<PressEvent<I::Duration>> {
        match edge {
            Edge::Rising => {
                self.level_high = true;
                self.accept_press(now)
            }
            Edge::Falling => {
                self.level_high = false;
                None
            }
        }
    }

    /// Reads `pin` and feeds the level as a sample.
    ///
    /// # Errors
    /// Propagates the pin read error.
    pub fn poll_pin<P: InputPin>(
        &mut self,
        pin: &mut P,
        now: I,
    ) -> Result<Option<PressEvent<I::Duration>>, P::Error> {
        let level_high = pin.is_high()?;
        Ok(self.sample(level_high, now))
    }

    /// Returns the last observed line level.
    pub fn is_high(&self) -> bool {
        self.level_high
    }

    fn accept_press(&mut self, now: I) -> Option<PressEvent<I::Duration>> {
        let delta = self.last_press.map(|last| now.duration_since(last));

        if let Some(delta) = delta {
            if delta.as_millis() < self.debounce.as_millis() {
                return None;
            }
        }

        self.last_press = Some(now);
        Some(PressEvent::new(delta))
    }
}

impl<I: TimeInstant> Default for RisingEdgeDetector<I> {
    fn default() -> Self {
        Self::new()
    }
}
