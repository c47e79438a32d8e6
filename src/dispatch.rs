//! Interrupt-safe event wiring.
//!
//! Press interrupts and timer callbacks arrive asynchronously to each other.
//! [`PulseDispatcher`] runs every handler inside one critical section so the
//! two can never interleave and leave the timer and animation out of step.
//!
//! ```ignore
//! static PULSE: PulseDispatcher<Controller> = PulseDispatcher::new(...);
//!
//! #[interrupt]
//! fn EXTI4_15() {
//!     if let Some(press) = detector.on_edge(Edge::Rising, now()) {
//!         PULSE.on_press(press);
//!     }
//! }
//!
//! #[interrupt]
//! fn TIM2() {
//!     PULSE.on_timer_expire();
//! }
//! ```

use core::cell::RefCell;
use critical_section::Mutex;

use crate::animation::{PulseAnimation, Render, ServiceTiming};
use crate::controller::{PulseController, Transition};
use crate::edge::PressEvent;
use crate::time::TimeDuration;
use crate::timer::{OneShotTimer, PolledTimer};

/// Messages accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseEvent<D> {
    /// The button was pressed.
    Press(PressEvent<D>),
    /// The pulse timer ran out.
    TimerExpired,
}

impl<D> From<PressEvent<D>> for PulseEvent<D> {
    fn from(press: PressEvent<D>) -> Self {
        PulseEvent::Press(press)
    }
}

/// Owns a [`PulseController`] behind a critical-section mutex.
///
/// Shareable between interrupt handlers (`&self` methods only). Place it in a
/// `static` when handlers need it, or keep it local to a single task.
pub struct PulseDispatcher<C> {
    controller: Mutex<RefCell<C>>,
}

impl<C> PulseDispatcher<C> {
    /// Wraps a controller.
    pub const fn new(controller: C) -> Self {
        Self {
            controller: Mutex::new(RefCell::new(controller)),
        }
    }

    /// Consumes the dispatcher, returning the controller.
    pub fn into_inner(self) -> C {
        self.controller.into_inner().into_inner()
    }
}

impl<D, A, T> PulseDispatcher<PulseController<D, A, T>>
where
    D: TimeDuration,
    A: PulseAnimation<D>,
    T: OneShotTimer<D>,
{
    /// Delivers one event inside a critical section.
    pub fn dispatch(&self, event: PulseEvent<D>) -> Transition {
        critical_section::with(|cs| self.controller.borrow_ref_mut(cs).handle(event))
    }

    /// Press handler, for the edge interrupt.
    pub fn on_press(&self, event: PressEvent<D>) -> Transition {
        self.dispatch(PulseEvent::Press(event))
    }

    /// Expiry handler, for the timer callback.
    pub fn on_timer_expire(&self) -> Transition {
        self.dispatch(PulseEvent::TimerExpired)
    }

    /// Runs `f` with read-only access to the controller.
    pub fn read<R>(&self, f: impl FnOnce(&PulseController<D, A, T>) -> R) -> R {
        critical_section::with(|cs| f(&self.controller.borrow_ref(cs)))
    }
}

impl<D, A, T> PulseDispatcher<PulseController<D, A, T>>
where
    D: TimeDuration,
    A: PulseAnimation<D> + Render,
    T: PolledTimer<D>,
{
    /// Main-loop step; see [`PulseController::service`].
    pub fn service(&self) -> ServiceTiming {
        critical_section::with(|cs| self.controller.borrow_ref_mut(cs).service())
    }
}
