//! Press-to-pulse state machine.
//!
//! Provides [`PulseController`], which owns a one-shot timer and a pulse
//! animation device and keeps them in lockstep: the animation runs exactly
//! while the timer is armed.
//!
//! ```text
//!          press                     press (restart)
//!   Idle ─────────▶ Pulsing ◀────────────┐
//!    ▲                 │  └──────────────┘
//!    └──── expire ─────┘
//! ```

use crate::animation::{PulseAnimation, Render, ServiceTiming};
use crate::config::PulseConfig;
use crate::dispatch::PulseEvent;
use crate::edge::PressEvent;
use crate::log;
use crate::time::TimeDuration;
use crate::timer::{OneShotTimer, PolledTimer};

/// The current state of a pulse controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseState {
    /// No pulse. Timer disarmed, animation stopped.
    Idle,
    /// Pulse window open. Timer armed, animation running.
    Pulsing,
}

/// What a handler did, reported for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// `Idle -> Pulsing`.
    Started,
    /// `Pulsing -> Pulsing`; the previous window was discarded.
    Restarted,
    /// `Pulsing -> Idle` on timer expiry.
    Expired,
    /// Expiry delivered while idle; nothing was touched.
    Ignored,
}

/// Maps button presses to a timed, re-triggerable pulse.
///
/// The controller is the only writer of both the timer and the animation
/// device. Every press opens a fresh window of `config.duration()`; expiry of
/// that window stops the animation and forces it dark.
///
/// # Type Parameters
/// * `D` - Duration type
/// * `A` - Animation device
/// * `T` - One-shot timer
pub struct PulseController<D: TimeDuration, A: PulseAnimation<D>, T: OneShotTimer<D>> {
    animation: A,
    timer: T,
    config: PulseConfig<D>,
    state: PulseState,
}

impl<D, A, T> PulseController<D, A, T>
where
    D: TimeDuration,
    A: PulseAnimation<D>,
    T: OneShotTimer<D>,
{
    /// Creates an idle controller, disarming the timer and turning the
    /// animation off.
    pub fn new(mut animation: A, mut timer: T, config: PulseConfig<D>) -> Self {
        timer.disarm();
        animation.stop();
        animation.set_brightness(0.0);

        log::info!("Initialized, pulse duration {} ms", config.duration().as_millis());

        Self {
            animation,
            timer,
            config,
            state: PulseState::Idle,
        }
    }

    /// Handles a message by dispatching to the matching handler.
    pub fn handle(&mut self, event: PulseEvent<D>) -> Transition {
        match event {
            PulseEvent::Press(press) => self.on_press(press),
            PulseEvent::TimerExpired => self.on_timer_expire(),
        }
    }

    /// Starts the pulse, or restarts it from the beginning if one is running.
    ///
    /// Callable in any state. The remaining time of a running window is
    /// discarded, never resumed.
    pub fn on_press(&mut self, event: PressEvent<D>) -> Transition {
        let transition = match self.state {
            PulseState::Pulsing => {
                log::info!(
                    "Stopping pulse to restart after {} ms",
                    event.delta.map(|d| d.as_millis()).unwrap_or(0)
                );
                self.timer.disarm();
                self.animation.stop();
                Transition::Restarted
            }
            PulseState::Idle => Transition::Started,
        };

        let duration = self.config.duration();
        log::info!("Starting pulse for {} ms", duration.as_millis());
        self.timer.arm(duration);
        self.animation.start_pulse(self.config.color(), duration);
        self.state = PulseState::Pulsing;

        transition
    }

    /// Ends the pulse after its window ran out.
    ///
    /// The timer has already disarmed itself by firing. Delivered while idle,
    /// or while the timer is still armed, this is a no-op: the latter is a late
    /// expiry from a window that a press already replaced.
    pub fn on_timer_expire(&mut self) -> Transition {
        if self.state == PulseState::Idle {
            log::warn!("Timer expiry while idle ignored");
            return Transition::Ignored;
        }
        if self.timer.is_armed() {
            log::warn!("Stale timer expiry ignored, window was restarted");
            return Transition::Ignored;
        }

        log::info!("Stopping pulse after {} ms", self.config.duration().as_millis());
        self.animation.stop();
        self.animation.set_brightness(0.0);
        self.state = PulseState::Idle;

        Transition::Expired
    }

    /// Returns the current state.
    pub fn state(&self) -> PulseState {
        self.state
    }

    /// Returns true while a pulse window is open.
    pub fn is_pulsing(&self) -> bool {
        self.state == PulseState::Pulsing
    }

    /// Returns the pulse configuration.
    pub fn config(&self) -> &PulseConfig<D> {
        &self.config
    }

    /// Returns a reference to the animation device.
    pub fn animation(&self) -> &A {
        &self.animation
    }

    /// Returns a reference to the timer.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Consumes the controller, returning the animation device and timer.
    pub fn into_parts(self) -> (A, T) {
        (self.animation, self.timer)
    }
}

impl<D, A, T> PulseController<D, A, T>
where
    D: TimeDuration,
    A: PulseAnimation<D> + Render,
    T: PolledTimer<D>,
{
    /// Main-loop step for software timers and animations.
    ///
    /// Polls the timer, runs [`on_timer_expire`](Self::on_timer_expire) if it
    /// fired, then renders one animation frame.
    pub fn service(&mut self) -> ServiceTiming {
        if self.timer.poll() {
            self.on_timer_expire();
        }

        match self.state {
            PulseState::Pulsing => self.animation.render(),
            PulseState::Idle => ServiceTiming::Idle,
        }
    }
}
