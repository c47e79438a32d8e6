//! Single-shot countdown timers.
//!
//! [`OneShotTimer`] is the contract the controller needs from a timer: arm it
//! for a duration, cancel it, ask whether it is armed. Expiry is delivered to
//! the controller from outside (a hardware timer callback) or, for timers that
//! implement [`PolledTimer`], discovered by polling from the main loop.

use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// A timer that fires at most once per [`arm`](OneShotTimer::arm).
///
/// A timer that has fired must report `is_armed() == false` before its expiry
/// reaches the controller. An expiry seen while still armed is taken to belong
/// to a countdown that was discarded by a later `arm`.
pub trait OneShotTimer<D: TimeDuration> {
    /// Arms the timer for `duration`, discarding any previous countdown.
    fn arm(&mut self, duration: D);

    /// Cancels the countdown. Harmless when not armed.
    fn disarm(&mut self);

    /// Returns true while a countdown is pending.
    fn is_armed(&self) -> bool;
}

/// A one-shot timer whose expiry is discovered by polling.
pub trait PolledTimer<D: TimeDuration>: OneShotTimer<D> {
    /// Returns true exactly once when the armed duration has elapsed, and
    /// disarms the timer in the same step.
    fn poll(&mut self) -> bool;
}

/// Software one-shot timer on top of a [`TimeSource`].
///
/// Measures elapsed time from the arm instant with
/// [`TimeInstant::duration_since`], so counters that wrap are handled as long
/// as the instant type computes differences with wrapping arithmetic.
pub struct SoftTimer<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    armed_at: Option<I>,
    duration: I::Duration,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> SoftTimer<'t, I, T> {
    /// Creates a disarmed timer.
    pub fn new(time_source: &'t T) -> Self {
        Self {
            time_source,
            armed_at: None,
            duration: I::Duration::ZERO,
        }
    }

    /// Time left before expiry, `None` when disarmed.
    pub fn remaining(&self) -> Option<I::Duration> {
        self.armed_at.map(|armed_at| {
            let elapsed = self.time_source.now().duration_since(armed_at);
            I::Duration::from_millis(
                self.duration
                    .as_millis()
                    .saturating_sub(elapsed.as_millis()),
            )
        })
    }
}

impl<'t, I: TimeInstant, T: TimeSource<I>> OneShotTimer<I::Duration> for SoftTimer<'t, I, T> {
    fn arm(&mut self, duration: I::Duration) {
        self.armed_at = Some(self.time_source.now());
        self.duration = duration;
    }

    fn disarm(&mut self) {
        self.armed_at = None;
    }

    fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }
}

impl<'t, I: TimeInstant, T: TimeSource<I>> PolledTimer<I::Duration> for SoftTimer<'t, I, T> {
    fn poll(&mut self) -> bool {
        let Some(armed_at) = self.armed_at else {
            return false;
        };

        let elapsed = self.time_source.now().duration_since(armed_at);
        if elapsed.as_millis() >= self.duration.as_millis() {
            self.armed_at = None;
            true
        } else {
            false
        }
    }
}
