//! Time abstraction traits for platform-agnostic timing.
//!
//! The controller never reads a clock itself. Timers and animations that need
//! one take a [`TimeSource`], so the same logic runs against a SysTick counter,
//! `embassy_time`, `std::time`, or a mock clock in tests.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Returns true for a zero-length duration.
    #[inline]
    fn is_zero(&self) -> bool {
        self.as_millis() == 0
    }
}

/// Trait abstraction for instant types.
///
/// Only forward differences are required. Implementations backed by a wrapping
/// counter should compute `duration_since` with wrapping arithmetic.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Millisecond duration usable on any target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u64);

impl TimeDuration for Millis {
    const ZERO: Self = Millis(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        Millis(millis)
    }
}

#[cfg(feature = "std")]
pub use self::std_time::{StdInstant, StdTimeSource};

#[cfg(feature = "std")]
mod std_time {
    use super::{Millis, TimeInstant, TimeSource};

    /// `std::time::Instant` wrapper for host builds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub struct StdInstant(pub std::time::Instant);

    impl TimeInstant for StdInstant {
        type Duration = Millis;

        fn duration_since(&self, earlier: Self) -> Millis {
            Millis(self.0.saturating_duration_since(earlier.0).as_millis() as u64)
        }
    }

    /// Monotonic host clock.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StdTimeSource;

    impl StdTimeSource {
        /// Creates a new host time source.
        pub fn new() -> Self {
            Self
        }
    }

    impl TimeSource<StdInstant> for StdTimeSource {
        fn now(&self) -> StdInstant {
            StdInstant(std::time::Instant::now())
        }
    }
}
