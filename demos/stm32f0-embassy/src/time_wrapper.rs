use toggle_pulse::{TimeDuration, TimeInstant, TimeSource};

/// Newtype wrapper for embassy_time::Duration to implement TimeDuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, defmt::Format)]
pub struct EmbassyDuration(pub embassy_time::Duration);

impl TimeDuration for EmbassyDuration {
    const ZERO: Self = EmbassyDuration(embassy_time::Duration::from_ticks(0));

    fn as_millis(&self) -> u64 {
        self.0.as_millis()
    }

    fn from_millis(millis: u64) -> Self {
        EmbassyDuration(embassy_time::Duration::from_millis(millis))
    }
}

/// Newtype wrapper for embassy_time::Instant to implement TimeInstant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EmbassyInstant(pub embassy_time::Instant);

impl TimeInstant for EmbassyInstant {
    type Duration = EmbassyDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        EmbassyDuration(self.0.saturating_duration_since(earlier.0))
    }
}

/// Time source implementation for Embassy
#[derive(Default)]
pub struct EmbassyTimeSource;

impl EmbassyTimeSource {
    /// Creates a new Embassy time source
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource<EmbassyInstant> for EmbassyTimeSource {
    fn now(&self) -> EmbassyInstant {
        EmbassyInstant(embassy_time::Instant::now())
    }
}
