//! Shared test infrastructure for toggle-pulse integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use palette::Srgb;
use toggle_pulse::{
    PulseConfig, PulseController, PulsingLed, RgbLed, SoftTimer, TimeDuration, TimeInstant,
    TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records all color changes for testing
pub struct MockLed {
    current_color: Srgb,
    color_history: heapless::Vec<Srgb, 256>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            current_color: Srgb::new(0.0, 0.0, 0.0),
            color_history: heapless::Vec::new(),
        }
    }

    pub fn get_last_color(&self) -> Srgb {
        self.current_color
    }

    pub fn color_history(&self) -> &[Srgb] {
        &self.color_history
    }
}

impl RgbLed for MockLed {
    fn set_color(&mut self, color: Srgb) {
        self.current_color = color;
        let _ = self.color_history.push(color);
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }

    pub fn now_millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Controller assembled from the software collaborators
// ============================================================================

pub type TestAnimation<'t> = PulsingLed<'t, TestInstant, MockLed, MockTimeSource>;
pub type TestTimer<'t> = SoftTimer<'t, TestInstant, MockTimeSource>;
pub type TestController<'t> = PulseController<TestDuration, TestAnimation<'t>, TestTimer<'t>>;

/// Controller with a 3000 ms green pulse on a mock LED and clock
pub fn software_controller(clock: &MockTimeSource) -> TestController<'_> {
    PulseController::new(
        PulsingLed::new(MockLed::new(), clock),
        SoftTimer::new(clock),
        PulseConfig::default(),
    )
}

// ============================================================================
// Re-export color constants from library for test convenience
// ============================================================================

#[allow(unused_imports)]
pub use toggle_pulse::{BLUE, COLOR_OFF, GREEN, RED};

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}

/// Brightness of a pure-green frame
pub fn green_level(color: Srgb) -> f32 {
    color.green
}
