//! Integration tests for PulseController driven by the software timer and animation

mod common;
use common::*;

use toggle_pulse::{
    OneShotTimer, PULSE_HIGH_BRIGHTNESS, PULSE_LOW_BRIGHTNESS, PressEvent, PulseAnimation,
    PulseConfig, PulseController, PulseState, PulsingLed, ServiceTiming, SoftTimer, Transition,
};

/// Steps the clock 1 ms at a time up to `until_ms`, servicing on every tick and
/// pressing at the listed instants. Returns the instant the pulse ended, if it did.
fn run(
    controller: &mut TestController<'_>,
    clock: &MockTimeSource,
    presses: &[u64],
    until_ms: u64,
) -> Option<u64> {
    let mut ended_at = None;

    while clock.now_millis() <= until_ms {
        let now = clock.now_millis();
        let was_pulsing = controller.is_pulsing();
        controller.service();
        if was_pulsing && !controller.is_pulsing() {
            ended_at = Some(now);
        }

        if presses.contains(&now) {
            controller.on_press(PressEvent::first());
        }

        clock.advance(TestDuration(1));
    }

    ended_at
}

#[test]
fn single_press_pulses_for_exactly_one_duration() {
    let clock = MockTimeSource::new();
    let mut controller = software_controller(&clock);

    let transition = controller.on_press(PressEvent::first());
    assert_eq!(transition, Transition::Started);

    clock.advance(TestDuration(2999));
    assert_eq!(controller.service(), ServiceTiming::Continuous);
    assert_eq!(controller.state(), PulseState::Pulsing);
    assert!(controller.animation().is_running());

    clock.advance(TestDuration(1));
    assert_eq!(controller.service(), ServiceTiming::Idle);
    assert_eq!(controller.state(), PulseState::Idle);
    assert!(!controller.animation().is_running());
    assert!(!controller.timer().is_armed());
}

#[test]
fn second_press_moves_final_stop_to_one_duration_after_it() {
    let clock = MockTimeSource::new();
    let mut controller = software_controller(&clock);

    let ended_at = run(&mut controller, &clock, &[0, 1000], 5000);

    assert_eq!(ended_at, Some(4000));
}

#[test]
fn rapid_presses_keep_pulse_alive_until_last_press_plus_duration() {
    let clock = MockTimeSource::new();
    let mut controller = software_controller(&clock);
    let presses = [0, 500, 1000, 1500, 2000];

    let ended_at = run(&mut controller, &clock, &presses, 6000);

    assert_eq!(ended_at, Some(5000));
}

#[test]
fn press_mid_pulse_restarts_animation_from_zero() {
    let clock = MockTimeSource::new();
    let mut controller = software_controller(&clock);
    controller.on_press(PressEvent::first());

    clock.advance(TestDuration(1500));
    controller.service();
    assert!(colors_equal(
        controller.animation().current_color(),
        toggle_pulse::Srgb::new(0.0, PULSE_HIGH_BRIGHTNESS, 0.0)
    ));

    let transition = controller.on_press(PressEvent::new(Some(TestDuration(1500))));

    assert_eq!(transition, Transition::Restarted);
    assert_eq!(controller.animation().elapsed_time(), Some(TestDuration(0)));
    assert!(colors_equal(
        controller.animation().current_color(),
        toggle_pulse::Srgb::new(0.0, PULSE_LOW_BRIGHTNESS, 0.0)
    ));
    assert_eq!(controller.timer().remaining(), Some(TestDuration(3000)));
}

#[test]
fn expiry_leaves_led_dark() {
    let clock = MockTimeSource::new();
    let mut controller = software_controller(&clock);
    controller.on_press(PressEvent::first());

    clock.advance(TestDuration(1000));
    controller.service();
    assert!(green_level(controller.animation().current_color()) > 0.0);

    clock.advance(TestDuration(2000));
    controller.service();

    assert!(colors_equal(controller.animation().current_color(), COLOR_OFF));
    assert!(colors_equal(controller.animation().led().get_last_color(), COLOR_OFF));
}

#[test]
fn expiry_while_idle_is_harmless() {
    let clock = MockTimeSource::new();
    let mut controller = software_controller(&clock);
    let writes_before = controller.animation().led().color_history().len();

    assert_eq!(controller.on_timer_expire(), Transition::Ignored);

    assert_eq!(controller.state(), PulseState::Idle);
    assert_eq!(controller.animation().led().color_history().len(), writes_before);
}

#[test]
fn idle_controller_never_expires() {
    let clock = MockTimeSource::new();
    let mut controller = software_controller(&clock);

    for _ in 0..100 {
        clock.advance(TestDuration(100));
        assert_eq!(controller.service(), ServiceTiming::Idle);
    }
    assert_eq!(controller.state(), PulseState::Idle);
}

#[test]
fn pulse_uses_configured_duration_and_color() {
    let clock = MockTimeSource::new();
    let config = PulseConfig::new(TestDuration(10_000), BLUE).unwrap();
    let mut controller = PulseController::new(
        PulsingLed::new(MockLed::new(), &clock),
        SoftTimer::new(&clock),
        config,
    );

    controller.on_press(PressEvent::first());
    let color = controller.animation().current_color();
    assert!(color.blue > 0.0 && color.green == 0.0 && color.red == 0.0);

    clock.advance(TestDuration(9999));
    controller.service();
    assert!(controller.is_pulsing());

    clock.advance(TestDuration(1));
    controller.service();
    assert!(!controller.is_pulsing());
}

#[test]
fn animation_runs_iff_timer_armed_for_arbitrary_press_schedules() {
    // Deterministic press schedule from a small LCG
    let mut seed: u32 = 0x1234_5678;
    let mut next = move || {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seed >> 16
    };

    let clock = MockTimeSource::new();
    let mut controller = software_controller(&clock);
    let mut last_press: Option<u64> = None;

    for _ in 0..20_000 {
        let now = clock.now_millis();
        controller.service();

        if next() % 700 == 0 {
            controller.on_press(PressEvent::first());
            last_press = Some(now);
        }

        let expected = last_press.is_some_and(|p| now < p + 3000);
        assert_eq!(controller.is_pulsing(), expected, "at t={now}");
        assert_eq!(
            controller.animation().is_running(),
            controller.timer().is_armed(),
            "at t={now}"
        );

        clock.advance(TestDuration(1));
    }
}
