use defmt::info;
use embassy_futures::select::{Either, select};
use embassy_stm32::peripherals::TIM3;
use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_time::{Duration, Timer};
use toggle_pulse::{
    GREEN, Polarity, PulseConfig, PulseController, PulsingLed, PwmRgbLed, ServiceTiming,
    SoftTimer, TimeDuration,
};

use crate::types::{
    EmbassyDuration, EmbassyTimeSource, FRAME_INTERVAL_MS, PRESS_SIGNAL, PULSE_DURATION_MS,
};

#[embassy_executor::task]
pub async fn pulse_task(pwm: SimplePwm<'static, TIM3>) {
    info!("Starting pulse task...");

    let mut channels = pwm.split();
    channels.ch1.enable();
    channels.ch2.enable();
    channels.ch3.enable();

    // Common anode LED on TIM3 CH1-CH3
    let led = PwmRgbLed::new(
        channels.ch1,
        channels.ch2,
        channels.ch3,
        Polarity::CommonAnode,
    );

    let time_source = EmbassyTimeSource::new();
    let config = match PulseConfig::new(EmbassyDuration::from_millis(PULSE_DURATION_MS), GREEN) {
        Ok(config) => config,
        Err(e) => defmt::panic!("invalid pulse config: {}", e),
    };
    let mut controller = PulseController::new(
        PulsingLed::new(led, &time_source),
        SoftTimer::new(&time_source),
        config,
    );

    info!("Pulse controller ready, LED off");

    loop {
        if controller.is_pulsing() {
            let frame = Timer::after(Duration::from_millis(FRAME_INTERVAL_MS));
            if let Either::First(press) = select(PRESS_SIGNAL.wait(), frame).await {
                controller.on_press(press);
            }
        } else {
            let press = PRESS_SIGNAL.wait().await;
            controller.on_press(press);
        }

        if controller.service() == ServiceTiming::Idle {
            info!("Pulse finished");
        }
    }
}
