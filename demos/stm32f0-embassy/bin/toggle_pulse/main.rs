#![no_std]
#![no_main]

use core::future::pending;
use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Pull;
use embassy_stm32::peripherals::TIM3;
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::{Config, Peripherals, bind_interrupts};
use {defmt_rtt as _, panic_probe as _};

mod button_task;
mod pulse_task;
mod types;

use button_task::button_task;
use pulse_task::pulse_task;

// Bind interrupts for Embassy's time driver
bind_interrupts!(
    struct Irqs {}
);

/// Configure system clock with HSE and PLL
fn configure_clock() -> Config {
    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });
        config.rcc.pll = Some(Pll {
            src: PllSource::HSE,
            prediv: PllPreDiv::DIV2,
            mul: PllMul::MUL12,
        });
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV1;
    }
    config
}

/// Initialize PWM for TIM3 (RGB LED: PA6, PA7, PB0)
fn setup_pwm_tim3(p: &mut Peripherals) -> SimplePwm<'static, TIM3> {
    let tim3 = unsafe { p.TIM3.clone_unchecked() };
    let pa6 = unsafe { p.PA6.clone_unchecked() };
    let pa7 = unsafe { p.PA7.clone_unchecked() };
    let pb0 = unsafe { p.PB0.clone_unchecked() };

    let ch1_pin = PwmPin::new(pa6, embassy_stm32::gpio::OutputType::PushPull);
    let ch2_pin = PwmPin::new(pa7, embassy_stm32::gpio::OutputType::PushPull);
    let ch3_pin = PwmPin::new(pb0, embassy_stm32::gpio::OutputType::PushPull);

    let pwm = SimplePwm::new(
        tim3,
        Some(ch1_pin),
        Some(ch2_pin),
        Some(ch3_pin),
        None,
        Hertz(1_000),
        Default::default(),
    );

    info!("RGB LED PWM configured on TIM3 (PA6, PA7, PB0)");

    pwm
}

/// Configure the push button on PB4, wired to VCC with a pull-down
fn setup_button(p: &mut Peripherals) -> ExtiInput<'static> {
    let pb4 = unsafe { p.PB4.clone_unchecked() };
    let exti4 = unsafe { p.EXTI4.clone_unchecked() };

    let button = ExtiInput::new(pb4, exti4, Pull::Down);
    info!("Push button configured on PB4");

    button
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("=== Toggle Pulse Example ===");
    info!("Starting initialization...");

    let config = configure_clock();
    let mut p = embassy_stm32::init(config);
    info!("Clock configured - system running at 48 MHz");

    let button = setup_button(&mut p);
    let pwm = setup_pwm_tim3(&mut p);

    info!("All hardware initialized successfully");

    spawner.spawn(button_task(button)).unwrap();
    spawner.spawn(pulse_task(pwm)).unwrap();

    info!("=== System Ready ===");
    info!("Press the button to pulse the LED green for 3 seconds");
    info!("Pressing again while it pulses restarts the 3 seconds");

    pending::<()>().await;
}
