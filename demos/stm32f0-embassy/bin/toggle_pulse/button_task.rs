use defmt::info;
use embassy_stm32::exti::ExtiInput;
use toggle_pulse::{Edge, RisingEdgeDetector, TimeDuration, TimeSource};

use crate::types::{DEBOUNCE_MS, EmbassyDuration, EmbassyInstant, EmbassyTimeSource, PRESS_SIGNAL};

#[embassy_executor::task]
pub async fn button_task(mut button: ExtiInput<'static>) {
    info!("Button task started");

    let time_source = EmbassyTimeSource::new();
    let mut detector =
        RisingEdgeDetector::<EmbassyInstant>::with_debounce(EmbassyDuration::from_millis(DEBOUNCE_MS));

    loop {
        // Button pulls the line high while held
        button.wait_for_rising_edge().await;
        if let Some(press) = detector.on_edge(Edge::Rising, time_source.now()) {
            PRESS_SIGNAL.signal(press);
            info!("Button press signaled");
        }

        button.wait_for_falling_edge().await;
        detector.on_edge(Edge::Falling, time_source.now());
    }
}
