//! Tachometer edge counter

use defmt::*;
use embassy_rp::gpio::Input;
use motortest_core::motor::PulseCounter;

/// Count every rising edge on the FG line
#[embassy_executor::task]
pub async fn tach_task(mut fg: Input<'static>, pulses: &'static PulseCounter) {
    info!("Tachometer task started");

    loop {
        fg.wait_for_rising_edge().await;
        pulses.record();
    }
}
