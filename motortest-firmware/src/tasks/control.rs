//! Cooperative control loop
//!
//! Runs one `Controller::tick` per `loop_ms` and pushes a frame to the
//! OLED when the navigator reports the display stale.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};
use motortest_core::i18n::BuiltinText;

use crate::board::{Buttons, Display, Tester};

/// A full SH1106 frame takes ~25 ms on a 400 kHz bus; live screens are
/// redrawn at most this often
const MIN_FRAME_INTERVAL_MS: u32 = 40;

/// Milliseconds since boot, wrapping
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

#[embassy_executor::task]
pub async fn control_task(
    mut tester: Tester,
    mut buttons: Buttons,
    mut display: Display,
    loop_ms: u32,
) {
    info!("Control task started, {} ms tick", loop_ms);

    let mut ticker = Ticker::every(Duration::from_millis(loop_ms as u64));
    let mut last_frame_ms = now_ms().wrapping_sub(MIN_FRAME_INTERVAL_MS);

    loop {
        ticker.next().await;
        let now = now_ms();

        let report = tester.tick(now, &mut buttons);

        if report.redraw && now.wrapping_sub(last_frame_ms) >= MIN_FRAME_INTERVAL_MS {
            tester.render(&BuiltinText, &mut display);
            last_frame_ms = now;
            if let Some(e) = display.last_error() {
                debug!("Frame dropped: {:?}", e);
            }
        }
    }
}
