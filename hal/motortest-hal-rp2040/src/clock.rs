//! PIO square wave for the motor CLOCK line
//!
//! One state machine runs a two-instruction loop that toggles the pin,
//! each half padded with a 31-cycle delay, so one output period is 64 PIO
//! cycles. The frequency is set purely through the clock divider:
//!
//! ```text
//! f_out = SYS_CLK / (divider * 64)
//! ```
//!
//! With a 16.8 divider at 125 MHz this spans about 30 Hz to well past the
//! tester's 200 kHz ceiling. Requests below [`MIN_CLOCK_HZ`] stop the
//! output and report 0 Hz.
//!
//! A retune stops the state machine, loads the new divider, restarts the
//! divider phase and re-enables it. The line may hold its level for one
//! partial period at the switch-over.

use embassy_rp::gpio::Level;
use embassy_rp::pio::{Common, Config, Direction as PioDirection, Instance, Pin, PioPin, StateMachine};
use embassy_rp::Peri;
use fixed::types::U24F8;
use motortest_hal::ClockOutput;

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// PIO cycles per output period
pub const CYCLES_PER_PERIOD: u32 = 64;

/// Highest frequency handed to the motor driver
pub const MAX_CLOCK_HZ: u32 = 200_000;

/// Lowest frequency the divider can reach
pub const MIN_CLOCK_HZ: u32 = 30;

/// Divider for `freq_hz` as (integer, 1/256 fraction)
///
/// Clamped to the valid 1.0 ..= 65535.996 range.
pub fn calc_clock_divider(freq_hz: u32) -> (u16, u8) {
    if freq_hz == 0 {
        return (0xFFFF, 0xFF);
    }

    // divider * 256 = SYS_CLK * 256 / (freq * 64)
    let divider_x256 = (SYS_CLK_HZ as u64 * 256) / (freq_hz as u64 * CYCLES_PER_PERIOD as u64);

    if divider_x256 >= 0x1_0000 * 256 {
        return (0xFFFF, 0xFF);
    }
    if divider_x256 < 256 {
        return (1, 0);
    }

    ((divider_x256 >> 8) as u16, (divider_x256 & 0xFF) as u8)
}

/// Frequency actually produced by a divider
pub fn divider_frequency(divider: (u16, u8)) -> u32 {
    let divider_x256 = ((divider.0 as u64) << 8) | divider.1 as u64;
    if divider_x256 == 0 {
        return 0;
    }
    ((SYS_CLK_HZ as u64 * 256) / (divider_x256 * CYCLES_PER_PERIOD as u64)) as u32
}

/// Divider and resulting frequency for a request, `None` when the
/// output should be off
pub fn plan_frequency(hz: u32) -> Option<((u16, u8), u32)> {
    if hz < MIN_CLOCK_HZ {
        return None;
    }
    let divider = calc_clock_divider(hz.min(MAX_CLOCK_HZ));
    Some((divider, divider_frequency(divider)))
}

/// Square wave generator on one PIO state machine
pub struct PioClock<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
    pin: Pin<'d, PIO>,
    frequency_hz: u32,
    running: bool,
}

impl<'d, PIO: Instance, const SM: usize> PioClock<'d, PIO, SM> {
    /// Load the program and claim `pin`; the line starts parked low
    pub fn new<P: PioPin>(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        pin: Peri<'d, P>,
    ) -> Self {
        let prg = pio::pio_asm!(
            ".wrap_target",
            "set pins, 1 [31]",
            "set pins, 0 [31]",
            ".wrap"
        );
        let installed = common.load_program(&prg.program);
        let pin = common.make_pio_pin(pin);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[]);
        cfg.set_set_pins(&[&pin]);
        cfg.clock_divider = U24F8::from_bits(0xFFFF_FF00);

        sm.set_config(&cfg);
        sm.set_pin_dirs(PioDirection::Out, &[&pin]);
        sm.set_pins(Level::Low, &[&pin]);

        Self {
            sm,
            pin,
            frequency_hz: 0,
            running: false,
        }
    }
}

impl<'d, PIO: Instance, const SM: usize> ClockOutput for PioClock<'d, PIO, SM> {
    fn set_frequency(&mut self, hz: u32) {
        let Some((divider, produced)) = plan_frequency(hz) else {
            self.disable();
            return;
        };

        if self.running {
            self.sm.set_enable(false);
        }
        let bits = ((divider.0 as u32) << 8) | divider.1 as u32;
        self.sm.set_clock_divider(U24F8::from_bits(bits));
        self.sm.clkdiv_restart();
        self.sm.set_enable(true);
        self.running = true;
        self.frequency_hz = produced;
    }

    fn disable(&mut self) {
        self.sm.set_enable(false);
        self.sm.set_pins(Level::Low, &[&self.pin]);
        self.running = false;
        self.frequency_hz = 0;
    }

    fn frequency(&self) -> u32 {
        self.frequency_hz
    }

    fn max_frequency(&self) -> u32 {
        MAX_CLOCK_HZ
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_divider() {
        // 125 MHz / (1000 * 64) = 1953.125
        assert_eq!(calc_clock_divider(1000), (1953, 32));
        // 125 MHz / (100_000 * 64) = 19.53125
        assert_eq!(calc_clock_divider(100_000), (19, 136));
    }

    #[test]
    fn test_divider_limits() {
        assert_eq!(calc_clock_divider(0), (0xFFFF, 0xFF));
        // below the ~30 Hz floor
        assert_eq!(calc_clock_divider(10), (0xFFFF, 0xFF));
        // above what a divider of 1 can produce
        assert_eq!(calc_clock_divider(5_000_000), (1, 0));
    }

    #[test]
    fn test_below_floor_turns_output_off() {
        assert_eq!(plan_frequency(0), None);
        assert_eq!(plan_frequency(15), None);
        assert_eq!(plan_frequency(MIN_CLOCK_HZ - 1), None);

        let (divider, produced) = plan_frequency(MIN_CLOCK_HZ).unwrap();
        assert!(divider.0 < 0xFFFF);
        assert_eq!(produced, MIN_CLOCK_HZ);
    }

    #[test]
    fn test_plan_caps_at_max() {
        let (_, produced) = plan_frequency(5_000_000).unwrap();
        assert_eq!(produced, divider_frequency(calc_clock_divider(MAX_CLOCK_HZ)));
    }

    #[test]
    fn test_produced_frequency_close_to_request() {
        for hz in [250u32, 1000, 3000, 12_345, 60_000, MAX_CLOCK_HZ] {
            let produced = divider_frequency(calc_clock_divider(hz));
            let error = produced.abs_diff(hz);
            assert!(error * 1000 <= hz, "{} Hz -> {} Hz", hz, produced);
        }
    }
}
