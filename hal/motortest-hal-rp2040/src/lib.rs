//! RP2040-specific HAL for the motor tester
//!
//! Implements the shared `motortest-hal` traits on RP2040 peripherals:
//!
//! - PIO-based square wave for the motor CLOCK line
//! - Wear-levelled key-value store in the top of flash, backing the
//!   core's `KeyValueStore`

#![no_std]

#[cfg(feature = "defmt")]
macro_rules! warn {
    ($($arg:tt)*) => { defmt::warn!($($arg)*) };
}

#[cfg(not(feature = "defmt"))]
macro_rules! warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

pub mod clock;
pub mod flash;

pub use clock::PioClock;
pub use flash::FlashKvStore;
pub use motortest_hal::{ClockOutput, FlashError, RecordKey};
