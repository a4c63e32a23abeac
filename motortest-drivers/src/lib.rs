//! Hardware driver implementations
//!
//! Concrete implementations of the motortest-core seams on top of
//! `embedded-hal` 1.0 digital pins and a [`ClockOutput`]:
//!
//! - [`PinPort`]: the motor I/O port (clock, DIR, BRAKE, STOP, ENABLE, LD)
//! - [`ButtonPins`]: raw active-low button sampling
//!
//! [`ClockOutput`]: motortest_hal::ClockOutput

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod port;

pub use buttons::ButtonPins;
pub use port::{EnableLine, PinPort};
