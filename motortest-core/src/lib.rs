//! Board-agnostic core logic for the motor tester firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware seams (motor I/O port, key-value store, raw buttons, render sink)
//! - Debounced button input with long-press detection
//! - Persisted motor profile store
//! - Motor runtime (clock, direction/brake/stop/enable lines, RPM sampling)
//! - UI navigator state machine, add-motor wizard and AutoTest sequence
//! - Localized UI text tables
//! - Device configuration types and parser
//! - Controller tying everything together once per tick

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Logging shims: forward to defmt when enabled, otherwise only borrow the arguments
#[cfg(feature = "defmt")]
macro_rules! info {
    ($($arg:tt)*) => { defmt::info!($($arg)*) };
}

#[cfg(not(feature = "defmt"))]
macro_rules! info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

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

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($arg:tt)*) => { defmt::debug!($($arg)*) };
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        $( let _ = &$arg; )*
    }};
}

pub mod config;
pub mod controller;
pub mod i18n;
pub mod input;
pub mod motor;
pub mod profile;
pub mod traits;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{Controller, TickReport};
