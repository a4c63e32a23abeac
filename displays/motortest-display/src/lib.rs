//! Display side of the motor tester
//!
//! This crate provides:
//! - `DisplayBackend` trait for character-addressed displays
//! - `TextScreen`, a fixed grid that lays out the core's draw requests
//! - `Panel`, which binds a `TextScreen` to a backend and implements
//!   the core's `RenderSink`
//! - `Sh1106`, the 128x64 I2C OLED fitted to the tester
//!
//! # Layout
//!
//! ```text
//! row 0     header (inverted)
//! rows 1-6  body: list, prompt and status lines, top to bottom
//! row 7     footer hint
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod panel;
pub mod screen;
pub mod sh1106;

pub use backend::{DisplayBackend, DisplayError};
pub use panel::Panel;
pub use screen::{TextScreen, SCREEN_COLS, SCREEN_ROWS};
pub use sh1106::Sh1106;
