//! Motor Tester Hardware Abstraction Layer
//!
//! Chip-agnostic traits implemented by chip-specific HALs. The motor
//! tester core and drivers only ever see these traits, so the same
//! control loop runs on any board that provides them.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  motortest-firmware / motortest-drivers │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  motortest-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ motortest-hal-    │
//!           │      rp2040       │
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`clock::ClockOutput`] - Variable-frequency square wave for the motor clock line
//! - [`flash::RecordKey`] - Compact key for wear-levelled flash records
//! - [`flash::value`] - Byte encodings for stored values

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod flash;

pub use clock::ClockOutput;
pub use flash::{FlashError, RecordKey};
