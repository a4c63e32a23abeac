//! Motor runtime
//!
//! This module owns the motor command state and everything that touches
//! the driver:
//!
//! - Clock frequency control with per-profile clamping
//! - Direction, brake, stop and enable line sequencing
//! - Tachometer pulse counting and RPM sampling
//! - Stall mitigation when feedback goes silent while running
//! - Persisted system settings (telemetry, language)

pub mod runtime;
pub mod settings;
pub mod speed;
pub mod tach;

pub use runtime::{MotorRuntime, MotorStatus, RpmSample, DEFAULT_TARGET_HZ};
pub use settings::SystemSettings;
pub use tach::PulseCounter;

/// Rotation direction as driven on the DIR line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn is_clockwise(self) -> bool {
        self == Direction::Clockwise
    }

    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}
