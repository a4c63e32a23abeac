//! Clock (pulse) output abstraction
//!
//! The motor driver's CLOCK input is fed a ~50% duty square wave whose
//! frequency sets the motor speed. Chip HALs implement this with whatever
//! peripheral suits them (PIO, LEDC, timer PWM).

/// Variable-frequency square wave output
pub trait ClockOutput {
    /// Start (or retune) the output at `hz` with ~50% duty.
    ///
    /// Implementations stop the generator, apply the new divider and
    /// restart it. A short glitch at the switch-over is acceptable.
    fn set_frequency(&mut self, hz: u32);

    /// Stop pulse generation and park the line low
    fn disable(&mut self);

    /// Frequency currently being generated (0 when disabled)
    fn frequency(&self) -> u32;

    /// Highest frequency the generator can produce
    fn max_frequency(&self) -> u32;
}
