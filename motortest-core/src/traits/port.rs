//! Motor driver I/O port
//!
//! The motor runtime never touches registers. It drives a clock line and
//! a handful of digital control lines, and reads back two digital inputs,
//! all through this trait. Line polarity is applied by the runtime; the
//! port only deals in raw electrical levels.

/// Digital control lines driven by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputLine {
    /// DIR: high = clockwise
    Direction,
    /// BRAKE: high = brake engaged
    Brake,
    /// STOP override, polarity per profile
    Stop,
    /// ENABLE when the board wires it as an output
    Enable,
}

/// Digital lines read back from the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputLine {
    /// LD fault/alarm line
    Fault,
    /// ENABLE when the board wires it as an input
    Enable,
}

/// Hardware I/O port consumed by the motor runtime
pub trait MotorPort {
    /// Run the clock output at `hz` (~50% duty). Zero stops the output.
    ///
    /// Returns the frequency actually generated: 0 when the output is
    /// stopped, including requests below what the hardware can produce.
    fn set_clock(&mut self, hz: u32) -> u32;

    /// Drive an output line to a raw level (`true` = high)
    fn write_line(&mut self, line: OutputLine, high: bool);

    /// Read the raw level of an input line (`true` = high)
    fn read_line(&mut self, line: InputLine) -> bool;
}
