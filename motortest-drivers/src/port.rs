//! Motor I/O port on GPIO pins
//!
//! Wires a [`ClockOutput`] and plain digital pins to the core's
//! [`MotorPort`]. Lines the board does not wire are `None`; writes to them
//! are dropped and reads return low.
//!
//! The ENABLE line is either driven or read back depending on how the
//! board is wired, see [`EnableLine`].

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use motortest_core::traits::{InputLine, MotorPort, OutputLine};
use motortest_hal::ClockOutput;

/// How the driver's ENABLE pin is connected
pub enum EnableLine<O, I> {
    /// Tester drives ENABLE
    Output(O),
    /// Tester only observes ENABLE
    Input(I),
    /// Not connected
    Absent,
}

/// Motor port over a clock generator and GPIO pins
pub struct PinPort<C, O, I> {
    clock: C,
    direction: O,
    brake: Option<O>,
    stop: Option<O>,
    enable: EnableLine<O, I>,
    fault: Option<I>,
}

impl<C, O, I> PinPort<C, O, I>
where
    C: ClockOutput,
    O: OutputPin,
    I: InputPin,
{
    /// Create a port with only CLOCK and DIR wired
    pub fn new(clock: C, direction: O) -> Self {
        Self {
            clock,
            direction,
            brake: None,
            stop: None,
            enable: EnableLine::Absent,
            fault: None,
        }
    }

    pub fn with_brake(mut self, pin: O) -> Self {
        self.brake = Some(pin);
        self
    }

    pub fn with_stop(mut self, pin: O) -> Self {
        self.stop = Some(pin);
        self
    }

    pub fn with_enable(mut self, line: EnableLine<O, I>) -> Self {
        self.enable = line;
        self
    }

    /// LD fault/alarm input
    pub fn with_fault(mut self, pin: I) -> Self {
        self.fault = Some(pin);
        self
    }

    fn output_pin(&mut self, line: OutputLine) -> Option<&mut O> {
        match line {
            OutputLine::Direction => Some(&mut self.direction),
            OutputLine::Brake => self.brake.as_mut(),
            OutputLine::Stop => self.stop.as_mut(),
            OutputLine::Enable => match &mut self.enable {
                EnableLine::Output(pin) => Some(pin),
                _ => None,
            },
        }
    }

    fn input_pin(&mut self, line: InputLine) -> Option<&mut I> {
        match line {
            InputLine::Fault => self.fault.as_mut(),
            InputLine::Enable => match &mut self.enable {
                EnableLine::Input(pin) => Some(pin),
                _ => None,
            },
        }
    }
}

impl<C, O, I> MotorPort for PinPort<C, O, I>
where
    C: ClockOutput,
    O: OutputPin,
    I: InputPin,
{
    fn set_clock(&mut self, hz: u32) -> u32 {
        if hz == 0 {
            self.clock.disable();
        } else {
            self.clock.set_frequency(hz.min(self.clock.max_frequency()));
        }
        self.clock.frequency()
    }

    fn write_line(&mut self, line: OutputLine, high: bool) {
        if let Some(pin) = self.output_pin(line) {
            // GPIO writes on the supported chips cannot fail
            let _ = pin.set_state(PinState::from(high));
        }
    }

    fn read_line(&mut self, line: InputLine) -> bool {
        self.input_pin(line)
            .and_then(|pin| pin.is_high().ok())
            .unwrap_or(false)
    }
}
