//! Button bank on GPIO inputs
//!
//! Buttons pull their pin to ground when closed; the pins are expected to
//! be configured with pull-ups. Slots without a pin read as released.

use embedded_hal::digital::InputPin;
use motortest_core::traits::{Button, RawButtons};

/// Raw button pins in [`Button::ALL`] order
pub struct ButtonPins<I> {
    pins: [Option<I>; 4],
}

impl<I: InputPin> ButtonPins<I> {
    /// Four-button board: Up, Down, Left, Right
    pub fn four(up: I, down: I, left: I, right: I) -> Self {
        Self {
            pins: [Some(up), Some(down), Some(left), Some(right)],
        }
    }

    /// Three-button board: Select is reported as [`Button::Left`]
    pub fn three(up: I, down: I, select: I) -> Self {
        Self {
            pins: [Some(up), Some(down), Some(select), None],
        }
    }
}

impl<I: InputPin> RawButtons for ButtonPins<I> {
    fn is_low(&mut self, button: Button) -> bool {
        match &mut self.pins[button.index()] {
            Some(pin) => pin.is_low().unwrap_or(false),
            None => false,
        }
    }
}
