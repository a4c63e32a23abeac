//! Debounced button input
//!
//! [`InputBank`] samples every logical button once per tick and turns
//! noisy raw levels into stable levels, one-shot press edges and a
//! long-press event on the designated confirm button.
//!
//! Press edges produced by a poll are only valid until the next poll.
//! Each edge is observed by exactly one `consume_*` call.

pub mod debounce;

pub use debounce::ButtonState;

use crate::traits::{Button, RawButtons};

/// Debounce/long-press timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputTiming {
    pub debounce_ms: u32,
    pub long_press_ms: u32,
}

/// All logical buttons of the device
pub struct InputBank {
    buttons: [ButtonState; 4],
    timing: InputTiming,
    /// Button carrying long-press detection
    long_press_button: Button,
}

impl InputBank {
    /// Create a bank, seeding stable levels from the current raw readings
    pub fn new(raw: &mut impl RawButtons, timing: InputTiming, long_press_button: Button) -> Self {
        let buttons = Button::ALL.map(|b| ButtonState::new(raw.is_low(b)));
        Self {
            buttons,
            timing,
            long_press_button,
        }
    }

    /// Sample every button once
    pub fn poll(&mut self, raw: &mut impl RawButtons, now_ms: u32) {
        for button in Button::ALL {
            let level = raw.is_low(button);
            let state = &mut self.buttons[button.index()];
            state.clear_edge();
            state.update(level, now_ms, self.timing.debounce_ms);
        }

        self.buttons[self.long_press_button.index()]
            .update_long_press(now_ms, self.timing.long_press_ms);
    }

    /// One-shot press edge
    pub fn consume_press(&mut self, button: Button) -> bool {
        self.buttons[button.index()].consume_press()
    }

    /// One-shot long press (only ever set on the long-press button)
    pub fn consume_long_press(&mut self, button: Button) -> bool {
        self.buttons[button.index()].consume_long_press()
    }

    /// Debounced level, without consuming anything
    pub fn is_low(&self, button: Button) -> bool {
        self.buttons[button.index()].is_low()
    }

    /// Discard every pending press edge and long press
    pub fn drain(&mut self) {
        for state in self.buttons.iter_mut() {
            state.consume_press();
            state.consume_long_press();
        }
    }

    /// Debounced levels of all buttons, in [`Button::ALL`] order
    pub fn levels(&self) -> [bool; 4] {
        Button::ALL.map(|b| self.is_low(b))
    }
}
