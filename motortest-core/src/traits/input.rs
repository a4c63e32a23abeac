//! Raw button sampling

/// Logical buttons
///
/// Four-button boards wire Up/Down/Left/Right. Three-button boards wire
/// Up/Down and a single Select key, which is reported as [`Button::Left`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// All buttons, in sampling order
    pub const ALL: [Button; 4] = [Button::Up, Button::Down, Button::Left, Button::Right];

    /// Index into per-button arrays
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Source of raw, undebounced button samples
///
/// Buttons are active low (pull-ups); `is_low` returning `true` means the
/// contact is currently closed. Buttons a board does not wire must read
/// as released.
pub trait RawButtons {
    fn is_low(&mut self, button: Button) -> bool;
}
