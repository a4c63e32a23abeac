//! Configuration type definitions

use crate::traits::Button;

/// Maximum stored motor profiles
pub const MAX_PROFILES: usize = 8;

/// Maximum profile name length (characters)
pub const MAX_NAME_LEN: usize = 19;

/// Default debounce window
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Default long-press threshold on the confirm button
pub const DEFAULT_LONG_PRESS_MS: u32 = 600;

/// Default RPM sampling window
pub const DEFAULT_RPM_WINDOW_MS: u32 = 1000;

/// Default minimum spacing between manual speed steps on Home
pub const DEFAULT_SPEED_REPEAT_MS: u32 = 150;

/// Default control loop period
pub const DEFAULT_LOOP_MS: u32 = 5;

/// Physical button arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonLayout {
    /// Up/Down/Left/Right. Right confirms (and long-presses), Left goes back.
    #[default]
    FourButton,
    /// Up/Down/Select. Select confirms and long-presses; lists carry a Back item.
    ThreeButton,
}

impl ButtonLayout {
    /// Whether lists end with an explicit "Back" entry
    pub fn has_back_items(self) -> bool {
        matches!(self, ButtonLayout::ThreeButton)
    }

    /// Button that confirms and carries long-press detection
    pub fn confirm_button(self) -> Button {
        match self {
            ButtonLayout::FourButton => Button::Right,
            ButtonLayout::ThreeButton => Button::Left,
        }
    }

    /// Dedicated back button, if the layout has one
    pub fn back_button(self) -> Option<Button> {
        match self {
            ButtonLayout::FourButton => Some(Button::Left),
            ButtonLayout::ThreeButton => None,
        }
    }
}

/// How the driver's ENABLE line is wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnablePolicy {
    /// Output driven by the tester (operator can toggle it)
    Commanded,
    /// Input read back from the driver
    #[default]
    Observed,
}

/// Timing constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Raw level must hold longer than this to be accepted
    pub debounce_ms: u32,
    /// Confirm button hold time for a long press
    pub long_press_ms: u32,
    /// Tachometer sampling window
    pub rpm_window_ms: u32,
    /// Rate limit for Up/Down speed steps on Home
    pub speed_repeat_ms: u32,
    /// Control loop tick period
    pub loop_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            rpm_window_ms: DEFAULT_RPM_WINDOW_MS,
            speed_repeat_ms: DEFAULT_SPEED_REPEAT_MS,
            loop_ms: DEFAULT_LOOP_MS,
        }
    }
}

/// Per-deployment device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub layout: ButtonLayout,
    pub enable_policy: EnablePolicy,
    pub timing: TimingConfig,
    /// Offer "Auto Test" in the main menu
    pub autotest: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            layout: ButtonLayout::default(),
            enable_policy: EnablePolicy::default(),
            timing: TimingConfig::default(),
            autotest: true,
        }
    }
}
