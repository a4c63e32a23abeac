//! Screens and wizard steps

use crate::profile::MotorProfile;

/// Every state of the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Boot splash, shown once
    Intro,
    Home,
    Menu,
    SelectMotor,
    Wizard(WizardStep),
    Settings,
    SettingsLanguage,
    SettingsTelemetry,
    About,
    Diagnostics,
    AutoTest,
}

impl Screen {
    /// Screens whose content changes without input
    pub fn is_live(self, motor_running: bool) -> bool {
        match self {
            Screen::Wizard(WizardStep::Name) | Screen::Diagnostics | Screen::AutoTest => true,
            Screen::Home => motor_running,
            _ => false,
        }
    }
}

/// Add-motor wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WizardStep {
    Name,
    HasBrake,
    HasFg,
    HasLd,
    LdLevel,
    HasStop,
    StopLevel,
    HasEnable,
    EnableLevel,
    Ppr,
    MaxClock,
    Save,
}

impl WizardStep {
    /// Step after this one; polarity steps are skipped when the line is absent
    ///
    /// `Save` is the last step and returns `None`.
    pub fn next(self, draft: &MotorProfile) -> Option<WizardStep> {
        use WizardStep::*;

        let next = match self {
            Name => HasBrake,
            HasBrake => HasFg,
            HasFg => HasLd,
            HasLd if draft.has_ld => LdLevel,
            HasLd | LdLevel => HasStop,
            HasStop if draft.has_stop => StopLevel,
            HasStop | StopLevel => HasEnable,
            HasEnable if draft.has_enable => EnableLevel,
            HasEnable | EnableLevel => Ppr,
            Ppr => MaxClock,
            MaxClock => Save,
            Save => return None,
        };
        Some(next)
    }
}
