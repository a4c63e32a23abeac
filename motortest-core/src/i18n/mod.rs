//! Localized UI text
//!
//! Every label the navigator draws is named by a [`TextKey`]. A
//! [`Localizer`] maps keys to text for a [`Language`]; [`BuiltinText`]
//! carries the English and Spanish tables compiled into the firmware.

mod en;
mod es;

/// UI language, persisted as its code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Language {
    English = 0,
    Spanish = 1,
}

impl Language {
    /// Languages in the order they are offered
    pub const ALL: [Language; 2] = [Language::English, Language::Spanish];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Position in [`Language::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Every piece of UI text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextKey {
    // Home
    HomeTitle,
    IntroBanner,
    Running,
    Stopped,
    Rpm,
    Speed,
    Dir,
    Cw,
    Ccw,
    Brake,
    Enable,
    Ld,
    Alarm,
    Ok,
    On,
    Off,
    FooterHome,
    FooterHomeSelect,

    // Main menu
    MenuTitle,
    MenuStart,
    MenuStop,
    MenuSetCcw,
    MenuSetCw,
    MenuBrakeOn,
    MenuBrakeOff,
    MenuEnableOn,
    MenuEnableOff,
    MenuAutoTest,
    MenuSelectMotor,
    MenuAddMotor,
    MenuDeleteActive,
    MenuSettings,
    MenuAbout,
    MenuBack,
    FooterMenu,
    FooterMenuSelect,

    // Add-motor wizard
    WizardName,
    WizardHasBrake,
    WizardHasFg,
    WizardHasLd,
    WizardLdLevel,
    WizardHasStop,
    WizardStopLevel,
    WizardHasEnable,
    WizardEnableLevel,
    WizardPpr,
    WizardMaxClock,
    WizardSave,
    Yes,
    No,
    Low,
    High,
    HintYesNo,
    HintChoice,
    HintNumber,
    HintText,
    HintYesNoSelect,
    HintChoiceSelect,
    HintNumberSelect,
    HintTextSelect,

    // Settings
    SettingsTitle,
    SettingsLanguage,
    LanguageEnglish,
    LanguageSpanish,
    SettingsTelemetry,
    TelemetryOn,
    TelemetryOff,

    // About
    AboutTitle,
    AboutAuthor,
    AboutVersion,

    // Diagnostics
    DiagTitle,
    DiagHint,
    DiagHintSelect,

    // AutoTest
    AutoTestTitle,
    AutoTestCycle,
    PhaseForward,
    PhaseShortPause,
    PhaseReverse,
    PhaseLongPause,
    AutoTestHint,
    AutoTestHintSelect,
}

/// Lookup of UI text by key
pub trait Localizer {
    fn text(&self, language: Language, key: TextKey) -> &'static str;
}

/// English and Spanish tables built into the firmware
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinText;

impl Localizer for BuiltinText {
    fn text(&self, language: Language, key: TextKey) -> &'static str {
        match language {
            Language::English => en::text(key),
            Language::Spanish => es::text(key),
        }
    }
}
