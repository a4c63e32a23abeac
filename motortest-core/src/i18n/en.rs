//! English UI text

use super::TextKey;

pub(super) fn text(key: TextKey) -> &'static str {
    use TextKey::*;

    match key {
        HomeTitle => "Motor Tester",
        IntroBanner => "Motor Tester v2",
        Running => "RUNNING",
        Stopped => "STOPPED",
        Rpm => "RPM:",
        Speed => "Speed:",
        Dir => "DIR:",
        Cw => "CW",
        Ccw => "CCW",
        Brake => "BRAKE:",
        Enable => "ENABLE:",
        Ld => "LD:",
        Alarm => "ALARM",
        Ok => "OK",
        On => "ON",
        Off => "OFF",
        FooterHome => "UP/DN:Speed L:Diag R:Menu",
        FooterHomeSelect => "UD:Spd SEL:Menu HOLD:Run",

        MenuTitle => "MENU",
        MenuStart => "Start Motor",
        MenuStop => "Stop Motor",
        MenuSetCcw => "Set DIR = CCW",
        MenuSetCw => "Set DIR = CW",
        MenuBrakeOn => "Brake ON",
        MenuBrakeOff => "Brake OFF",
        MenuEnableOn => "Enable ON",
        MenuEnableOff => "Enable OFF",
        MenuAutoTest => "Auto Test",
        MenuSelectMotor => "Select Motor",
        MenuAddMotor => "Add Motor",
        MenuDeleteActive => "Delete Active",
        MenuSettings => "Language/Telemetry",
        MenuAbout => "About",
        MenuBack => "Back",
        FooterMenu => "UP/DN=Move L=Back R=Select",
        FooterMenuSelect => "UP/DN=Move SEL=Select",

        WizardName => "Name:",
        WizardHasBrake => "Has BRAKE?",
        WizardHasFg => "Has FG?",
        WizardHasLd => "Has LD?",
        WizardLdLevel => "LD active when:",
        WizardHasStop => "Has STOP?",
        WizardStopLevel => "STOP active when:",
        WizardHasEnable => "Has ENABLE?",
        WizardEnableLevel => "ENABLE active:",
        WizardPpr => "PPR (pulses/rev)",
        WizardMaxClock => "Max CLOCK (Hz)",
        WizardSave => "Save profile?",
        Yes => "YES",
        No => "NO",
        Low => "LOW",
        High => "HIGH",
        HintYesNo => "UP/DN=Change L=Back R=Next",
        HintChoice => "UP/DN=Move L=Back R=OK",
        HintNumber => "UP/DN=Change L=Back R=OK",
        HintText => "UP/DN=Char L=Back R=Next/END",
        HintYesNoSelect => "UP/DN=Change SEL=Next",
        HintChoiceSelect => "UP/DN=Move SEL=OK",
        HintNumberSelect => "UP/DN=Change SEL=OK",
        HintTextSelect => "UP/DN=Char SEL=Next/END",

        SettingsTitle => "SETTINGS",
        SettingsLanguage => "Language",
        LanguageEnglish => "English",
        LanguageSpanish => "Espanol",
        SettingsTelemetry => "Telemetry",
        TelemetryOn => "Telemetry: ON",
        TelemetryOff => "Telemetry: OFF",

        AboutTitle => "ABOUT",
        AboutAuthor => "Author: Fran-Byte",
        AboutVersion => "Version: v2.0",

        DiagTitle => "DIAGNOSTICS",
        DiagHint => "LEFT to exit",
        DiagHintSelect => "HOLD SEL to exit",

        AutoTestTitle => "AUTO TEST",
        AutoTestCycle => "Cycle:",
        PhaseForward => "Phase: CW Test",
        PhaseShortPause => "Phase: Pause 1s",
        PhaseReverse => "Phase: CCW Test",
        PhaseLongPause => "Phase: Pause 2s",
        AutoTestHint => "LEFT to cancel",
        AutoTestHintSelect => "SEL to cancel",
    }
}
