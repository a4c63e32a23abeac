//! Spanish UI text (ASCII only, the display font has no accents)

use super::TextKey;

pub(super) fn text(key: TextKey) -> &'static str {
    use TextKey::*;

    match key {
        HomeTitle => "Tester de Motor",
        IntroBanner => "Motor Tester v2",
        Running => "EN MARCHA",
        Stopped => "PARADO",
        Rpm => "RPM:",
        Speed => "Velocidad:",
        Dir => "DIR:",
        Cw => "CW",
        Ccw => "CCW",
        Brake => "FRENO:",
        Enable => "ENABLE:",
        Ld => "LD:",
        Alarm => "ALARM",
        Ok => "OK",
        On => "ON",
        Off => "OFF",
        FooterHome => "UP/DN:Vel L:Diag R:Menu",
        FooterHomeSelect => "UD:Vel SEL:Menu MANT:Run",

        MenuTitle => "MENU",
        MenuStart => "Arrancar Motor",
        MenuStop => "Parar Motor",
        MenuSetCcw => "DIR = CCW",
        MenuSetCw => "DIR = CW",
        MenuBrakeOn => "Freno ON",
        MenuBrakeOff => "Freno OFF",
        MenuEnableOn => "Enable ON",
        MenuEnableOff => "Enable OFF",
        MenuAutoTest => "Auto Test",
        MenuSelectMotor => "Seleccionar Motor",
        MenuAddMotor => "Anadir Motor",
        MenuDeleteActive => "Borrar Activo",
        MenuSettings => "Lenguaje/Telemetria",
        MenuAbout => "Acerca de",
        MenuBack => "Atras",
        FooterMenu => "UP/DN=Mover L=Atras R=Sel",
        FooterMenuSelect => "UP/DN=Mover SEL=Elegir",

        WizardName => "Nombre:",
        WizardHasBrake => "Tiene FRENO?",
        WizardHasFg => "Tiene FG?",
        WizardHasLd => "Tiene LD?",
        WizardLdLevel => "LD activo cuando:",
        WizardHasStop => "Tiene STOP?",
        WizardStopLevel => "STOP activo cuando:",
        WizardHasEnable => "Tiene ENABLE?",
        WizardEnableLevel => "ENABLE activo:",
        WizardPpr => "PPR (pulsos/vuelta)",
        WizardMaxClock => "CLOCK max (Hz)",
        WizardSave => "Guardar perfil?",
        Yes => "SI",
        No => "NO",
        Low => "LOW",
        High => "HIGH",
        HintYesNo => "UP/DN=Cambiar L=Atras R=Sig",
        HintChoice => "UP/DN=Mover L=Atras R=OK",
        HintNumber => "UP/DN=Cambiar L=Atras R=OK",
        HintText => "UP/DN=Car L=Atras R=Sig/END",
        HintYesNoSelect => "UP/DN=Cambiar SEL=Sig",
        HintChoiceSelect => "UP/DN=Mover SEL=OK",
        HintNumberSelect => "UP/DN=Cambiar SEL=OK",
        HintTextSelect => "UP/DN=Car SEL=Sig/END",

        SettingsTitle => "CONFIGURACION",
        SettingsLanguage => "Idioma",
        LanguageEnglish => "English",
        LanguageSpanish => "Espanol",
        SettingsTelemetry => "Telemetria",
        TelemetryOn => "Telemetria: ON",
        TelemetryOff => "Telemetria: OFF",

        AboutTitle => "ACERCA DE",
        AboutAuthor => "Autor: Fran-Byte",
        AboutVersion => "Version: v2.0",

        DiagTitle => "DIAGNOSTICO",
        DiagHint => "LEFT para salir",
        DiagHintSelect => "MANTENER SEL para salir",

        AutoTestTitle => "AUTO TEST",
        AutoTestCycle => "Ciclo:",
        PhaseForward => "Fase: Prueba CW",
        PhaseShortPause => "Fase: Pausa 1s",
        PhaseReverse => "Fase: Prueba CCW",
        PhaseLongPause => "Fase: Pausa 2s",
        AutoTestHint => "LEFT para cancelar",
        AutoTestHintSelect => "SEL para cancelar",
    }
}
