//! Per-tick application controller
//!
//! Owns every piece of core state and runs one cooperative control loop
//! iteration per [`Controller::tick`]:
//!
//! 1. Sample buttons
//! 2. Sample the tachometer (once per RPM window)
//! 3. Let the navigator consume input and drive the motor
//! 4. Snapshot motor status for rendering and telemetry
//!
//! The board crate calls `tick` from its loop and `render` whenever the
//! report asks for a redraw.

use crate::config::DeviceConfig;
use crate::i18n::Localizer;
use crate::input::{InputBank, InputTiming};
use crate::motor::{MotorRuntime, MotorStatus, PulseCounter, SystemSettings};
use crate::profile::ProfileStore;
use crate::traits::{Button, KeyValueStore, MotorPort, RawButtons, RenderSink};
use crate::ui::{Navigator, RenderView, Screen, UiContext};

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// The display is stale
    pub redraw: bool,
    /// Status snapshot, present once per RPM window while telemetry is on
    pub telemetry: Option<MotorStatus>,
}

/// Core state bound to a motor port and a key-value store
pub struct Controller<'a, P, S> {
    input: InputBank,
    motor: MotorRuntime<'a, P>,
    profiles: ProfileStore<S>,
    settings: SystemSettings,
    nav: Navigator,
    status: MotorStatus,
}

impl<'a, P: MotorPort, S: KeyValueStore> Controller<'a, P, S> {
    /// Boot: open the stores, apply the active profile, pick the first screen
    pub fn new(
        config: &DeviceConfig,
        port: P,
        pulses: &'a PulseCounter,
        kv: S,
        raw: &mut impl RawButtons,
        now_ms: u32,
    ) -> Self {
        let timing = InputTiming {
            debounce_ms: config.timing.debounce_ms,
            long_press_ms: config.timing.long_press_ms,
        };
        let input = InputBank::new(raw, timing, config.layout.confirm_button());
        let boot_chord = input.is_low(Button::Up) && input.is_low(Button::Down);

        let mut profiles = ProfileStore::open(kv);
        let settings = SystemSettings::load(profiles.kv_mut());

        let mut motor = MotorRuntime::new(
            port,
            pulses,
            config.enable_policy,
            config.timing.rpm_window_ms,
        );
        let profile = match profiles.load_active() {
            Ok(profile) => profile,
            Err(e) => {
                info!("No active profile ({:?}), using defaults", e);
                Default::default()
            }
        };
        motor.apply_profile(profile);
        let status = motor.status();

        info!(
            "Controller ready: {:?} layout, {:?} enable, telemetry {}",
            config.layout,
            config.enable_policy,
            settings.telemetry
        );

        Self {
            input,
            motor,
            profiles,
            settings,
            nav: Navigator::new(config, boot_chord, now_ms),
            status,
        }
    }

    /// Run one control loop iteration
    pub fn tick(&mut self, now_ms: u32, raw: &mut impl RawButtons) -> TickReport {
        self.input.poll(raw, now_ms);
        let sample = self.motor.sample_rpm(now_ms);

        let mut ctx = UiContext {
            input: &mut self.input,
            motor: &mut self.motor,
            profiles: &mut self.profiles,
            settings: &mut self.settings,
        };
        self.nav.update(now_ms, &mut ctx);

        self.status = self.motor.status();

        let telemetry = match sample {
            Some(sample) => {
                self.nav.invalidate();
                if self.settings.telemetry {
                    let s = &self.status;
                    info!(
                        "tele rpm={} pulses={} target={} current={} cw={} brake={} run={} fault={}",
                        s.rpm,
                        sample.pulses,
                        s.target_hz,
                        s.current_hz,
                        s.clockwise,
                        s.brake_engaged,
                        s.running,
                        s.faulted
                    );
                    Some(self.status)
                } else {
                    None
                }
            }
            None => None,
        };

        TickReport {
            redraw: self.nav.needs_redraw(),
            telemetry,
        }
    }

    /// Draw the current screen and clear the dirty flag
    pub fn render(&mut self, text: &impl Localizer, sink: &mut impl RenderSink) {
        let view = RenderView {
            status: &self.status,
            profile: self.motor.profile(),
            settings: &self.settings,
            levels: self.input.levels(),
        };
        self.nav.render(sink, text, &view);
        self.nav.mark_drawn();
    }

    pub fn screen(&self) -> Screen {
        self.nav.screen()
    }

    /// Status as of the last tick
    pub fn status(&self) -> &MotorStatus {
        &self.status
    }

    pub fn motor(&self) -> &MotorRuntime<'a, P> {
        &self.motor
    }

    pub fn settings(&self) -> &SystemSettings {
        &self.settings
    }

    pub fn profiles(&self) -> &ProfileStore<S> {
        &self.profiles
    }
}
