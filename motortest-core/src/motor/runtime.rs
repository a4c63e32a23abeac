//! Motor command state and output sequencing
//!
//! [`MotorRuntime`] is the single source of truth for what the driver is
//! being told to do. State is kept as flags (`running`, direction, brake,
//! enable command) and every change is followed by a full push of the
//! control lines, so the hardware never lags the state.
//!
//! # Output policy
//!
//! - DIR is always driven (high = clockwise)
//! - BRAKE is driven only if the profile has one (high = engaged)
//! - STOP, if present, is asserted exactly while the motor is not running
//! - ENABLE is driven only under [`EnablePolicy::Commanded`]; under
//!   [`EnablePolicy::Observed`] it is read back instead
//!
//! # Stall mitigation
//!
//! With tachometer feedback present, a sampling window that sees no
//! pulses while the clock is running cuts the target to a quarter of the
//! applied frequency. This repeats every window while the condition
//! holds, decaying toward zero without ever latching a hard stop.

use crate::config::EnablePolicy;
use crate::profile::MotorProfile;
use crate::traits::{InputLine, MotorPort, OutputLine};

use super::speed;
use super::tach::PulseCounter;
use super::Direction;

/// Target frequency after a profile is applied
pub const DEFAULT_TARGET_HZ: u32 = 1000;

/// Result of one RPM sampling window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RpmSample {
    pub pulses: u32,
    pub rpm: u32,
    /// Stall mitigation cut the target this window
    pub stall_cut: bool,
}

/// Snapshot of runtime state for display and telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorStatus {
    pub running: bool,
    pub clockwise: bool,
    pub brake_engaged: bool,
    pub enabled: bool,
    pub faulted: bool,
    pub rpm: u32,
    pub target_hz: u32,
    pub current_hz: u32,
    pub max_clock_hz: u32,
}

/// Motor runtime bound to a hardware port
pub struct MotorRuntime<'a, P> {
    port: P,
    pulses: &'a PulseCounter,
    enable_policy: EnablePolicy,
    rpm_window_ms: u32,

    profile: MotorProfile,
    direction: Direction,
    brake_engaged: bool,
    /// Commanded enable state (only driven under `Commanded`)
    enable_command: bool,
    running: bool,
    target_hz: u32,
    current_hz: u32,
    rpm: u32,
    last_rpm_ms: u32,
}

impl<'a, P: MotorPort> MotorRuntime<'a, P> {
    /// Create a runtime with the default profile
    ///
    /// Nothing is written to the port until [`apply_profile`](Self::apply_profile).
    pub fn new(
        port: P,
        pulses: &'a PulseCounter,
        enable_policy: EnablePolicy,
        rpm_window_ms: u32,
    ) -> Self {
        Self {
            port,
            pulses,
            enable_policy,
            rpm_window_ms,
            profile: MotorProfile::default(),
            direction: Direction::Clockwise,
            brake_engaged: false,
            enable_command: true,
            running: false,
            target_hz: DEFAULT_TARGET_HZ,
            current_hz: 0,
            rpm: 0,
            last_rpm_ms: 0,
        }
    }

    /// Replace the profile and reset command state
    ///
    /// The motor is left stopped, clockwise, brake released, enabled, with
    /// the target at [`DEFAULT_TARGET_HZ`].
    pub fn apply_profile(&mut self, profile: MotorProfile) {
        info!(
            "Applying profile {}: max {} Hz, ppr {}",
            profile.name.as_str(),
            profile.max_clock_hz,
            profile.pulses_per_rev
        );

        self.profile = profile;
        self.direction = Direction::Clockwise;
        self.brake_engaged = false;
        self.enable_command = true;
        self.running = false;
        self.target_hz = DEFAULT_TARGET_HZ;
        self.rpm = 0;
        self.set_clock(0);
        self.apply_outputs();
    }

    pub fn start(&mut self) {
        self.running = true;
        self.set_clock(self.target_hz);
        self.apply_outputs();
        info!("Motor started at {} Hz", self.current_hz);
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.set_clock(0);
        self.apply_outputs();
        info!("Motor stopped");
    }

    pub fn toggle_running(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Drive the clock output
    ///
    /// Zero disables the output. Anything else is clamped to the
    /// profile's `max_clock_hz`. Does not touch `target_hz`.
    pub fn set_clock(&mut self, hz: u32) {
        let hz = hz.min(self.profile.max_clock_hz);
        self.current_hz = self.port.set_clock(hz);
    }

    /// Stage a new target; applied on the next `start()` or `set_clock()`
    pub fn set_target_hz(&mut self, hz: u32) {
        self.target_hz = hz.min(self.profile.max_clock_hz);
    }

    pub fn step_speed_up(&mut self) {
        self.target_hz = speed::step_up(self.target_hz, self.profile.max_clock_hz);
        self.reapply_target();
    }

    pub fn step_speed_down(&mut self) {
        self.target_hz = speed::step_down(self.target_hz, self.profile.max_clock_hz);
        self.reapply_target();
    }

    fn reapply_target(&mut self) {
        debug!("Target {} Hz", self.target_hz);
        if self.running {
            self.set_clock(self.target_hz);
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.apply_outputs();
    }

    pub fn toggle_direction(&mut self) {
        self.set_direction(self.direction.reversed());
        info!("Direction {:?}", self.direction);
    }

    /// Flip the brake; no-op unless the profile has one
    pub fn toggle_brake(&mut self) {
        if !self.profile.has_brake {
            return;
        }
        self.brake_engaged = !self.brake_engaged;
        self.apply_outputs();
        info!("Brake {}", if self.brake_engaged { "on" } else { "off" });
    }

    /// Flip the enable command; no-op unless the line is commanded
    pub fn toggle_enable(&mut self) {
        if !self.can_command_enable() {
            return;
        }
        self.enable_command = !self.enable_command;
        self.apply_outputs();
        info!("Enable {}", if self.enable_command { "on" } else { "off" });
    }

    /// Whether the operator can toggle ENABLE from the menu
    pub fn can_command_enable(&self) -> bool {
        self.profile.has_enable && self.enable_policy == EnablePolicy::Commanded
    }

    /// Whether the driver is enabled
    ///
    /// Without an ENABLE line the driver is assumed enabled.
    pub fn is_enabled(&mut self) -> bool {
        if !self.profile.has_enable {
            return true;
        }
        match self.enable_policy {
            EnablePolicy::Commanded => self.enable_command,
            EnablePolicy::Observed => {
                let high = self.port.read_line(InputLine::Enable);
                high == self.profile.enable_active_high
            }
        }
    }

    /// Whether the LD line reports a fault
    pub fn is_faulted(&mut self) -> bool {
        if !self.profile.has_ld {
            return false;
        }
        let high = self.port.read_line(InputLine::Fault);
        if self.profile.ld_active_low {
            !high
        } else {
            high
        }
    }

    /// Sample the tachometer once per window
    ///
    /// Returns `None` until the window has elapsed since the previous sample.
    pub fn sample_rpm(&mut self, now_ms: u32) -> Option<RpmSample> {
        if now_ms.wrapping_sub(self.last_rpm_ms) < self.rpm_window_ms {
            return None;
        }
        self.last_rpm_ms = now_ms;

        let pulses = self.pulses.take();
        let ppr = self.profile.pulses_per_rev as u32;
        self.rpm = if self.profile.has_fg && ppr > 0 {
            pulses.saturating_mul(60) / ppr
        } else {
            0
        };

        let stall_cut =
            self.profile.has_fg && self.running && self.rpm == 0 && self.current_hz > 0;
        if stall_cut {
            self.target_hz = self.current_hz / 4;
            warn!("No tach feedback, cutting clock to {} Hz", self.target_hz);
            self.set_clock(self.target_hz);
        }

        Some(RpmSample {
            pulses,
            rpm: self.rpm,
            stall_cut,
        })
    }

    /// Push every control line from current state
    fn apply_outputs(&mut self) {
        let p = &self.profile;

        self.port
            .write_line(OutputLine::Direction, self.direction.is_clockwise());

        if p.has_brake {
            self.port.write_line(OutputLine::Brake, self.brake_engaged);
        }

        if p.has_stop {
            let asserted = !self.running;
            let level = if p.stop_active_high { asserted } else { !asserted };
            self.port.write_line(OutputLine::Stop, level);
        }

        if p.has_enable && self.enable_policy == EnablePolicy::Commanded {
            let level = if p.enable_active_high {
                self.enable_command
            } else {
                !self.enable_command
            };
            self.port.write_line(OutputLine::Enable, level);
        }
    }

    /// Snapshot for rendering and telemetry
    pub fn status(&mut self) -> MotorStatus {
        MotorStatus {
            running: self.running,
            clockwise: self.direction.is_clockwise(),
            brake_engaged: self.brake_engaged,
            enabled: self.is_enabled(),
            faulted: self.is_faulted(),
            rpm: self.rpm,
            target_hz: self.target_hz,
            current_hz: self.current_hz,
            max_clock_hz: self.profile.max_clock_hz,
        }
    }

    pub fn profile(&self) -> &MotorProfile {
        &self.profile
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn brake_engaged(&self) -> bool {
        self.brake_engaged
    }

    pub fn enable_command(&self) -> bool {
        self.enable_command
    }

    pub fn target_hz(&self) -> u32 {
        self.target_hz
    }

    pub fn current_hz(&self) -> u32 {
        self.current_hz
    }

    pub fn rpm(&self) -> u32 {
        self.rpm
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}
