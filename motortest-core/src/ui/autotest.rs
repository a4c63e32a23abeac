//! Automated test sequence
//!
//! Three cycles of four phases, driven by elapsed time alone:
//!
//! ```text
//!  Forward (CW)    0-3s at 30% max, 3-8s at 60% max, then stop
//!  ShortPause      1s, then switch to CCW
//!  Reverse (CCW)   same as Forward
//!  LongPause       2s, then next cycle (CW) or finish
//! ```
//!
//! The pre-test target frequency and direction are restored on finish and
//! on operator abort. A fault alarm stops the motor without restoring.

use crate::motor::{Direction, MotorRuntime};
use crate::traits::MotorPort;

/// Number of full cycles in one run
pub const AUTOTEST_CYCLES: u8 = 3;

const LOW_SPEED_MS: u32 = 3000;
const RUN_MS: u32 = 8000;
const SHORT_PAUSE_MS: u32 = 1000;
const LONG_PAUSE_MS: u32 = 2000;

const LOW_SPEED_PERCENT: u32 = 30;
const RUN_SPEED_PERCENT: u32 = 60;

/// Current phase of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoTestPhase {
    Forward,
    ShortPause,
    Reverse,
    LongPause,
}

/// Result of advancing the sequence by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoTestOutcome {
    Running,
    /// All cycles done, state restored
    Finished,
    /// Fault line asserted, motor stopped
    Alarm,
}

/// AutoTest progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoTest {
    phase: AutoTestPhase,
    cycle: u8,
    phase_start_ms: u32,
    saved_target_hz: u32,
    saved_direction: Direction,
}

impl AutoTest {
    /// Save state, stop the motor and point it clockwise
    pub fn begin<P: MotorPort>(motor: &mut MotorRuntime<'_, P>, now_ms: u32) -> Self {
        let test = Self {
            phase: AutoTestPhase::Forward,
            cycle: 0,
            phase_start_ms: now_ms,
            saved_target_hz: motor.target_hz(),
            saved_direction: motor.direction(),
        };

        if motor.is_running() {
            motor.stop();
        }
        motor.set_direction(Direction::Clockwise);

        info!("AutoTest started");
        test
    }

    pub fn phase(&self) -> AutoTestPhase {
        self.phase
    }

    /// Zero-based index of the running cycle
    pub fn cycle(&self) -> u8 {
        self.cycle
    }

    /// Advance the sequence
    pub fn tick<P: MotorPort>(
        &mut self,
        motor: &mut MotorRuntime<'_, P>,
        now_ms: u32,
    ) -> AutoTestOutcome {
        if motor.is_faulted() {
            motor.stop();
            warn!("AutoTest alarm, motor stopped");
            return AutoTestOutcome::Alarm;
        }

        let elapsed = now_ms.wrapping_sub(self.phase_start_ms);

        match self.phase {
            AutoTestPhase::Forward | AutoTestPhase::Reverse => {
                if !Self::drive(motor, elapsed) {
                    motor.stop();
                    self.phase = if self.phase == AutoTestPhase::Forward {
                        AutoTestPhase::ShortPause
                    } else {
                        AutoTestPhase::LongPause
                    };
                    self.phase_start_ms = now_ms;
                }
            }
            AutoTestPhase::ShortPause => {
                if elapsed >= SHORT_PAUSE_MS {
                    motor.set_direction(Direction::CounterClockwise);
                    self.phase = AutoTestPhase::Reverse;
                    self.phase_start_ms = now_ms;
                }
            }
            AutoTestPhase::LongPause => {
                if elapsed >= LONG_PAUSE_MS {
                    self.cycle += 1;
                    if self.cycle >= AUTOTEST_CYCLES {
                        self.restore(motor);
                        info!("AutoTest finished");
                        return AutoTestOutcome::Finished;
                    }
                    motor.set_direction(Direction::Clockwise);
                    self.phase = AutoTestPhase::Forward;
                    self.phase_start_ms = now_ms;
                }
            }
        }

        AutoTestOutcome::Running
    }

    /// Operator abort: stop and restore the pre-test state
    pub fn abort<P: MotorPort>(&self, motor: &mut MotorRuntime<'_, P>) {
        motor.stop();
        self.restore(motor);
        info!("AutoTest aborted");
    }

    /// Run one speed segment; returns false once the run time is over
    fn drive<P: MotorPort>(motor: &mut MotorRuntime<'_, P>, elapsed: u32) -> bool {
        let max = motor.profile().max_clock_hz;

        if elapsed < LOW_SPEED_MS {
            let low = max * LOW_SPEED_PERCENT / 100;
            if !motor.is_running() || motor.target_hz() != low {
                motor.set_target_hz(low);
                motor.start();
            }
            true
        } else if elapsed < RUN_MS {
            let normal = max * RUN_SPEED_PERCENT / 100;
            if motor.target_hz() != normal {
                motor.set_target_hz(normal);
                motor.set_clock(normal);
            }
            true
        } else {
            false
        }
    }

    fn restore<P: MotorPort>(&self, motor: &mut MotorRuntime<'_, P>) {
        motor.set_target_hz(self.saved_target_hz);
        motor.set_direction(self.saved_direction);
    }
}
