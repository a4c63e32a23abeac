//! Motor profile record

use heapless::String;

use crate::config::MAX_NAME_LEN;

/// Profile name, at most [`MAX_NAME_LEN`] characters
pub type ProfileName = String<MAX_NAME_LEN>;

/// Name given to profiles with no stored name
pub const DEFAULT_NAME: &str = "Unnamed";

/// Default pulses per revolution
pub const DEFAULT_PPR: u8 = 6;

/// Default clock safety cap
pub const DEFAULT_MAX_CLOCK_HZ: u32 = 20_000;

/// Which optional lines a motor/driver wiring exposes, their polarity,
/// and a safety cap on the clock frequency
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorProfile {
    pub name: ProfileName,
    pub has_brake: bool,
    /// Tachometer feedback present
    pub has_fg: bool,
    /// Fault/alarm line present
    pub has_ld: bool,
    pub ld_active_low: bool,
    pub has_stop: bool,
    pub stop_active_high: bool,
    pub has_enable: bool,
    pub enable_active_high: bool,
    /// Tachometer pulses per revolution (1-255)
    pub pulses_per_rev: u8,
    /// Clock is never driven above this
    pub max_clock_hz: u32,
}

impl Default for MotorProfile {
    fn default() -> Self {
        Self {
            name: name_from(DEFAULT_NAME),
            has_brake: false,
            has_fg: false,
            has_ld: false,
            ld_active_low: true,
            has_stop: false,
            stop_active_high: true,
            has_enable: false,
            enable_active_high: true,
            pulses_per_rev: DEFAULT_PPR,
            max_clock_hz: DEFAULT_MAX_CLOCK_HZ,
        }
    }
}

/// Build a profile name, truncating to [`MAX_NAME_LEN`] characters
pub fn name_from(text: &str) -> ProfileName {
    let mut name = ProfileName::new();
    for ch in text.chars() {
        if name.push(ch).is_err() {
            break;
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = MotorProfile::default();
        assert_eq!(p.name.as_str(), "Unnamed");
        assert!(!p.has_brake && !p.has_fg && !p.has_ld && !p.has_stop && !p.has_enable);
        assert!(p.ld_active_low && p.stop_active_high && p.enable_active_high);
        assert_eq!(p.pulses_per_rev, 6);
        assert_eq!(p.max_clock_hz, 20_000);
    }

    #[test]
    fn test_name_truncated() {
        let name = name_from("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(name.as_str(), "ABCDEFGHIJKLMNOPQRS");
    }
}
