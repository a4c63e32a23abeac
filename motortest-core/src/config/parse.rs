//! Minimal TOML parser for the device configuration
//!
//! Handles only the subset the tester's config file uses. It does NOT
//! support the full TOML spec.
//!
//! Supported:
//! - `[section]` headers
//! - `key = value` pairs (string, integer, boolean)
//! - Comments (`# ...`), including trailing ones
//!
//! Unknown keys inside a known section are rejected so typos surface at
//! boot instead of silently falling back to defaults.

use super::types::{ButtonLayout, DeviceConfig, EnablePolicy};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid for its section
    InvalidKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Buttons,
    Motor,
    Ui,
}

/// Parse configuration text into a [`DeviceConfig`]
///
/// Keys that are absent keep their defaults.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ConfigError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        match parse_key_value(line) {
            Some((key, value)) => apply_value(section, key, value, &mut config)?,
            None => return Err(ConfigError::InvalidValue),
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    match header.trim() {
        "buttons" => Ok(Section::Buttons),
        "motor" => Ok(Section::Motor),
        "ui" => Ok(Section::Ui),
        _ => Err(ConfigError::InvalidSection),
    }
}

/// Split `key = value`, dropping a trailing comment outside quotes
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

/// Parse a duration in milliseconds, bounded to `1..=max`
fn parse_ms(value: &str, max: u32) -> Result<u32, ConfigError> {
    let ms: u32 = parse_int(value)?;
    if ms == 0 || ms > max {
        return Err(ConfigError::InvalidValue);
    }
    Ok(ms)
}

fn parse_layout(value: &str) -> Result<ButtonLayout, ConfigError> {
    match parse_string(value) {
        "four" => Ok(ButtonLayout::FourButton),
        "three" => Ok(ButtonLayout::ThreeButton),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn parse_enable_policy(value: &str) -> Result<EnablePolicy, ConfigError> {
    match parse_string(value) {
        "commanded" => Ok(EnablePolicy::Commanded),
        "observed" => Ok(EnablePolicy::Observed),
        _ => Err(ConfigError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
) -> Result<(), ConfigError> {
    let timing = &mut config.timing;

    match (section, key) {
        (Section::Buttons, "layout") => config.layout = parse_layout(value)?,
        (Section::Buttons, "debounce_ms") => timing.debounce_ms = parse_ms(value, 500)?,
        (Section::Buttons, "long_press_ms") => timing.long_press_ms = parse_ms(value, 5000)?,

        (Section::Motor, "enable_line") => config.enable_policy = parse_enable_policy(value)?,
        (Section::Motor, "rpm_window_ms") => timing.rpm_window_ms = parse_ms(value, 10_000)?,

        (Section::Ui, "speed_repeat_ms") => timing.speed_repeat_ms = parse_ms(value, 2000)?,
        (Section::Ui, "loop_ms") => timing.loop_ms = parse_ms(value, 100)?,
        (Section::Ui, "autotest") => config.autotest = parse_bool(value)?,

        _ => return Err(ConfigError::InvalidKey),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::DEFAULT_DEBOUNCE_MS;

    #[test]
    fn test_empty_input_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, DeviceConfig::default());
        assert_eq!(config.timing.debounce_ms, DEFAULT_DEBOUNCE_MS);
    }

    #[test]
    fn test_parse_full_config() {
        let text = r#"
# Bench tester, three buttons, enable driven by us
[buttons]
layout = "three"
long_press_ms = 800   # slower operators

[motor]
enable_line = "commanded"
rpm_window_ms = 500

[ui]
speed_repeat_ms = 200
loop_ms = 10
autotest = false
"#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.layout, ButtonLayout::ThreeButton);
        assert_eq!(config.enable_policy, EnablePolicy::Commanded);
        assert_eq!(config.timing.long_press_ms, 800);
        assert_eq!(config.timing.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert_eq!(config.timing.rpm_window_ms, 500);
        assert_eq!(config.timing.speed_repeat_ms, 200);
        assert_eq!(config.timing.loop_ms, 10);
        assert!(!config.autotest);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert_eq!(
            parse_config("[heater]\nmax = 3"),
            Err(ConfigError::InvalidSection)
        );
    }

    #[test]
    fn test_key_outside_section_rejected() {
        assert_eq!(parse_config("layout = \"four\""), Err(ConfigError::InvalidKey));
    }

    #[test]
    fn test_bad_values_rejected() {
        assert_eq!(
            parse_config("[buttons]\nlayout = \"five\""),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[ui]\nloop_ms = 0"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[ui]\nautotest = yes"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(parse_config("[motor]\nenable_line"), Err(ConfigError::InvalidValue));
    }

    #[test]
    fn test_parse_key_value_keeps_hash_inside_quotes() {
        assert_eq!(parse_key_value("a = \"x#y\""), Some(("a", "\"x#y\"")));
        assert_eq!(parse_key_value("a = 5 # five"), Some(("a", "5")));
        assert_eq!(parse_key_value("a ="), None);
    }
}
