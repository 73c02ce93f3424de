//! Minimal TOML parser for device configuration
//!
//! Handles only the subset used by `device.toml`:
//! - `[device]` and `[indicator]` section headers
//! - `key = value` pairs with string, integer and boolean values
//! - Comments (`# ...`), including trailing comments after a value
//!
//! Unknown sections and keys are errors so typos do not silently fall back
//! to defaults.

use super::types::{parse_username, ConfigError, ConnectorConfig};

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Device,
    Indicator,
}

/// Parse TOML configuration into a [`ConnectorConfig`]
///
/// Keys that are absent keep their default values. The result is validated
/// before it is returned.
pub fn parse_config(input: &str) -> Result<ConnectorConfig, ConfigError> {
    let mut config = ConnectorConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    match header.trim() {
        "device" => Ok(Section::Device),
        "indicator" => Ok(Section::Indicator),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ConnectorConfig,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Device, "username") => {
            config.username = parse_username(parse_string(value)?)?;
        }
        (Section::Device, "baud_rate") => {
            config.baud_rate = parse_u32(value)?;
        }
        (Section::Device, "telemetry_interval_ms") => {
            config.telemetry_interval_ms = parse_u32(value)?;
        }
        (Section::Indicator, "pulses") => {
            config.indicator.pulses =
                u8::try_from(parse_u32(value)?).map_err(|_| ConfigError::InvalidValue)?;
        }
        (Section::Indicator, "phase_ms") => {
            config.indicator.phase_ms = parse_u32(value)?;
        }
        (Section::Indicator, "inverted") => {
            config.indicator.inverted = parse_bool(value)?;
        }
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

/// Remove a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_string(value: &str) -> Result<&str, ConfigError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ConfigError::InvalidValue)
}

fn parse_u32(value: &str) -> Result<u32, ConfigError> {
    // TOML allows underscores as digit separators
    let mut result: u32 = 0;
    let mut digits = 0;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(10).ok_or(ConfigError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(d))
            .ok_or(ConfigError::InvalidValue)?;
        digits += 1;
    }
    if digits == 0 {
        return Err(ConfigError::InvalidValue);
    }
    Ok(result)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}
