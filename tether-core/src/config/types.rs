//! Configuration type definitions

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum username length in bytes
pub const MAX_USERNAME_LEN: usize = 32;

/// Username used when no configuration is available
pub const DEFAULT_USERNAME: &str = "Venus";

/// Default serial baud rate
pub const DEFAULT_BAUD_RATE: u32 = tether_hal::uart::DEFAULT_BAUDRATE;

/// Default telemetry interval in milliseconds
pub const DEFAULT_TELEMETRY_INTERVAL_MS: u32 = 5000;

/// Default indicator on/off cycles per acknowledgment
pub const INDICATOR_PULSES: u8 = 3;

/// Default duration of each indicator phase (on or off) in milliseconds
pub const INDICATOR_PHASE_MS: u32 = 100;

/// Pause after bringing up the serial link before the first poll
pub const LINK_SETTLE_MS: u32 = 100;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Username longer than [`MAX_USERNAME_LEN`]
    UsernameTooLong,
    /// Username empty, padded with whitespace, or containing a line break
    InvalidUsername,
    /// Baud rate of zero
    InvalidBaudRate,
    /// Telemetry interval of zero
    InvalidInterval,
    /// Indicator pattern with no pulses or a zero-length phase
    InvalidIndicator,
    /// Unknown `[section]` header
    InvalidSection,
    /// Unknown key within a section
    UnknownKey,
    /// Value of the wrong type or malformed
    InvalidValue,
}

/// Status indicator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndicatorConfig {
    /// On/off cycles per acknowledgment
    pub pulses: u8,
    /// Duration of each phase in milliseconds
    pub phase_ms: u32,
    /// LED is lit when the pin is low
    pub inverted: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            pulses: INDICATOR_PULSES,
            phase_ms: INDICATOR_PHASE_MS,
            inverted: false,
        }
    }
}

impl IndicatorConfig {
    /// Total time the pattern blocks the caller
    pub fn duration_ms(&self) -> u32 {
        (self.pulses as u32 * 2).saturating_mul(self.phase_ms)
    }
}

/// Connector configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConnectorConfig {
    /// Reply to the username challenge
    pub username: String<MAX_USERNAME_LEN>,
    /// Serial baud rate
    pub baud_rate: u32,
    /// Minimum gap between telemetry values
    pub telemetry_interval_ms: u32,
    /// Status indicator settings
    pub indicator: IndicatorConfig,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        let mut username = String::new();
        let _ = username.push_str(DEFAULT_USERNAME);
        Self {
            username,
            baud_rate: DEFAULT_BAUD_RATE,
            telemetry_interval_ms: DEFAULT_TELEMETRY_INTERVAL_MS,
            indicator: IndicatorConfig::default(),
        }
    }
}

impl ConnectorConfig {
    /// Default configuration with a different username
    pub fn with_username(username: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            username: parse_username(username)?,
            ..Self::default()
        })
    }

    /// Check that the configuration can drive a connector
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_username(&self.username)?;
        if self.baud_rate == 0 {
            return Err(ConfigError::InvalidBaudRate);
        }
        if self.telemetry_interval_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if self.indicator.pulses == 0 || self.indicator.phase_ms == 0 {
            return Err(ConfigError::InvalidIndicator);
        }
        Ok(())
    }
}

/// Validate and copy a username
///
/// The username is echoed byte-for-byte as a reply line, so it must be
/// non-empty, already trimmed, and free of line breaks.
pub fn parse_username(name: &str) -> Result<String<MAX_USERNAME_LEN>, ConfigError> {
    if name.is_empty() || name.trim() != name || name.contains(['\n', '\r']) {
        return Err(ConfigError::InvalidUsername);
    }
    let mut username = String::new();
    username
        .push_str(name)
        .map_err(|_| ConfigError::UsernameTooLong)?;
    Ok(username)
}
