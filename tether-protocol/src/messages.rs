//! Message types for the Tether line protocol
//!
//! Messages are divided into two directions:
//! - Host → Device: authentication challenge, grant, application commands
//! - Device → Host: challenge response, handshake acknowledgment, telemetry
//!   and command replies
//!
//! All literals are case-sensitive and compared after trimming.

use core::fmt;

// Host → Device literals
pub const USERNAME_REQUEST: &str = "Send your username:";
pub const AUTH_SUCCESS: &str = "AUTH_SUCCESS";

// Device → Host literals
pub const AUTH_CONFIRMED: &str = "Authentication confirmed";

/// Example application command answered with a random reply
pub const COMMAND_SEND_RANDOM: &str = "SEND_RANDOM";

/// Prefix of the reply to [`COMMAND_SEND_RANDOM`]
pub const RANDOM_REPLY_PREFIX: &str = "Random: ";

/// Messages from the host to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage<'a> {
    /// Authentication challenge
    UsernameRequest,
    /// Authentication granted
    AuthSuccess,
    /// Any other line, interpreted by the application
    Command(&'a str),
}

impl<'a> HostMessage<'a> {
    /// Classify a trimmed line
    ///
    /// Never fails: anything that is not a protocol literal is a command,
    /// including the empty line.
    pub fn parse(line: &'a str) -> Self {
        match line {
            USERNAME_REQUEST => HostMessage::UsernameRequest,
            AUTH_SUCCESS => HostMessage::AuthSuccess,
            other => HostMessage::Command(other),
        }
    }

    /// Check if this message is part of the handshake
    pub fn is_handshake(&self) -> bool {
        matches!(self, HostMessage::UsernameRequest | HostMessage::AuthSuccess)
    }
}

/// Messages from the device to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMessage<'a> {
    /// Challenge response: the configured username, nothing else
    Username(&'a str),
    /// Handshake acknowledgment
    AuthConfirmed,
    /// Periodic telemetry value (1-99)
    Telemetry(u8),
    /// Reply to `SEND_RANDOM`
    Random(u8),
    /// Free-form application data
    Data(&'a str),
}

impl fmt::Display for DeviceMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceMessage::Username(name) => f.write_str(name),
            DeviceMessage::AuthConfirmed => f.write_str(AUTH_CONFIRMED),
            DeviceMessage::Telemetry(value) => write!(f, "{}", value),
            DeviceMessage::Random(value) => write!(f, "{}{}", RANDOM_REPLY_PREFIX, value),
            DeviceMessage::Data(data) => f.write_str(data),
        }
    }
}
