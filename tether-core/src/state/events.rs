//! Events that trigger link state transitions

use tether_protocol::HostMessage;

/// Events derived from inbound host lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Host asked for the username
    Challenge,
    /// Host granted access
    Grant,
    /// Any other line
    Command,
}

impl From<&HostMessage<'_>> for Event {
    fn from(message: &HostMessage<'_>) -> Self {
        match message {
            HostMessage::UsernameRequest => Event::Challenge,
            HostMessage::AuthSuccess => Event::Grant,
            HostMessage::Command(_) => Event::Command,
        }
    }
}
