//! Per-line handshake decisions
//!
//! [`Session`] owns the username and the [`LinkState`]. It turns one
//! trimmed inbound line into an [`Action`] without touching any I/O, so the
//! whole handshake can be tested on the host.

use heapless::String;
use tether_protocol::HostMessage;

use super::events::Event;
use super::machine::LinkState;
use crate::config::{ConnectorConfig, MAX_USERNAME_LEN};

/// What the connector must do in response to a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action<'a> {
    /// Send the username, ungated
    RespondUsername,
    /// Run the indicator pattern, then send the acknowledgment
    ConfirmAuth,
    /// Hand the line to the registered command handler
    Dispatch(&'a str),
    /// Drop the line
    Ignore,
}

/// Handshake session for one device boot
#[derive(Debug, Clone)]
pub struct Session {
    username: String<MAX_USERNAME_LEN>,
    state: LinkState,
}

impl Session {
    /// Create an unauthenticated session
    pub fn new(username: String<MAX_USERNAME_LEN>) -> Self {
        Self {
            username,
            state: LinkState::Unauthenticated,
        }
    }

    /// Create a session from a validated configuration
    pub fn from_config(config: &ConnectorConfig) -> Self {
        Self::new(config.username.clone())
    }

    /// Configured username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Current link state
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Check if the host has granted access
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Decide what to do with one trimmed line
    ///
    /// `handler_registered` tells whether a command handler is attached;
    /// commands are only dispatched after authentication and only to a
    /// registered handler.
    pub fn process<'a>(&mut self, line: &'a str, handler_registered: bool) -> Action<'a> {
        let message = HostMessage::parse(line);
        let previous = self.state;
        self.state = self.state.transition(Event::from(&message));

        if previous != self.state {
            debug!("link state changed: authenticated={}", self.state.is_authenticated());
        }

        match message {
            HostMessage::UsernameRequest => Action::RespondUsername,
            // Every grant is acknowledged, including repeats
            HostMessage::AuthSuccess => Action::ConfirmAuth,
            // Blank lines are never commands, in any state
            HostMessage::Command("") => Action::Ignore,
            HostMessage::Command(command) if self.is_authenticated() && handler_registered => {
                Action::Dispatch(command)
            }
            HostMessage::Command(_) => {
                trace!("dropping line: authenticated={}", self.is_authenticated());
                Action::Ignore
            }
        }
    }
}
