//! Link state definition

use super::events::Event;

/// Authentication state of the serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Waiting for the host to grant access
    #[default]
    Unauthenticated,
    /// Host granted access; commands and telemetry are live
    Authenticated,
}

impl LinkState {
    /// Check if the host has granted access
    pub fn is_authenticated(&self) -> bool {
        matches!(self, LinkState::Authenticated)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        match (self, event) {
            (_, Event::Grant) => LinkState::Authenticated,
            // Challenges and commands never change the state
            _ => self,
        }
    }
}
