//! Errors surfaced by the connector
//!
//! Protocol input never produces an error; only the serial transport can
//! fail, plus formatted replies that do not fit their stack buffer.

/// Link-level error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E> {
    /// The UART reported an error
    Transport(E),
    /// A formatted reply exceeded the line buffer
    ReplyTooLong,
}

impl<E> LinkError<E> {
    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, LinkError::Transport(_))
    }
}
