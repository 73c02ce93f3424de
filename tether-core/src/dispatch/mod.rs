//! Command handler seam
//!
//! After authentication every line that is not a handshake literal is handed
//! to a single registered [`CommandHandler`]. The handler replies through
//! the [`TransmitGate`], so it cannot leak data onto an unauthenticated
//! link even if it is invoked directly.

pub mod random;

use tether_hal::UartTx;

use crate::error::LinkError;
use crate::gate::TransmitGate;

pub use random::RandomCommand;

/// Application command handler
pub trait CommandHandler {
    /// Handle one trimmed command line
    ///
    /// Called synchronously from the polling loop. Unknown commands should
    /// be ignored rather than reported as errors.
    fn handle<T: UartTx + ?Sized>(
        &mut self,
        command: &str,
        gate: &mut TransmitGate<'_, T>,
    ) -> Result<(), LinkError<T::Error>>;
}

impl<H: CommandHandler + ?Sized> CommandHandler for &mut H {
    fn handle<T: UartTx + ?Sized>(
        &mut self,
        command: &str,
        gate: &mut TransmitGate<'_, T>,
    ) -> Result<(), LinkError<T::Error>> {
        (**self).handle(command, gate)
    }
}

/// Placeholder handler type for a connector with no handler registered
///
/// Uninhabited: a `Connector<_, _, NoHandler>` can never dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoHandler {}

impl CommandHandler for NoHandler {
    fn handle<T: UartTx + ?Sized>(
        &mut self,
        _command: &str,
        _gate: &mut TransmitGate<'_, T>,
    ) -> Result<(), LinkError<T::Error>> {
        match *self {}
    }
}
