//! `SEND_RANDOM` example command

use rand::RngCore;
use tether_hal::UartTx;
use tether_protocol::{DeviceMessage, COMMAND_SEND_RANDOM};

use super::CommandHandler;
use crate::error::LinkError;
use crate::gate::TransmitGate;
use crate::telemetry::draw;

/// Replies `Random: <n>` with `n` in 1-99 to `SEND_RANDOM`
///
/// Every other command is ignored.
#[derive(Debug, Clone)]
pub struct RandomCommand<R> {
    rng: R,
}

impl<R: RngCore> RandomCommand<R> {
    /// Create a handler drawing from `rng`
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Release the RNG
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> CommandHandler for RandomCommand<R> {
    fn handle<T: UartTx + ?Sized>(
        &mut self,
        command: &str,
        gate: &mut TransmitGate<'_, T>,
    ) -> Result<(), LinkError<T::Error>> {
        if command != COMMAND_SEND_RANDOM {
            trace!("unhandled command ({} bytes)", command.len());
            return Ok(());
        }
        let value = draw(&mut self.rng);
        debug!("random reply {}", value);
        gate.send_message(DeviceMessage::Random(value))?;
        Ok(())
    }
}
