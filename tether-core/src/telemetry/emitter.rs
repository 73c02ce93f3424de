//! Interval-driven telemetry emitter

use rand::RngCore;
use tether_hal::UartTx;
use tether_protocol::DeviceMessage;

use super::random::draw;
use crate::config::ConnectorConfig;
use crate::error::LinkError;
use crate::gate::TransmitGate;

/// Sends one random value per interval while the gate is open
///
/// A value is due when strictly more than the interval has passed since the
/// last send. The last-send time starts at zero and only advances when a
/// value is actually written. Missed intervals are not caught up.
#[derive(Debug, Clone)]
pub struct PeriodicEmitter<R> {
    interval_ms: u64,
    last_sent_ms: u64,
    rng: R,
}

impl<R: RngCore> PeriodicEmitter<R> {
    /// Create an emitter with the given interval
    pub fn new(interval_ms: u32, rng: R) -> Self {
        Self {
            interval_ms: interval_ms as u64,
            last_sent_ms: 0,
            rng,
        }
    }

    /// Create an emitter from a validated configuration
    pub fn from_config(config: &ConnectorConfig, rng: R) -> Self {
        Self::new(config.telemetry_interval_ms, rng)
    }

    /// Configured interval
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Time of the last value written
    pub fn last_sent_ms(&self) -> u64 {
        self.last_sent_ms
    }

    /// Check if a value would be sent at `now_ms`, ignoring the gate
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_sent_ms) > self.interval_ms
    }

    /// Send a value if one is due and the gate is open
    ///
    /// Returns the value written, if any.
    pub fn poll<T: UartTx + ?Sized>(
        &mut self,
        now_ms: u64,
        gate: &mut TransmitGate<'_, T>,
    ) -> Result<Option<u8>, LinkError<T::Error>> {
        if !gate.is_open() || !self.is_due(now_ms) {
            return Ok(None);
        }

        let value = draw(&mut self.rng);
        gate.send_message(DeviceMessage::Telemetry(value))?;
        self.last_sent_ms = now_ms;
        trace!("telemetry {} at {} ms", value, now_ms);
        Ok(Some(value))
    }
}
