//! Outbound transmit gate
//!
//! Application data (command replies and telemetry) may only reach the host
//! after authentication. A closed gate writes nothing at all, not even the
//! line terminator. The two handshake replies bypass the gate and are
//! written directly by the connector.

use core::fmt::{self, Write};

use heapless::String;
use tether_hal::UartTx;
use tether_protocol::{DeviceMessage, MAX_LINE_LEN};

use crate::error::LinkError;

const LINE_END: &[u8] = b"\n";

/// Write one terminated line, ungated
pub(crate) fn write_line<T: UartTx + ?Sized>(tx: &mut T, data: &str) -> Result<(), T::Error> {
    tx.write_blocking(data.as_bytes())?;
    tx.write_blocking(LINE_END)
}

/// Borrowed transmitter that only writes while the link is authenticated
pub struct TransmitGate<'a, T: ?Sized> {
    tx: &'a mut T,
    open: bool,
}

impl<'a, T: UartTx + ?Sized> TransmitGate<'a, T> {
    /// Wrap a transmitter; `open` is the current authentication flag
    pub fn new(tx: &'a mut T, open: bool) -> Self {
        Self { tx, open }
    }

    /// Check if data will actually be written
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Send `data` followed by a newline
    ///
    /// Returns `Ok(false)` without writing anything when the gate is closed.
    pub fn send(&mut self, data: &str) -> Result<bool, LinkError<T::Error>> {
        if !self.open {
            trace!("gate closed, dropping {} bytes", data.len());
            return Ok(false);
        }
        write_line(&mut *self.tx, data).map_err(LinkError::Transport)?;
        Ok(true)
    }

    /// Send a device message as one line
    pub fn send_message(&mut self, message: DeviceMessage<'_>) -> Result<bool, LinkError<T::Error>> {
        match message {
            DeviceMessage::Username(data) | DeviceMessage::Data(data) => self.send(data),
            other => self.send_fmt(format_args!("{}", other)),
        }
    }

    /// Format and send one line
    ///
    /// The rendered text must fit in [`MAX_LINE_LEN`] bytes.
    pub fn send_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<bool, LinkError<T::Error>> {
        if !self.open {
            return Ok(false);
        }
        let mut line: String<MAX_LINE_LEN> = String::new();
        line.write_fmt(args).map_err(|_| LinkError::ReplyTooLong)?;
        self.send(&line)
    }
}
