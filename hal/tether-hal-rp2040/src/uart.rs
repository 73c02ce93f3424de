//! Serial link over an `embedded-io` stream
//!
//! `embassy_rp::uart::BufferedUart` implements the blocking `embedded-io`
//! traits on top of interrupt-filled ring buffers, so checking
//! [`ReadReady`] before reading gives a receive path that never waits.

use embassy_rp::uart;
use embedded_io::{Read, ReadReady, Write};
use tether_hal::uart::{DataBits, Parity, StopBits};
use tether_hal::{UartConfig, UartRx, UartTx};

/// Convert a shared UART configuration into the embassy-rp one
pub fn embassy_config(config: &UartConfig) -> uart::Config {
    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    out.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    out
}

/// Adapter from an `embedded-io` stream to the tether-hal UART traits
pub struct SerialLink<T> {
    inner: T,
}

impl<T> SerialLink<T> {
    /// Wrap a stream
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Access the wrapped stream
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Release the wrapped stream
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Write> UartTx for SerialLink<T> {
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

impl<T: Read + ReadReady> UartRx for SerialLink<T> {
    type Error = T::Error;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.inner.read_ready()? {
            return Ok(None);
        }
        let mut byte = [0u8; 1];
        match self.inner.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}
