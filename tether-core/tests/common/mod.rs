//! Host-side test doubles shared by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use tether_core::{CommandHandler, Indicator, LinkError, TransmitGate};
use tether_hal::{UartRx, UartTx};

/// Bytes written by the device, shared with the test
pub type Wire = Rc<RefCell<Vec<u8>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Scripted serial port
///
/// `rx` holds bytes the host has sent; everything the device writes lands
/// in the shared `wire`.
pub struct MockSerial {
    pub rx: VecDeque<u8>,
    pub wire: Wire,
    pub fail_writes: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            wire: Rc::new(RefCell::new(Vec::new())),
            fail_writes: false,
        }
    }

    /// Queue one line from the host, terminated with `\n`
    pub fn host_line(&mut self, line: &str) {
        self.host_bytes(line.as_bytes());
        self.rx.push_back(b'\n');
    }

    pub fn host_bytes(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }
}

impl UartTx for MockSerial {
    type Error = MockError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), MockError> {
        if self.fail_writes {
            return Err(MockError);
        }
        self.wire.borrow_mut().extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MockError> {
        Ok(())
    }
}

impl UartRx for MockSerial {
    type Error = MockError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, MockError> {
        Ok(self.rx.pop_front())
    }
}

/// Everything written so far, as text
pub fn output(wire: &Wire) -> String {
    String::from_utf8(wire.borrow().clone()).unwrap()
}

/// Take and clear everything written so far
pub fn drain(wire: &Wire) -> String {
    let bytes = std::mem::take(&mut *wire.borrow_mut());
    String::from_utf8(bytes).unwrap()
}

/// Indicator that records how much had been written when it fired
pub struct RecordingIndicator {
    pub wire: Wire,
    pub fired_at: Rc<RefCell<Vec<usize>>>,
}

impl RecordingIndicator {
    pub fn new(wire: &Wire) -> Self {
        Self {
            wire: wire.clone(),
            fired_at: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl Indicator for RecordingIndicator {
    fn signal(&mut self) {
        let written = self.wire.borrow().len();
        self.fired_at.borrow_mut().push(written);
    }
}

/// Handler that records every command it receives
#[derive(Clone, Default)]
pub struct RecordingHandler {
    pub seen: Rc<RefCell<Vec<String>>>,
    pub reply: Option<&'static str>,
    pub calls: Rc<Cell<usize>>,
}

impl CommandHandler for RecordingHandler {
    fn handle<T: UartTx + ?Sized>(
        &mut self,
        command: &str,
        gate: &mut TransmitGate<'_, T>,
    ) -> Result<(), LinkError<T::Error>> {
        self.seen.borrow_mut().push(command.to_string());
        self.calls.set(self.calls.get() + 1);
        if let Some(reply) = self.reply {
            gate.send(reply)?;
        }
        Ok(())
    }
}
