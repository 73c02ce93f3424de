//! Serial connector
//!
//! The [`Connector`] ties the handshake [`Session`] to a UART, a status
//! [`Indicator`] and an optional [`CommandHandler`]. The main loop calls
//! [`Connector::update`] once per iteration:
//!
//! ```text
//!   update()
//!     │
//!     ├─ read buffered bytes until one line completes (never waits)
//!     │
//!     ├─ Session::process(line) ──▶ Action
//!     │
//!     └─ execute
//!          RespondUsername ──▶ "<username>\n"            (ungated)
//!          ConfirmAuth     ──▶ indicator, "Authentication confirmed\n"
//!          Dispatch(cmd)   ──▶ handler.handle(cmd, gate)
//!          Ignore          ──▶ nothing
//! ```
//!
//! Telemetry is not driven from here; see [`crate::telemetry`].

use heapless::String;
use tether_hal::{Uart, UartRx, UartTx};
use tether_protocol::{LineError, LineReader, AUTH_CONFIRMED, MAX_LINE_LEN};

use crate::config::{ConnectorConfig, MAX_USERNAME_LEN};
use crate::dispatch::{CommandHandler, NoHandler};
use crate::error::LinkError;
use crate::gate::{write_line, TransmitGate};
use crate::state::{Action, Session};
use crate::traits::Indicator;

/// Device side of the serial handshake
pub struct Connector<U, I, H = NoHandler> {
    session: Session,
    reader: LineReader<MAX_LINE_LEN>,
    pending: String<MAX_LINE_LEN>,
    uart: U,
    indicator: I,
    handler: Option<H>,
}

impl<U: Uart, I: Indicator> Connector<U, I, NoHandler> {
    /// Create an unauthenticated connector with no command handler
    pub fn new(username: String<MAX_USERNAME_LEN>, uart: U, indicator: I) -> Self {
        Self {
            session: Session::new(username),
            reader: LineReader::new(),
            pending: String::new(),
            uart,
            indicator,
            handler: None,
        }
    }

    /// Create a connector from a validated configuration
    pub fn from_config(config: &ConnectorConfig, uart: U, indicator: I) -> Self {
        Self::new(config.username.clone(), uart, indicator)
    }
}

impl<U: Uart, I: Indicator, H: CommandHandler> Connector<U, I, H> {
    /// Replace the handler slot with a handler of a different type
    pub fn with_handler<H2: CommandHandler>(self, handler: H2) -> Connector<U, I, H2> {
        Connector {
            session: self.session,
            reader: self.reader,
            pending: self.pending,
            uart: self.uart,
            indicator: self.indicator,
            handler: Some(handler),
        }
    }

    /// Register a handler, returning the one it replaces
    pub fn set_handler(&mut self, handler: H) -> Option<H> {
        self.handler.replace(handler)
    }

    /// Remove the registered handler
    pub fn take_handler(&mut self) -> Option<H> {
        self.handler.take()
    }

    /// Check if a handler is registered
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Check if the host has granted access
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Configured username
    pub fn username(&self) -> &str {
        self.session.username()
    }

    /// Most recently completed line
    pub fn pending_line(&self) -> &str {
        &self.pending
    }

    /// Poll the link once
    ///
    /// Consumes buffered bytes until one line completes, then acts on it.
    /// Returns `Ok(None)` if no complete line was available; remaining bytes
    /// stay queued for the next call.
    pub fn update(&mut self) -> Result<Option<Action<'_>>, LinkError<<U as UartTx>::Error>> {
        loop {
            let Some(byte) = self.uart.try_read_byte().map_err(LinkError::Transport)? else {
                return Ok(None);
            };

            match self.reader.feed(byte) {
                Ok(Some(line)) => {
                    self.pending.clear();
                    // Reader and buffer share a capacity, so this always fits
                    let _ = self.pending.push_str(line);
                    break;
                }
                Ok(None) => {}
                Err(LineError::Overflow) => {
                    warn!("line longer than {} bytes dropped", MAX_LINE_LEN);
                }
            }
        }

        let Self {
            session,
            pending,
            uart,
            indicator,
            handler,
            ..
        } = self;
        let action = session.process(pending.as_str(), handler.is_some());
        execute(action, session, uart, indicator, handler.as_mut())?;
        Ok(Some(action))
    }

    /// Act on one trimmed line as if it had arrived on the link
    pub fn process<'a>(&mut self, line: &'a str) -> Result<Action<'a>, LinkError<<U as UartTx>::Error>> {
        let action = self.session.process(line, self.handler.is_some());
        execute(
            action,
            &self.session,
            &mut self.uart,
            &mut self.indicator,
            self.handler.as_mut(),
        )?;
        Ok(action)
    }

    /// Pass a command to the registered handler
    ///
    /// Returns `Ok(false)` without calling anything when no handler is
    /// registered or the link is not yet authenticated.
    pub fn dispatch(&mut self, command: &str) -> Result<bool, LinkError<<U as UartTx>::Error>> {
        let authenticated = self.session.is_authenticated();
        match self.handler.as_mut() {
            Some(handler) if authenticated => {
                handler.handle(command, &mut TransmitGate::new(&mut self.uart, true))?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Send application data, only once authenticated
    pub fn send(&mut self, data: &str) -> Result<bool, LinkError<<U as UartTx>::Error>> {
        self.gate().send(data)
    }

    /// Borrow the transmitter behind the authentication gate
    pub fn gate(&mut self) -> TransmitGate<'_, U> {
        let open = self.session.is_authenticated();
        TransmitGate::new(&mut self.uart, open)
    }

    /// Access the underlying UART
    pub fn uart(&self) -> &U {
        &self.uart
    }

    /// Mutable access to the underlying UART
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Release the UART and indicator
    pub fn release(self) -> (U, I) {
        (self.uart, self.indicator)
    }
}

fn execute<U, I, H>(
    action: Action<'_>,
    session: &Session,
    uart: &mut U,
    indicator: &mut I,
    handler: Option<&mut H>,
) -> Result<(), LinkError<U::Error>>
where
    U: UartTx + ?Sized,
    I: Indicator + ?Sized,
    H: CommandHandler + ?Sized,
{
    match action {
        Action::RespondUsername => {
            info!("username requested");
            write_line(uart, session.username()).map_err(LinkError::Transport)
        }
        Action::ConfirmAuth => {
            info!("access granted");
            indicator.signal();
            write_line(uart, AUTH_CONFIRMED).map_err(LinkError::Transport)
        }
        Action::Dispatch(command) => match handler {
            Some(handler) => {
                let mut gate = TransmitGate::new(uart, session.is_authenticated());
                handler.handle(command, &mut gate)
            }
            None => Ok(()),
        },
        Action::Ignore => Ok(()),
    }
}
