//! Board-agnostic connector logic for Tether devices
//!
//! This crate contains everything that does not touch real hardware:
//!
//! - Handshake state machine ([`state`])
//! - The [`Connector`] that polls the serial link once per tick
//! - Outbound transmit gate ([`gate`])
//! - Command handler seam ([`dispatch`])
//! - Periodic telemetry ([`telemetry`])
//! - Configuration types and parser ([`config`])

#![no_std]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to later modules
#[macro_use]
mod fmt;

pub mod config;
pub mod connector;
pub mod dispatch;
pub mod error;
pub mod gate;
pub mod state;
pub mod telemetry;
pub mod traits;

pub use config::{parse_config, ConfigError, ConnectorConfig, IndicatorConfig};
pub use connector::Connector;
pub use dispatch::{CommandHandler, NoHandler, RandomCommand};
pub use error::LinkError;
pub use gate::TransmitGate;
pub use state::{Action, Event, LinkState, Session};
pub use telemetry::{draw, PeriodicEmitter};
pub use traits::{Indicator, NoIndicator};
