//! Tether Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the connector core is written
//! against. Chip-specific crates implement them; host tests implement them
//! with in-memory doubles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (tether-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tether-core / tether-drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tether-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ tether-hal-     │
//!            │    rp2040       │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (indicator LED)
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial link to the host
//! - [`time::Monotonic`] - Millisecond clock for periodic work

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use time::Monotonic;
pub use uart::{Uart, UartConfig, UartRx, UartTx};
