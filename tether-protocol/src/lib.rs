//! Tether serial handshake protocol
//!
//! This crate defines the line protocol spoken between a Tether device and
//! its host over a plain serial link. Every message is one line of UTF-8
//! text terminated by `\n`; surrounding whitespace is not significant.
//!
//! # Protocol Overview
//!
//! ```text
//!   host                                   device
//!    │  "Send your username:"                │
//!    │ ─────────────────────────────────────▶│
//!    │                          "<username>" │
//!    │ ◀─────────────────────────────────────│
//!    │  "AUTH_SUCCESS"                       │
//!    │ ─────────────────────────────────────▶│  (indicator blinks)
//!    │            "Authentication confirmed" │
//!    │ ◀─────────────────────────────────────│
//!    │  "<command>"                          │
//!    │ ─────────────────────────────────────▶│
//!    │                   "<reply>" / "<1-99>" │
//!    │ ◀─────────────────────────────────────│
//! ```
//!
//! The device side is implemented by `tether-core`; [`host::HostHandshake`]
//! models the host side.

#![no_std]
#![deny(unsafe_code)]

pub mod host;
pub mod line;
pub mod messages;

pub use host::{HostHandshake, HostSettings, HostStep};
pub use line::{LineError, LineReader, MAX_LINE_LEN};
pub use messages::{
    DeviceMessage, HostMessage, AUTH_CONFIRMED, AUTH_SUCCESS, COMMAND_SEND_RANDOM,
    RANDOM_REPLY_PREFIX, USERNAME_REQUEST,
};
