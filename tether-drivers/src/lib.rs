//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tether-core on top of the pin traits in tether-hal:
//!
//! - Status indicator (blinking LED)

#![no_std]
#![deny(unsafe_code)]

pub mod indicator;

pub use indicator::LedIndicator;
