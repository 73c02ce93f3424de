//! RP2040-specific HAL for Tether firmware
//!
//! This crate provides RP2040 implementations of the shared `tether-hal`
//! traits, plus RP2040-specific functionality:
//!
//! - Non-blocking serial link over the buffered UART
//! - Status LED output
//! - Millisecond clock backed by the embassy time driver
//! - Startup entropy from the ring oscillator and a floating ADC input

#![no_std]

pub mod entropy;
pub mod gpio;
pub mod time;
pub mod uart;

pub use entropy::noise_seed;
pub use gpio::LedPin;
pub use time::EmbassyClock;
pub use uart::{embassy_config, SerialLink};
