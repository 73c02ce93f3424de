//! Configuration types
//!
//! Device configuration is a small TOML document compiled into the
//! firmware. It is parsed at boot without allocation.

pub mod toml;
pub mod types;

pub use self::toml::parse_config;
pub use types::*;
