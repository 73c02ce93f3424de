//! Periodic telemetry
//!
//! Once authenticated, the device pushes one random value in 1-99 to the
//! host every telemetry interval. The emitter owns its last-send timestamp
//! and is polled from the main loop independently of inbound lines.

pub mod emitter;
pub mod random;

pub use emitter::PeriodicEmitter;
pub use random::{draw, TELEMETRY_MAX, TELEMETRY_MIN};
