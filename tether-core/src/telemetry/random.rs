//! Uniform value draw

use rand::Rng;

/// Smallest value ever drawn
pub const TELEMETRY_MIN: u8 = 1;

/// Largest value ever drawn
pub const TELEMETRY_MAX: u8 = 99;

/// Draw one value uniformly from `[1, 100)`
pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(TELEMETRY_MIN..=TELEMETRY_MAX)
}
