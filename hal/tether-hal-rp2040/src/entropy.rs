//! Startup entropy
//!
//! The RNG is seeded exactly once at boot. The seed mixes the ring
//! oscillator random bit generator with the low bits of an unconnected ADC
//! input, which pick up thermal and coupling noise.

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::clocks::RoscRng;
use rand_core::RngCore;

/// ADC samples folded into the seed
const ADC_SAMPLES: usize = 16;

/// 64-bit golden ratio, used as the mixing multiplier
const MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Gather a 64-bit seed from the ring oscillator and a floating ADC pin
///
/// Failed ADC conversions are skipped; the ring oscillator alone still
/// yields a usable seed.
pub fn noise_seed(adc: &mut Adc<'_, Blocking>, channel: &mut Channel<'_>) -> u64 {
    let mut seed = RoscRng.next_u64();
    for _ in 0..ADC_SAMPLES {
        if let Ok(sample) = adc.blocking_read(channel) {
            seed = (seed.rotate_left(7) ^ sample as u64).wrapping_mul(MIX);
        }
    }
    seed
}
