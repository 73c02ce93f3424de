//! Monotonic clock backed by `embassy-time`

use embassy_time::Instant;
use tether_hal::Monotonic;

/// Milliseconds since boot
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
