//! GPIO output for the status LED

use embassy_rp::gpio::Output;
use tether_hal::OutputPin;

/// Push-pull output driving the status LED
pub struct LedPin<'d> {
    output: Output<'d>,
}

impl<'d> LedPin<'d> {
    /// Wrap a configured output
    pub fn new(output: Output<'d>) -> Self {
        Self { output }
    }
}

impl OutputPin for LedPin<'_> {
    fn set_high(&mut self) {
        self.output.set_high();
    }

    fn set_low(&mut self) {
        self.output.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.output.is_set_high()
    }
}
