//! Blinking LED indicator
//!
//! Drives a single GPIO through a fixed on/off pattern. The pattern blocks
//! the caller through a [`DelayNs`] for its whole duration.

use embedded_hal::delay::DelayNs;
use tether_core::config::IndicatorConfig;
use tether_core::traits::Indicator;
use tether_hal::OutputPin;

/// LED status indicator
///
/// The pin can be configured as active-high (default) or active-low.
pub struct LedIndicator<P, D> {
    pin: P,
    delay: D,
    /// If true, LED on = pin LOW
    inverted: bool,
    pulses: u8,
    phase_ms: u32,
    /// Current logical state
    lit: bool,
}

impl<P: OutputPin, D: DelayNs> LedIndicator<P, D> {
    /// Create an indicator with the given pattern
    ///
    /// The LED is switched off immediately.
    pub fn new(pin: P, delay: D, config: &IndicatorConfig) -> Self {
        let mut led = Self {
            pin,
            delay,
            inverted: config.inverted,
            pulses: config.pulses,
            phase_ms: config.phase_ms,
            lit: false,
        };
        led.set_lit(false);
        led
    }

    /// Default pattern on an active-high LED
    pub fn new_active_high(pin: P, delay: D) -> Self {
        Self::new(pin, delay, &IndicatorConfig::default())
    }

    /// Default pattern on an active-low LED
    pub fn new_active_low(pin: P, delay: D) -> Self {
        let config = IndicatorConfig {
            inverted: true,
            ..IndicatorConfig::default()
        };
        Self::new(pin, delay, &config)
    }

    /// Switch the LED on or off
    pub fn set_lit(&mut self, lit: bool) {
        self.lit = lit;
        // on != inverted gives the pin level
        self.pin.set_state(lit != self.inverted);
    }

    /// Check if the LED is currently lit
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Release the pin and delay
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P: OutputPin, D: DelayNs> Indicator for LedIndicator<P, D> {
    fn signal(&mut self) {
        for _ in 0..self.pulses {
            self.set_lit(true);
            self.delay.delay_ms(self.phase_ms);
            self.set_lit(false);
            self.delay.delay_ms(self.phase_ms);
        }
    }
}
