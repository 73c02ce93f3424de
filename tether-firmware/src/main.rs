//! Tether - serial connector firmware
//!
//! Main firmware binary for RP2040 boards. Waits for a host on UART0,
//! answers its username challenge, blinks the on-board LED when access is
//! granted, then serves commands and pushes telemetry.
//!
//! Wiring: UART0 TX on GPIO 0, RX on GPIO 1, LED on GPIO 25, GPIO 26 left
//! floating as an entropy source.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::adc::{Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::{Delay, Timer};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tether_core::config::{parse_config, ConnectorConfig, LINK_SETTLE_MS};
use tether_core::{Connector, PeriodicEmitter, RandomCommand};
use tether_drivers::LedIndicator;
use tether_hal::{Monotonic, UartConfig};
use tether_hal_rp2040::{embassy_config, noise_seed, EmbassyClock, LedPin, SerialLink};

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Tether firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = load_config();

    // Indicator starts at its off level
    let off = if config.indicator.inverted {
        Level::High
    } else {
        Level::Low
    };
    let led = LedPin::new(Output::new(p.PIN_25, off));
    let indicator = LedIndicator::new(led, Delay, &config.indicator);

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart_config = embassy_config(&UartConfig::with_baudrate(config.baud_rate));
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    info!("UART0 initialized at {} baud", config.baud_rate);

    // Let the link settle before the first poll
    Timer::after_millis(LINK_SETTLE_MS as u64).await;

    // Seed once; the handler and the emitter get independent streams
    let mut adc = Adc::new_blocking(p.ADC, Default::default());
    let mut noise = Channel::new_pin(p.PIN_26, Pull::None);
    let mut seeder = SmallRng::seed_from_u64(noise_seed(&mut adc, &mut noise));
    let handler_rng = SmallRng::seed_from_u64(seeder.next_u64());
    let emitter_rng = SmallRng::seed_from_u64(seeder.next_u64());

    let mut connector = Connector::from_config(&config, SerialLink::new(uart), indicator)
        .with_handler(RandomCommand::new(handler_rng));
    let mut emitter = PeriodicEmitter::from_config(&config, emitter_rng);
    let clock = EmbassyClock;

    info!("Waiting for host as '{}'", config.username.as_str());

    loop {
        match connector.update() {
            Ok(Some(action)) => trace!("handled line: {}", action),
            Ok(None) => {}
            Err(e) => warn!("serial error: {}", e),
        }

        if let Err(e) = emitter.poll(clock.now_ms(), &mut connector.gate()) {
            warn!("telemetry error: {}", e);
        }

        yield_now().await;
    }
}

/// Parse the embedded configuration
///
/// Falls back to built-in defaults if the file is broken, which build.rs
/// should already have prevented.
fn load_config() -> ConnectorConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using default configuration");
            ConnectorConfig::default()
        }
    }
}
