//! ESP32 quadrature encoder demo firmware.
//!
//! Configures PCNT unit 0 as a quadrature counter on GPIO18/19 and polls
//! it from a fixed-rate loop, logging position and delta whenever the
//! shaft moves.
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! espflash flash --monitor target/xtensa-esp32-espidf/release/esp32_main
//! ```

use esp_idf_hal::peripherals::Peripherals;
use quad_encoder::hal::esp32::Esp32PcntCounter;
use quad_encoder::{EncoderConfig, InitialCount, QuadratureEncoder};
use std::thread;
use std::time::Duration;

/// Log the position at least this often (in loop ticks) even when idle
const HEARTBEAT_TICKS: u32 = 500;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("quad-encoder demo starting");

    let config = EncoderConfig::default()
        .with_label("shaft")
        .with_period(Esp32PcntCounter::MAX_PERIOD)
        .with_initial_count(InitialCount::ReadHardware)
        .with_filter_cycles(100)
        .with_poll_interval_ms(10);

    let peripherals = Peripherals::take()?;

    let counter = Esp32PcntCounter::new(
        peripherals.pcnt0,
        peripherals.pins.gpio18, // A
        peripherals.pins.gpio19, // B
        &config,
    )?;
    let mut encoder = QuadratureEncoder::with_config(counter, &config)?;

    log::info!(
        "polling every {} ms, max {} counts/s",
        config.poll_interval_ms,
        config.max_counts_per_second()
    );

    let interval = Duration::from_millis(u64::from(config.poll_interval_ms));
    let mut idle_ticks: u32 = 0;

    loop {
        let reading = encoder.update()?;

        if reading.delta != 0 {
            idle_ticks = 0;
            log::info!("position {} (delta {})", reading.position, reading.delta);
        } else {
            idle_ticks += 1;
            if idle_ticks >= HEARTBEAT_TICKS {
                idle_ticks = 0;
                log::debug!("position {}", reading.position);
            }
        }

        thread::sleep(interval);
    }
}
