//! FuzzyIrrigation Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  DhtSensor     Ds3231        Hd44780       RelayDriver         │
//! │  (SensorPort)  (ClockPort)   (DisplayPort) (ActuatorPort)      │
//! │  StdioConsole  LogEventSink  UptimeClock                       │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  sample · fuzzy window · relay timer · display         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals as Chip;
use esp_idf_hal::units::Hertz;
use esp_idf_svc::sys::esp;
use log::info;

use fuzzyirrigation::adapters::console::StdioConsole;
use fuzzyirrigation::adapters::log_sink::LogEventSink;
use fuzzyirrigation::adapters::time::UptimeClock;
use fuzzyirrigation::app::context::Peripherals;
use fuzzyirrigation::app::diagnostics::{DiagnosticSession, RunMode, select_run_mode};
use fuzzyirrigation::app::service::AppService;
use fuzzyirrigation::config::SystemConfig;
use fuzzyirrigation::drivers::dht::DhtSensor;
use fuzzyirrigation::drivers::ds3231::Ds3231;
use fuzzyirrigation::drivers::hd44780::Hd44780;
use fuzzyirrigation::drivers::relay::RelayDriver;
use fuzzyirrigation::pins;

/// UART0 carries both the log output and the diagnostic console.
const CONSOLE_UART: esp_idf_svc::sys::uart_port_t = 0;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    init_console_uart()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  FuzzyIrrigation v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    let board = config.board;
    info!("Board {:?}, sensor {:?}", board.kind, board.sensor_model);

    // ── 2. Peripherals from the board profile ─────────────────
    let chip = Chip::take()?;

    // SAFETY: every GPIO number comes from a `BoardProfile` preset and is
    // claimed exactly once below.
    let sensor_pin = PinDriver::input_output_od(unsafe { AnyIOPin::new(board.sensor_gpio) })?;
    let relay_pin = PinDriver::output(unsafe { AnyOutputPin::new(board.relay_gpio) })?;
    let [rs, en, d4, d5, d6, d7] = board
        .lcd_gpios
        .map(|gpio| PinDriver::output(unsafe { AnyOutputPin::new(gpio) }));
    let i2c = I2cDriver::new(
        chip.i2c0,
        unsafe { AnyIOPin::new(board.i2c_sda_gpio) },
        unsafe { AnyIOPin::new(board.i2c_scl_gpio) },
        &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUDRATE_HZ)),
    )?;

    let mut lcd = Hd44780::new(rs?, en?, [d4?, d5?, d6?, d7?], Ets);
    lcd.init()?;

    let mut periph = Peripherals::new(
        DhtSensor::new(sensor_pin, Ets, board.sensor_model),
        Ds3231::new(i2c),
        lcd,
        RelayDriver::new(relay_pin),
    );
    let mut sink = LogEventSink::new();
    let uptime = UptimeClock::new();

    // ── 3. Run mode ───────────────────────────────────────────
    let mut console = StdioConsole::new()?;
    if select_run_mode(&mut console, config.prompt_timeout_ms) == RunMode::Diagnostic {
        DiagnosticSession::new(&config)?.run(&mut console);
    }

    // ── 4. Control loop ───────────────────────────────────────
    let mut service = AppService::new(config)?;
    let loop_ms = service.config().loop_interval_ms;
    service.start(uptime.uptime_ms(), &mut periph, &mut sink);
    info!("INIT DONE");

    loop {
        service.tick(uptime.uptime_ms(), &mut periph, &mut sink);
        FreeRtos::delay_ms(loop_ms);
    }
}

/// Install the UART driver so stdin blocks instead of returning EOF.
fn init_console_uart() -> Result<()> {
    use esp_idf_svc::sys::{esp_vfs_dev_uart_use_driver, uart_driver_install, uart_set_baudrate};

    // SAFETY: called once at boot before any other UART0 user.
    unsafe {
        esp!(uart_driver_install(CONSOLE_UART, 256, 0, 0, core::ptr::null_mut(), 0))?;
        esp!(uart_set_baudrate(CONSOLE_UART, pins::UART_BAUDRATE))?;
        esp_vfs_dev_uart_use_driver(CONSOLE_UART);
    }
    Ok(())
}
