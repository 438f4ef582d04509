//! GPIO / peripheral pin assignments for the supported board wirings.
//!
//! Single source of truth: [`BoardProfile`](crate::config::BoardProfile)
//! presets reference this module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// LCD keypad shield build
// ---------------------------------------------------------------------------

/// DHT11 single-wire data line (open-drain, external 10 kΩ pull-up).
pub const SHIELD_SENSOR_GPIO: i32 = 2;
/// Relay driver input (active HIGH).
pub const SHIELD_RELAY_GPIO: i32 = 17;
/// HD44780 RS, E, D4, D5, D6, D7.
pub const SHIELD_LCD_GPIOS: [i32; 6] = [8, 9, 4, 5, 6, 7];

// ---------------------------------------------------------------------------
// Bench build
// ---------------------------------------------------------------------------

/// DHT22 single-wire data line.
pub const BENCH_SENSOR_GPIO: i32 = 8;
/// Relay driver input (active HIGH).
pub const BENCH_RELAY_GPIO: i32 = 9;
/// HD44780 RS, E, D4, D5, D6, D7.
pub const BENCH_LCD_GPIOS: [i32; 6] = [12, 11, 4, 5, 6, 7];

// ---------------------------------------------------------------------------
// I²C bus (DS3231 real-time clock)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
/// DS3231 bus speed.
pub const I2C_BAUDRATE_HZ: u32 = 100_000;

// ---------------------------------------------------------------------------
// UART debug console
// ---------------------------------------------------------------------------

pub const UART_BAUDRATE: u32 = 19_200;
