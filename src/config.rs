//! System configuration parameters
//!
//! All tunable parameters for the irrigation controller.  Nothing is
//! persisted: the firmware boots from [`SystemConfig::default`], optionally
//! with a different [`BoardProfile`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins;

/// Which single-wire humidity sensor is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorModel {
    /// 1 °C / 1 %RH resolution, integer frame.
    Dht11,
    /// 0.1 °C / 0.1 %RH resolution, 16-bit frame.
    Dht22,
}

/// Known board wirings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardKind {
    LcdShield,
    Bench,
}

/// Pin assignments and sensor model for one board wiring.
///
/// The firmware historically shipped as two copy-pasted programs that only
/// differed in this data; both wirings live here as presets instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardProfile {
    pub kind: BoardKind,
    pub sensor_model: SensorModel,
    pub sensor_gpio: i32,
    pub relay_gpio: i32,
    /// LCD register-select, enable, then D4..D7.
    pub lcd_gpios: [i32; 6],
    pub i2c_sda_gpio: i32,
    pub i2c_scl_gpio: i32,
}

impl BoardProfile {
    /// 16x2 LCD keypad shield build.
    pub const fn lcd_shield() -> Self {
        Self {
            kind: BoardKind::LcdShield,
            sensor_model: SensorModel::Dht11,
            sensor_gpio: pins::SHIELD_SENSOR_GPIO,
            relay_gpio: pins::SHIELD_RELAY_GPIO,
            lcd_gpios: pins::SHIELD_LCD_GPIOS,
            i2c_sda_gpio: pins::I2C_SDA_GPIO,
            i2c_scl_gpio: pins::I2C_SCL_GPIO,
        }
    }

    /// Breadboard build with a discretely wired LCD.
    pub const fn bench() -> Self {
        Self {
            kind: BoardKind::Bench,
            sensor_model: SensorModel::Dht22,
            sensor_gpio: pins::BENCH_SENSOR_GPIO,
            relay_gpio: pins::BENCH_RELAY_GPIO,
            lcd_gpios: pins::BENCH_LCD_GPIOS,
            i2c_sda_gpio: pins::I2C_SDA_GPIO,
            i2c_scl_gpio: pins::I2C_SCL_GPIO,
        }
    }
}

impl Default for BoardProfile {
    fn default() -> Self {
        Self::lcd_shield()
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Sensor sampling interval (milliseconds)
    pub sample_interval_ms: u32,
    /// Display refresh interval (milliseconds)
    pub display_interval_ms: u32,
    /// Sleep between control loop iterations (milliseconds)
    pub loop_interval_ms: u32,

    // --- Watering schedule ---
    /// First hour of the daily watering range (odd hours only fire)
    pub first_hour: u8,
    /// Last hour of the daily watering range, inclusive
    pub last_hour: u8,
    /// Seconds after HH:00:00 during which the window is open
    pub window_base_secs: u8,
    /// Extra window seconds granted when the last sample was valid
    pub window_valid_extension_secs: u8,
    /// Re-run inference on every valid sample to preview the duration
    pub preview_on_sample: bool,

    // --- Inference ---
    /// Sample points used for centroid integration over the output domain
    pub defuzz_samples: usize,

    // --- Console ---
    /// How long the boot prompt waits for a debug-mode answer (milliseconds)
    pub prompt_timeout_ms: u32,
    /// Per-line read timeout inside the diagnostic session (milliseconds)
    pub diagnostic_timeout_ms: u32,

    // --- Hardware ---
    pub board: BoardProfile,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            sample_interval_ms: 5000, // 0.2 Hz
            display_interval_ms: 1000, // 1 Hz
            loop_interval_ms: 10,

            // Schedule: 07:00, 09:00, 11:00, 13:00, 15:00
            first_hour: 7,
            last_hour: 15,
            window_base_secs: 5,
            window_valid_extension_secs: 5,
            preview_on_sample: true,

            // Inference
            defuzz_samples: 1000,

            // Console
            prompt_timeout_ms: 1000,
            diagnostic_timeout_ms: 30_000,

            board: BoardProfile::default(),
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("sample_interval_ms must be > 0"));
        }
        if self.display_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("display_interval_ms must be > 0"));
        }
        if self.first_hour > 23 || self.last_hour > 23 {
            return Err(ConfigError::ValidationFailed("hours must be 0-23"));
        }
        if self.first_hour > self.last_hour {
            return Err(ConfigError::ValidationFailed("first_hour > last_hour"));
        }
        if u16::from(self.window_base_secs) + u16::from(self.window_valid_extension_secs) > 59 {
            return Err(ConfigError::ValidationFailed("window must close within the minute"));
        }
        if self.defuzz_samples < 2 {
            return Err(ConfigError::ValidationFailed("defuzz_samples must be >= 2"));
        }
        Ok(())
    }
}
