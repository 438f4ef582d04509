//! Hardware adapter: bridges the drivers to the domain port traits.
//!
//! Each driver implements exactly one port.  This is the only module that
//! maps driver-level results onto domain types; on the host the same
//! impls run against mock `embedded-hal` pins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::{ActuatorPort, ClockPort, DisplayPort, Reading, SensorPort};
use crate::clock::DateTime;
use crate::drivers::dht::DhtSensor;
use crate::drivers::ds3231::Ds3231;
use crate::drivers::hd44780::Hd44780;
use crate::drivers::relay::RelayDriver;
use crate::error::{ClockError, DisplayError, SensorError};

// ── SensorPort implementation ─────────────────────────────────

impl<P, D> SensorPort for DhtSensor<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read(&mut self) -> Result<Reading, SensorError> {
        let m = DhtSensor::read(self)?;
        Reading::new(m.temperature_c, m.humidity_pct)
    }
}

// ── ClockPort implementation ──────────────────────────────────

impl<I: I2c> ClockPort for Ds3231<I> {
    fn now(&mut self) -> Result<DateTime, ClockError> {
        self.datetime()
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl<P, D> DisplayPort for Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn render(&mut self, line0: &str, line1: &str) -> Result<(), DisplayError> {
        self.write_line(0, line0)?;
        self.write_line(1, line1)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: OutputPin> ActuatorPort for RelayDriver<P> {
    fn set_relay(&mut self, on: bool) {
        if self.set(on).is_err() {
            warn!("Relay: GPIO write failed (wanted {})", if on { "ON" } else { "OFF" });
        }
    }
}
