//! Watering relay (active HIGH).
//!
//! A dumb actuator: the relay timer in the scheduler decides, this driver
//! only switches the pin and remembers what it last wrote.

use embedded_hal::digital::OutputPin;

pub struct RelayDriver<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Takes the pin and drives it low immediately.
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self { pin, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), P::Error> {
        if on {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
