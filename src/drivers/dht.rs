//! DHT11 / DHT22 single-wire temperature & humidity sensor.
//!
//! ```text
//!  host  ▔▔╲▁▁▁▁ 18 ms ▁▁▁╱▔▔ release
//!  dht          ╲▁ 80 µs ▁╱▔ 80 µs ▔╲ bit0 … bit39
//!  bit:  ▁ 50 µs ▁╱▔ 26 µs ▔╲  = 0
//!        ▁ 50 µs ▁╱▔ 70 µs ▔╲  = 1
//! ```
//!
//! 40 bits MSB first: humidity (2 bytes), temperature (2 bytes), checksum.
//! Pulse widths are measured by polling the line in 1 µs steps, so the
//! driver only needs `embedded-hal` pin and delay traits.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::SensorModel;
use crate::error::SensorError;

/// Upper bound for any single line level during the transfer.
const LEVEL_TIMEOUT_US: u32 = 100;
/// A high pulse longer than this is a `1` bit.
const BIT_THRESHOLD_US: u32 = 40;
const FRAME_BYTES: usize = 5;

/// Decoded, range-checked sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

pub struct DhtSensor<P, D> {
    pin: P,
    delay: D,
    model: SensorModel,
}

impl<P, D> DhtSensor<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// `pin` must be open-drain with a pull-up.
    pub fn new(mut pin: P, delay: D, model: SensorModel) -> Self {
        let _ = pin.set_high();
        Self { pin, delay, model }
    }

    pub fn model(&self) -> SensorModel {
        self.model
    }

    /// Full transaction: start signal, handshake, 40 bits, decode.
    pub fn read(&mut self) -> Result<Measurement, SensorError> {
        let frame = self.read_frame()?;
        decode_frame(self.model, &frame)
    }

    /// Raw 5-byte frame, checksum not yet verified.
    pub fn read_frame(&mut self) -> Result<[u8; FRAME_BYTES], SensorError> {
        self.start_signal()?;

        // Handshake: line still high from the pull-up, then 80 µs low,
        // then 80 µs high.
        self.wait_while(true).map_err(|_| SensorError::NoResponse)?;
        self.wait_while(false).map_err(|_| SensorError::NoResponse)?;
        self.wait_while(true).map_err(|_| SensorError::NoResponse)?;

        let mut frame = [0u8; FRAME_BYTES];
        for bit in 0..FRAME_BYTES * 8 {
            self.wait_while(false)?;
            let high_us = self.wait_while(true)?;
            if high_us > BIT_THRESHOLD_US {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    fn start_signal(&mut self) -> Result<(), SensorError> {
        let hold_ms = match self.model {
            SensorModel::Dht11 => 18,
            SensorModel::Dht22 => 2,
        };
        self.pin.set_low().map_err(|_| SensorError::Gpio)?;
        self.delay.delay_ms(hold_ms);
        self.pin.set_high().map_err(|_| SensorError::Gpio)?;
        self.delay.delay_us(30);
        Ok(())
    }

    /// Poll until the line leaves `high`; returns the µs spent waiting.
    fn wait_while(&mut self, high: bool) -> Result<u32, SensorError> {
        let mut elapsed = 0;
        while self.pin.is_high().map_err(|_| SensorError::Gpio)? == high {
            if elapsed >= LEVEL_TIMEOUT_US {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }
}

/// Verify the checksum and convert a raw frame.
pub fn decode_frame(model: SensorModel, frame: &[u8; FRAME_BYTES]) -> Result<Measurement, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let (humidity_pct, temperature_c) = match model {
        SensorModel::Dht11 => {
            let humidity = f32::from(frame[0]) + f32::from(frame[1]) * 0.1;
            let magnitude = f32::from(frame[2]) + f32::from(frame[3] & 0x7F) * 0.1;
            let temperature = if frame[3] & 0x80 != 0 { -magnitude } else { magnitude };
            (humidity, temperature)
        }
        SensorModel::Dht22 => {
            let humidity = f32::from(u16::from_be_bytes([frame[0], frame[1]])) / 10.0;
            let magnitude = f32::from(u16::from_be_bytes([frame[2] & 0x7F, frame[3]])) / 10.0;
            let temperature = if frame[2] & 0x80 != 0 { -magnitude } else { magnitude };
            (humidity, temperature)
        }
    };

    if !(0.0..=100.0).contains(&humidity_pct) || !(-40.0..=80.0).contains(&temperature_c) {
        return Err(SensorError::InvalidReading);
    }
    Ok(Measurement {
        temperature_c,
        humidity_pct,
    })
}

/// Build a frame with a valid checksum (tests and fuzzing).
pub fn encode_checksum(payload: [u8; 4]) -> [u8; FRAME_BYTES] {
    let sum = payload.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    [payload[0], payload[1], payload[2], payload[3], sum]
}
