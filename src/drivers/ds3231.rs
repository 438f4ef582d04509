//! DS3231 real-time clock over I²C.
//!
//! Timekeeping registers 0x00..=0x06 hold seconds, minutes, hours,
//! day-of-week, date, month/century and year, all BCD.

use embedded_hal::i2c::I2c;

use crate::clock::DateTime;
use crate::error::ClockError;

pub const DS3231_ADDR: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;
const HOUR_12H_FLAG: u8 = 0x40;
const HOUR_PM_FLAG: u8 = 0x20;
const CENTURY_FLAG: u8 = 0x80;

pub struct Ds3231<I> {
    i2c: I,
}

impl<I: I2c> Ds3231<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    pub fn datetime(&mut self) -> Result<DateTime, ClockError> {
        let mut regs = [0u8; 7];
        self.i2c
            .write_read(DS3231_ADDR, &[REG_SECONDS], &mut regs)
            .map_err(|_| ClockError::Bus)?;
        decode_registers(&regs)
    }

    /// Store `dt` in 24-hour mode.
    pub fn set_datetime(&mut self, dt: &DateTime) -> Result<(), ClockError> {
        let regs = encode_registers(dt)?;
        let mut buf = [0u8; 8];
        buf[0] = REG_SECONDS;
        buf[1..].copy_from_slice(&regs);
        self.i2c.write(DS3231_ADDR, &buf).map_err(|_| ClockError::Bus)
    }

    pub fn release(self) -> I {
        self.i2c
    }
}

fn bcd_to_bin(v: u8) -> u8 {
    (v >> 4) * 10 + (v & 0x0F)
}

fn bin_to_bcd(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}

pub fn decode_registers(regs: &[u8; 7]) -> Result<DateTime, ClockError> {
    let second = bcd_to_bin(regs[0] & 0x7F);
    let minute = bcd_to_bin(regs[1] & 0x7F);
    let hour = if regs[2] & HOUR_12H_FLAG != 0 {
        let h12 = bcd_to_bin(regs[2] & 0x1F) % 12;
        if regs[2] & HOUR_PM_FLAG != 0 { h12 + 12 } else { h12 }
    } else {
        bcd_to_bin(regs[2] & 0x3F)
    };
    let day = bcd_to_bin(regs[4] & 0x3F);
    let month = bcd_to_bin(regs[5] & 0x1F);
    let century: u16 = if regs[5] & CENTURY_FLAG != 0 { 2100 } else { 2000 };
    let year = century + u16::from(bcd_to_bin(regs[6]));
    DateTime::new(year, month, day, hour, minute, second)
}

pub fn encode_registers(dt: &DateTime) -> Result<[u8; 7], ClockError> {
    if !dt.is_valid() || !(2000..2200).contains(&dt.year) {
        return Err(ClockError::InvalidDateTime);
    }
    let century = if dt.year >= 2100 { CENTURY_FLAG } else { 0 };
    let yy = (dt.year % 100) as u8;
    // 1970-01-01 was a Thursday; DS3231 day-of-week is 1..=7 with Sunday = 1.
    let weekday = ((dt.to_unix() / 86_400 + 4) % 7) as u8 + 1;
    Ok([
        bin_to_bcd(dt.second),
        bin_to_bcd(dt.minute),
        bin_to_bcd(dt.hour),
        weekday,
        bin_to_bcd(dt.day),
        bin_to_bcd(dt.month) | century,
        bin_to_bcd(yy),
    ])
}
