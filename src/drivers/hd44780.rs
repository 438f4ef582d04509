//! HD44780 16×2 character LCD on a 4-bit parallel bus (write-only, R/W tied
//! low).
//!
//! Every byte goes out as two nibbles on D4..D7, latched by a pulse on E.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::DisplayError;

pub const COLUMNS: u8 = 16;
pub const ROWS: u8 = 2;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40];

pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    data: [P; 4],
    delay: D,
}

impl<P, D> Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// `data` is D4, D5, D6, D7.
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        Self { rs, en, data, delay }
    }

    /// Power-on initialisation by instruction (datasheet figure 24).
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);
        self.rs.set_low().map_err(|_| DisplayError::Bus)?;
        self.en.set_low().map_err(|_| DisplayError::Bus)?;

        self.write_nibble(0x03)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03)?;
        self.write_nibble(0x02)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE_INC)
    }

    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        let row = row.min(ROWS - 1);
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col.min(COLUMNS - 1)))
    }

    /// Non-ASCII characters print as `?`.
    pub fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.write_byte(byte, true)?;
        }
        Ok(())
    }

    /// Overwrite one full row.
    pub fn write_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(0, row)?;
        self.write_str(text)
    }

    /// Give back the bus pins and the delay.
    pub fn release(self) -> (P, P, [P; 4], D) {
        (self.rs, self.en, self.data, self.delay)
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.write_byte(cmd, false)
    }

    fn write_byte(&mut self, byte: u8, is_data: bool) -> Result<(), DisplayError> {
        let rs = if is_data { self.rs.set_high() } else { self.rs.set_low() };
        rs.map_err(|_| DisplayError::Bus)?;
        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), DisplayError> {
        for (i, pin) in self.data.iter_mut().enumerate() {
            let res = if nibble & (1 << i) != 0 { pin.set_high() } else { pin.set_low() };
            res.map_err(|_| DisplayError::Bus)?;
        }
        self.en.set_high().map_err(|_| DisplayError::Bus)?;
        self.delay.delay_us(1);
        self.en.set_low().map_err(|_| DisplayError::Bus)?;
        self.delay.delay_us(50);
        Ok(())
    }
}
