//! Text layout for the 16×2 character display.
//!
//! ```text
//!  col  0123456789012345
//!  row0 DD-MM-YYYY HH:MM     (colon blanks on odd seconds)
//!  row1 TTTT HHHH DDDDD      (°C, %RH, minutes; "--.-" when unread)
//! ```

use core::fmt::Write;

use heapless::String;

use crate::clock::DateTime;

use super::state::StatusSnapshot;

pub const COLUMNS: usize = 16;

/// One display row, always exactly [`COLUMNS`] characters.
pub type Line = String<COLUMNS>;

/// Shown in place of a temperature or humidity that could not be read.
pub const SENTINEL: &str = "--.-";

/// Pad with spaces or cut to exactly [`COLUMNS`] characters.
pub fn fit(text: &str) -> Line {
    let mut line = Line::new();
    for ch in text.chars() {
        if line.push(ch).is_err() {
            break;
        }
    }
    while line.push(' ').is_ok() {}
    line
}

pub fn datetime_line(now: &DateTime) -> Line {
    let sep = if now.second % 2 == 1 { ' ' } else { ':' };
    let mut buf: String<32> = String::new();
    let _ = write!(
        buf,
        "{:02}-{:02}-{:04} {:02}{}{:02}",
        now.day, now.month, now.year, now.hour, sep, now.minute
    );
    fit(&buf)
}

pub fn status_line(status: &StatusSnapshot) -> Line {
    let mut buf: String<48> = String::new();
    match status.reading {
        Some(r) => {
            let _ = write!(buf, "{:>4.1} {:>4.1}", r.temperature_c, r.humidity_pct);
        }
        None => {
            let _ = write!(buf, "{SENTINEL} {SENTINEL}");
        }
    }
    let _ = write!(buf, " {:>5.1}", status.display_minutes());
    fit(&buf)
}

/// Boot banner.
pub fn splash() -> (Line, Line) {
    (fit("   FUZZY DHT"), fit(concat!("     v", env!("CARGO_PKG_VERSION"))))
}

/// Shown on row 0 when the RTC cannot be read.
pub fn clock_error_line() -> Line {
    fit("RTC ERROR")
}
