//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensor, RTC, LCD, relay, console, event sinks) implement
//! these traits.  The [`AppService`](super::service::AppService) consumes them
//! via generics, so the domain core never touches hardware directly.

use crate::clock::DateTime;
use crate::error::{ClockError, DisplayError, SensorError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One successful climate sample.  Never carries NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl Reading {
    /// Reject non-finite values so they never reach the inference engine.
    pub fn new(temperature_c: f32, humidity_pct: f32) -> Result<Self, SensorError> {
        if temperature_c.is_finite() && humidity_pct.is_finite() {
            Ok(Self {
                temperature_c,
                humidity_pct,
            })
        } else {
            Err(SensorError::InvalidReading)
        }
    }
}

/// Read-side port: the domain calls this to obtain climate data.
pub trait SensorPort {
    fn read(&mut self) -> Result<Reading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: RTC → domain)
// ───────────────────────────────────────────────────────────────

/// Epoch seconds come from [`DateTime::to_unix`] on the same reading, so
/// the window and the relay timer always agree on the instant.
pub trait ClockPort {
    /// Current calendar date/time.
    fn now(&mut self) -> Result<DateTime, ClockError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character LCD)
// ───────────────────────────────────────────────────────────────

/// Two fixed-width lines, 16 columns each.
pub trait DisplayPort {
    fn render(&mut self, line0: &str, line1: &str) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait ActuatorPort {
    /// Energise (`true`) or release the watering relay.
    fn set_relay(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Console port (driven adapter: domain ↔ serial line)
// ───────────────────────────────────────────────────────────────

/// Longest console input line kept; the rest is dropped.
pub const CONSOLE_LINE_CAPACITY: usize = 64;

pub type ConsoleLine = heapless::String<CONSOLE_LINE_CAPACITY>;

/// Line-oriented text console used by the diagnostic mode.
pub trait ConsolePort {
    /// Block up to `timeout_ms` for one line.  `None` on timeout or when
    /// the input is closed.  The trailing newline is stripped.
    fn read_line(&mut self, timeout_ms: u32) -> Option<ConsoleLine>;

    fn write_line(&mut self, line: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
