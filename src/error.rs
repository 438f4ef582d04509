//! Unified error types for the irrigation firmware.
//!
//! Every subsystem has its own small `Copy` error enum; all of them convert
//! into the top-level [`Error`] so the control loop and the binary entry point
//! can handle failures uniformly.  None of these are fatal in steady state:
//! the control loop degrades to "do nothing" rather than halting.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// The temperature/humidity sensor could not be read.
    Sensor(SensorError),
    /// The real-time clock could not be read or returned garbage.
    Clock(ClockError),
    /// The character display rejected a write.
    Display(DisplayError),
    /// Fuzzy engine misconfiguration.
    Fuzzy(FuzzyError),
    /// Configuration is invalid.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Clock(e) => write!(f, "clock: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Fuzzy(e) => write!(f, "fuzzy: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor never pulled the line low after the start signal.
    NoResponse,
    /// A bit transition did not arrive within its timeout.
    Timeout,
    /// The frame checksum did not match.
    ChecksumMismatch,
    /// GPIO read or write failed.
    Gpio,
    /// The decoded value is NaN or outside the sensor's physical range.
    InvalidReading,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResponse => write!(f, "no response"),
            Self::Timeout => write!(f, "bit timeout"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
            Self::Gpio => write!(f, "GPIO access failed"),
            Self::InvalidReading => write!(f, "unreadable frame"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Clock errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// I2C transfer to the RTC failed.
    Bus,
    /// Register contents do not form a valid calendar date.
    InvalidDateTime,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "RTC bus error"),
            Self::InvalidDateTime => write!(f, "invalid date/time"),
        }
    }
}

impl std::error::Error for ClockError {}

impl From<ClockError> for Error {
    fn from(e: ClockError) -> Self {
        Self::Clock(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// A GPIO write on the LCD bus failed.
    Bus,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "LCD bus write failed"),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Fuzzy engine errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FuzzyError {
    /// Breakpoints are not finite or not ordered `a <= b <= c <= d`.
    InvalidBreakpoints { a: f32, b: f32, c: f32, d: f32 },
    /// No variable with this id is registered.
    UnknownVariable(u8),
    /// A rule references a set index the variable does not have.
    UnknownSet { variable: u8, index: u8 },
    /// A fixed-capacity table is full.
    CapacityExceeded,
    /// The defuzzification resolution is too small to integrate.
    InvalidResolution(usize),
}

impl fmt::Display for FuzzyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBreakpoints { a, b, c, d } => {
                write!(f, "invalid breakpoints ({a}, {b}, {c}, {d})")
            }
            Self::UnknownVariable(id) => write!(f, "unknown variable {id}"),
            Self::UnknownSet { variable, index } => {
                write!(f, "variable {variable} has no set {index}")
            }
            Self::CapacityExceeded => write!(f, "capacity exceeded"),
            Self::InvalidResolution(n) => write!(f, "resolution {n} too small"),
        }
    }
}

impl std::error::Error for FuzzyError {}

impl From<FuzzyError> for Error {
    fn from(e: FuzzyError) -> Self {
        Self::Fuzzy(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
