//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder).

use crate::clock::DateTime;
use crate::error::{ClockError, SensorError};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The control loop has started; the relay is off.
    Started,

    /// A valid sample was taken.
    SampleTaken { temperature_c: f32, humidity_pct: f32 },

    /// The sensor could not be read; the display falls back to `--.-`.
    SampleFailed(SensorError),

    /// Inference re-ran on a fresh sample (display only, relay untouched).
    PreviewComputed { minutes: f32 },

    /// The watering window committed a new duration.
    WateringArmed { at: DateTime, minutes: f32 },

    /// The relay output changed.
    RelayChanged { on: bool },

    /// The RTC could not be read this tick.
    ClockFailed(ClockError),
}
