//! Mutable state of the control loop.
//!
//! Owned exclusively by [`AppService`](super::service::AppService) and
//! touched once per tick; everything else sees it through [`StatusSnapshot`].

use crate::app::ports::Reading;
use crate::scheduler::{IntervalTimer, RelayTimer};

#[derive(Debug, Clone)]
pub struct ScheduleState {
    /// Sensor sampling cadence.
    pub sample_timer: IntervalTimer,
    /// Display refresh cadence.
    pub display_timer: IntervalTimer,
    /// Most recent valid reading, `None` until the first good sample.
    /// Kept across failures for inspection; the window never commits from it
    /// while `sample_valid` is false.
    pub last_reading: Option<Reading>,
    /// Whether the latest sample succeeded.
    pub sample_valid: bool,
    /// Duration previewed from the latest sample (display only).
    pub derived_minutes: f32,
    /// Duration committed by the last watering window (drives the relay).
    pub active_minutes: f32,
    pub relay: RelayTimer,
    /// What the relay output was last commanded to.
    pub relay_on: bool,
}

impl ScheduleState {
    pub fn new(sample_interval_ms: u32, display_interval_ms: u32, start_ms: u32) -> Self {
        Self {
            sample_timer: IntervalTimer::new(sample_interval_ms, start_ms),
            display_timer: IntervalTimer::new(display_interval_ms, start_ms),
            last_reading: None,
            sample_valid: false,
            derived_minutes: 0.0,
            active_minutes: 0.0,
            relay: RelayTimer::new(),
            relay_on: false,
        }
    }

    /// The last reading, but only while the sensor is healthy.
    pub fn current_reading(&self) -> Option<Reading> {
        if self.sample_valid { self.last_reading } else { None }
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            reading: self.current_reading(),
            derived_minutes: self.derived_minutes,
            active_minutes: self.active_minutes,
            relay_on: self.relay_on,
        }
    }
}

/// Read-only view of the committed state, used by the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    /// `None` when the latest sample failed.
    pub reading: Option<Reading>,
    pub derived_minutes: f32,
    pub active_minutes: f32,
    pub relay_on: bool,
}

impl StatusSnapshot {
    /// The duration worth showing: the committed one while watering,
    /// otherwise the latest preview.
    pub fn display_minutes(&self) -> f32 {
        if self.relay_on {
            self.active_minutes
        } else {
            self.derived_minutes
        }
    }
}
