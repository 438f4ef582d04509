//! Timing primitives for the cooperative control loop.
//!
//! ```text
//!  uptime ms ──▶ IntervalTimer ───▶ sample / display
//!  RTC h:m:s ──▶ WateringWindow ──▶ commit duration
//!  RTC epoch ──▶ RelayTimer ──────▶ relay on / off
//!                       │
//!                       ▼
//!               AppService.tick()
//! ```
//!
//! None of these block or touch hardware; the caller supplies the time.

use log::{debug, info};

use crate::clock::{DateTime, SlotKey};

// ═══════════════════════════════════════════════════════════════
//  Interval timer
// ═══════════════════════════════════════════════════════════════

/// Fires once every `interval_ms` of a free-running millisecond counter.
///
/// Comparisons use wrapping subtraction, so a `u32` uptime that rolls over
/// after ~49 days keeps working.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTimer {
    interval_ms: u32,
    last_ms: u32,
}

impl IntervalTimer {
    pub const fn new(interval_ms: u32, start_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: start_ms,
        }
    }

    /// `true` (and restarts the interval) when at least `interval_ms` have
    /// elapsed since the last firing.
    pub fn due(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) >= self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn last_ms(&self) -> u32 {
        self.last_ms
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

// ═══════════════════════════════════════════════════════════════
//  Watering window
// ═══════════════════════════════════════════════════════════════

/// The daily schedule on which a new watering duration is committed:
/// odd hours in `[first_hour, last_hour]`, during the first few seconds of
/// minute 0.  Latches per (date, hour) so one slot commits at most once.
#[derive(Debug, Clone)]
pub struct WateringWindow {
    first_hour: u8,
    last_hour: u8,
    base_secs: u8,
    valid_extension_secs: u8,
    last_slot: Option<SlotKey>,
}

impl WateringWindow {
    pub fn new(first_hour: u8, last_hour: u8, base_secs: u8, valid_extension_secs: u8) -> Self {
        Self {
            first_hour,
            last_hour,
            base_secs,
            valid_extension_secs,
            last_slot: None,
        }
    }

    /// Odd hour within the configured daily range.
    pub fn is_watering_hour(&self, hour: u8) -> bool {
        hour % 2 == 1 && (self.first_hour..=self.last_hour).contains(&hour)
    }

    /// Seconds past HH:00:00 the window stays open.  A valid reading widens
    /// it so a slightly late loop iteration still commits.
    pub fn width_secs(&self, sample_valid: bool) -> u8 {
        if sample_valid {
            self.base_secs.saturating_add(self.valid_extension_secs)
        } else {
            self.base_secs
        }
    }

    /// Pure check, ignores the latch.
    pub fn is_open(&self, now: &DateTime, sample_valid: bool) -> bool {
        self.is_watering_hour(now.hour) && now.minute == 0 && now.second <= self.width_secs(sample_valid)
    }

    /// `true` exactly once per open slot.
    pub fn try_fire(&mut self, now: &DateTime, sample_valid: bool) -> bool {
        if !self.is_open(now, sample_valid) {
            return false;
        }
        let slot = now.slot_key();
        if self.last_slot == Some(slot) {
            return false;
        }
        self.last_slot = Some(slot);
        info!("Window: {:02}:00 slot open (sample valid: {})", now.hour, sample_valid);
        true
    }

    /// Hours at which the window can open, in order.
    pub fn hours(&self) -> impl Iterator<Item = u8> + '_ {
        (self.first_hour..=self.last_hour).filter(|h| self.is_watering_hour(*h))
    }
}

// ═══════════════════════════════════════════════════════════════
//  Relay timer
// ═══════════════════════════════════════════════════════════════

/// Wall-clock relay timer.
///
/// ON while a positive duration is armed and `0 <= now - armed_at <=
/// duration_secs`, bounds inclusive.  A clock that reads earlier than the
/// arm time (RTC reset or set backwards) counts as OFF.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayTimer {
    armed_at: Option<u64>,
    /// `None` when the armed duration was zero, negative or non-finite.
    duration_secs: Option<u32>,
}

impl RelayTimer {
    pub const fn new() -> Self {
        Self {
            armed_at: None,
            duration_secs: None,
        }
    }

    /// Arm for `minutes` starting at `epoch_secs`.  Fractional minutes round
    /// to the nearest whole second, so a positive duration under half a
    /// second still waters for the arming second.  Zero, negative or
    /// non-finite durations keep the relay off.
    pub fn arm(&mut self, epoch_secs: u64, minutes: f32) {
        let secs = minutes * 60.0;
        self.duration_secs = (secs.is_finite() && secs > 0.0).then(|| secs.round() as u32);
        self.armed_at = Some(epoch_secs);
        debug!("RelayTimer: armed at {} for {:?} s", epoch_secs, self.duration_secs);
    }

    pub fn disarm(&mut self) {
        self.armed_at = None;
        self.duration_secs = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    pub fn armed_at(&self) -> Option<u64> {
        self.armed_at
    }

    /// Whole seconds armed, `0` when nothing waters.
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs.unwrap_or(0)
    }

    pub fn is_on(&self, now_epoch: u64) -> bool {
        self.elapsed(now_epoch)
            .zip(self.duration_secs)
            .is_some_and(|(elapsed, secs)| elapsed <= u64::from(secs))
    }

    /// Seconds of watering left after `now_epoch`, `0` once expired or on
    /// the last ON second.
    pub fn remaining_secs(&self, now_epoch: u64) -> u32 {
        match (self.elapsed(now_epoch), self.duration_secs) {
            (Some(elapsed), Some(secs)) => u64::from(secs).saturating_sub(elapsed) as u32,
            _ => 0,
        }
    }

    fn elapsed(&self, now_epoch: u64) -> Option<u64> {
        self.armed_at.and_then(|start| now_epoch.checked_sub(start))
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
