//! Application service, the hexagonal core.
//!
//! [`AppService`] owns the watering planner, the daily window and the loop
//! state.  All I/O flows through port traits injected at call sites, making
//! the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort  ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  ClockPort   ──▶ │      AppService        │
//! ActuatorPort ◀── │ sample · window · relay│ ──▶ DisplayPort
//!                  └────────────────────────┘
//! ```

use log::{info, warn};

use crate::clock::DateTime;
use crate::config::SystemConfig;
use crate::control::WateringPlanner;
use crate::error::Error;
use crate::scheduler::WateringWindow;

use super::context::Peripherals;
use super::events::AppEvent;
use super::ports::{ActuatorPort, ClockPort, DisplayPort, EventSink, Reading, SensorPort};
use super::screen;
use super::state::{ScheduleState, StatusSnapshot};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    planner: WateringPlanner,
    window: WateringWindow,
    state: ScheduleState,
    tick_count: u64,
}

impl AppService {
    /// Validate the configuration and build the inference engine.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Result<Self, Error> {
        config.validate()?;
        let planner = WateringPlanner::new(config.defuzz_samples)?;
        let window = WateringWindow::new(
            config.first_hour,
            config.last_hour,
            config.window_base_secs,
            config.window_valid_extension_secs,
        );
        let state = ScheduleState::new(config.sample_interval_ms, config.display_interval_ms, 0);
        Ok(Self {
            config,
            planner,
            window,
            state,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force the relay off, show the banner and restart every interval
    /// from `now_ms`.
    pub fn start<S, C, D, A>(
        &mut self,
        now_ms: u32,
        periph: &mut Peripherals<S, C, D, A>,
        sink: &mut impl EventSink,
    ) where
        S: SensorPort,
        C: ClockPort,
        D: DisplayPort,
        A: ActuatorPort,
    {
        self.state = ScheduleState::new(
            self.config.sample_interval_ms,
            self.config.display_interval_ms,
            now_ms,
        );
        periph.relay.set_relay(false);

        let (line0, line1) = screen::splash();
        if let Err(e) = periph.display.render(&line0, &line1) {
            warn!("Display: splash failed: {}", e);
        }

        sink.emit(&AppEvent::Started);
        info!(
            "AppService started: sample every {} ms, odd hours {:02}..={:02}",
            self.config.sample_interval_ms, self.config.first_hour, self.config.last_hour
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One non-blocking pass: sample → window → relay → display.
    ///
    /// Each stage only sees values committed by the stages before it in the
    /// same tick.
    pub fn tick<S, C, D, A>(
        &mut self,
        now_ms: u32,
        periph: &mut Peripherals<S, C, D, A>,
        sink: &mut impl EventSink,
    ) where
        S: SensorPort,
        C: ClockPort,
        D: DisplayPort,
        A: ActuatorPort,
    {
        self.tick_count += 1;

        // 1. Sensor sampling
        if self.state.sample_timer.due(now_ms) {
            self.sample(&mut periph.sensor, sink);
        }

        // One RTC read per tick keeps window, relay and display consistent.
        let now = match periph.clock.now() {
            Ok(dt) => Some(dt),
            Err(e) => {
                warn!("Clock read failed: {}", e);
                sink.emit(&AppEvent::ClockFailed(e));
                None
            }
        };

        // 2. Scheduled inference window.  Only a fresh valid sample commits;
        // a failed one leaves the slot open for a recovery within the window.
        if let (Some(dt), Some(reading)) = (now, self.state.current_reading()) {
            if self.window.try_fire(&dt, true) {
                self.commit_watering(&dt, reading, sink);
            }
        }

        // 3. Relay
        let relay_on = now.is_some_and(|dt| self.state.relay.is_on(dt.to_unix()));
        if relay_on != self.state.relay_on {
            periph.relay.set_relay(relay_on);
            self.state.relay_on = relay_on;
            info!("Relay {}", if relay_on { "ON" } else { "OFF" });
            sink.emit(&AppEvent::RelayChanged { on: relay_on });
        }

        // 4. Display
        if self.state.display_timer.due(now_ms) {
            let line0 = match now {
                Some(dt) => screen::datetime_line(&dt),
                None => screen::clock_error_line(),
            };
            let line1 = screen::status_line(&self.state.snapshot());
            if let Err(e) = periph.display.render(&line0, &line1) {
                warn!("Display: refresh failed: {}", e);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn snapshot(&self) -> StatusSnapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn window(&self) -> &WateringWindow {
        &self.window
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn sample(&mut self, sensor: &mut impl SensorPort, sink: &mut impl EventSink) {
        match sensor.read() {
            Ok(reading) => {
                self.state.last_reading = Some(reading);
                self.state.sample_valid = true;
                sink.emit(&AppEvent::SampleTaken {
                    temperature_c: reading.temperature_c,
                    humidity_pct: reading.humidity_pct,
                });

                if self.config.preview_on_sample {
                    let minutes = self
                        .planner
                        .duration_minutes(reading.temperature_c, reading.humidity_pct);
                    self.state.derived_minutes = minutes;
                    sink.emit(&AppEvent::PreviewComputed { minutes });
                }
            }
            Err(e) => {
                // Derived and active durations keep their prior values; the
                // display shows the sentinel until the sensor recovers.
                self.state.sample_valid = false;
                warn!("Sensor read failed: {}", e);
                sink.emit(&AppEvent::SampleFailed(e));
            }
        }
    }

    fn commit_watering(&mut self, now: &DateTime, reading: Reading, sink: &mut impl EventSink) {
        let minutes = self
            .planner
            .duration_minutes(reading.temperature_c, reading.humidity_pct);
        self.state.active_minutes = minutes;
        self.state.derived_minutes = minutes;
        self.state.relay.arm(now.to_unix(), minutes);
        info!(
            "Watering armed at {}: {:.1} °C, {:.1} %RH -> {:.2} min",
            now, reading.temperature_c, reading.humidity_pct, minutes
        );
        sink.emit(&AppEvent::WateringArmed { at: *now, minutes });
    }
}
