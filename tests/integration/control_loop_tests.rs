//! AppService control loop against a simulated clock.
//!
//! Each simulated tick advances uptime by 1000 ms and the RTC by 1 s.

use fuzzyirrigation::app::events::AppEvent;
use fuzzyirrigation::app::service::AppService;
use fuzzyirrigation::app::screen::SENTINEL;
use fuzzyirrigation::clock::DateTime;
use fuzzyirrigation::config::SystemConfig;
use fuzzyirrigation::error::{ConfigError, Error, SensorError};

use super::mock_hw::{MockPeripherals, MockSensor, RecordingSink, peripherals};

const TICK_MS: u32 = 1000;

struct Rig {
    service: AppService,
    periph: MockPeripherals,
    sink: RecordingSink,
    uptime_ms: u32,
    /// RTC epoch at which each relay transition happened.
    transitions: Vec<(u64, bool)>,
}

impl Rig {
    fn new(config: SystemConfig, sensor: MockSensor, start: DateTime) -> Self {
        let mut rig = Self {
            service: AppService::new(config).unwrap(),
            periph: peripherals(sensor, start),
            sink: RecordingSink::default(),
            uptime_ms: 0,
            transitions: Vec::new(),
        };
        rig.service.start(0, &mut rig.periph, &mut rig.sink);
        rig
    }

    fn tick(&mut self) {
        self.uptime_ms += TICK_MS;
        self.periph.clock.advance(1);
        let before = self.periph.relay.calls.len();
        self.service.tick(self.uptime_ms, &mut self.periph, &mut self.sink);
        for on in &self.periph.relay.calls[before..] {
            self.transitions.push((self.periph.clock.epoch, *on));
        }
    }

    fn run_secs(&mut self, secs: u32) {
        for _ in 0..secs {
            self.tick();
        }
    }

    fn run_until(&mut self, dt: DateTime) {
        while self.periph.clock.epoch < dt.to_unix() {
            self.tick();
        }
    }
}

fn dt(h: u8, m: u8, s: u8) -> DateTime {
    DateTime::new(2024, 6, 1, h, m, s).unwrap()
}

#[test]
fn start_forces_relay_off_and_shows_splash() {
    let rig = Rig::new(SystemConfig::default(), MockSensor::steady(20.0, 50.0), dt(8, 0, 0));
    assert_eq!(rig.periph.relay.calls, vec![false]);
    assert_eq!(rig.sink.events, vec![AppEvent::Started]);
    let (line0, _) = rig.periph.display.last().unwrap();
    assert!(line0.contains("FUZZY"));
}

#[test]
fn relay_runs_exactly_the_committed_duration() {
    let mut rig = Rig::new(SystemConfig::default(), MockSensor::steady(35.0, 95.0), dt(8, 59, 50));
    rig.run_until(dt(10, 0, 0));

    let armed = rig.sink.armed();
    assert_eq!(armed.len(), 1, "one commit per slot");
    let (at, minutes) = armed[0];
    assert_eq!(at, dt(9, 0, 0));
    assert!(minutes > 12.0 && minutes <= 15.0, "got {minutes}");

    let secs = u64::from((minutes * 60.0).round() as u32);
    let arm = at.to_unix();
    // ON through the last second inclusive, OFF one second later.
    assert_eq!(rig.transitions, vec![(arm, true), (arm + secs + 1, false)]);
    assert_eq!(rig.service.snapshot().active_minutes, minutes);
}

#[test]
fn relay_stays_off_outside_watering_hours() {
    let mut rig = Rig::new(SystemConfig::default(), MockSensor::steady(35.0, 95.0), dt(15, 59, 50));
    rig.run_until(dt(18, 0, 30));
    assert!(rig.sink.armed().is_empty());
    assert!(rig.transitions.is_empty());
    assert_eq!(rig.periph.relay.calls, vec![false]);
}

#[test]
fn every_odd_hour_commits_once() {
    let mut rig = Rig::new(SystemConfig::default(), MockSensor::steady(22.0, 60.0), dt(6, 59, 0));
    rig.run_until(dt(16, 0, 0));
    let hours: Vec<u8> = rig.sink.armed().iter().map(|(at, _)| at.hour).collect();
    assert_eq!(hours, vec![7, 9, 11, 13, 15]);
}

#[test]
fn no_reading_means_no_watering() {
    let mut rig = Rig::new(SystemConfig::default(), MockSensor::failing(), dt(8, 59, 40));
    rig.run_until(dt(9, 1, 0));

    assert!(rig.sink.armed().is_empty());
    assert!(!rig.periph.relay.is_on());
    assert!(rig.sink.count(|e| matches!(e, AppEvent::SampleFailed(SensorError::Timeout))) >= 1);

    let (_, line1) = rig.periph.display.last().unwrap();
    assert!(line1.starts_with(&format!("{SENTINEL} {SENTINEL}")), "got {line1:?}");
    assert_eq!(line1.len(), 16);
}

#[test]
fn sensor_failure_keeps_watering_going() {
    let mut rig = Rig::new(SystemConfig::default(), MockSensor::steady(35.0, 95.0), dt(8, 59, 50));
    rig.run_until(dt(9, 0, 30));
    assert!(rig.periph.relay.is_on());

    rig.periph.sensor.steady = Err(SensorError::ChecksumMismatch);
    rig.run_secs(60);
    assert!(rig.periph.relay.is_on(), "prior relay state persists");
    assert!(rig.service.snapshot().reading.is_none());
    assert!(rig.service.state().last_reading.is_some());
}

#[test]
fn stale_reading_never_arms_the_relay() {
    let mut sensor = MockSensor::steady(35.0, 95.0);
    sensor.steady = Err(SensorError::NoResponse);
    sensor.script.push_back(sensor_ok(35.0, 95.0));
    // First sample (07:01:05) succeeds, every later one fails.
    let mut rig = Rig::new(SystemConfig::default(), sensor, dt(7, 1, 0));
    rig.run_until(dt(9, 0, 30));

    assert!(!rig.service.state().sample_valid);
    assert!(rig.service.state().last_reading.is_some());
    assert!(rig.sink.armed().is_empty());
    assert!(!rig.periph.relay.is_on());
    assert_eq!(rig.service.snapshot().active_minutes, 0.0);
}

#[test]
fn recovery_inside_the_window_still_commits() {
    let mut sensor = MockSensor::steady(35.0, 95.0);
    sensor.script.push_back(Err(SensorError::NoResponse));
    sensor.script.push_back(Err(SensorError::NoResponse));
    // Samples at 08:59:55 and 09:00:00 fail, 09:00:05 succeeds.
    let mut rig = Rig::new(SystemConfig::default(), sensor, dt(8, 59, 50));
    rig.run_until(dt(9, 0, 4));
    assert!(rig.sink.armed().is_empty(), "failed sample must not consume the slot");

    rig.run_until(dt(9, 1, 0));
    let armed = rig.sink.armed();
    assert_eq!(armed.len(), 1);
    assert_eq!(armed[0].0, dt(9, 0, 5));
    assert!(rig.periph.relay.is_on());
}

#[test]
fn clock_failure_turns_relay_off_until_recovery() {
    let mut rig = Rig::new(SystemConfig::default(), MockSensor::steady(35.0, 95.0), dt(8, 59, 50));
    rig.run_until(dt(9, 1, 0));
    assert!(rig.periph.relay.is_on());

    rig.periph.clock.fail = true;
    rig.tick();
    assert!(!rig.periph.relay.is_on());
    assert!(rig.sink.count(|e| matches!(e, AppEvent::ClockFailed(_))) == 1);

    rig.periph.clock.fail = false;
    rig.tick();
    assert!(rig.periph.relay.is_on(), "still inside the committed duration");
}

#[test]
fn window_and_relay_share_one_clock_read_per_tick() {
    let mut rig = Rig::new(SystemConfig::default(), MockSensor::steady(35.0, 95.0), dt(8, 59, 50));
    rig.run_until(dt(9, 0, 10));
    assert_eq!(rig.periph.clock.reads as u64, rig.service.tick_count());
    assert!(rig.periph.relay.is_on());
}

#[test]
fn clock_set_backwards_releases_relay() {
    let mut rig = Rig::new(SystemConfig::default(), MockSensor::steady(35.0, 95.0), dt(8, 59, 50));
    rig.run_until(dt(9, 0, 20));
    assert!(rig.periph.relay.is_on());

    rig.periph.clock.epoch = dt(8, 30, 0).to_unix();
    rig.tick();
    assert!(!rig.periph.relay.is_on());
}

#[test]
fn preview_updates_display_without_touching_relay() {
    let mut rig = Rig::new(SystemConfig::default(), MockSensor::steady(15.0, 40.0), dt(8, 0, 0));
    rig.run_secs(6);

    let snap = rig.service.snapshot();
    assert!(snap.derived_minutes > 3.0 && snap.derived_minutes < 5.0);
    assert_eq!(snap.active_minutes, 0.0);
    assert_eq!(rig.periph.relay.calls, vec![false]);
    assert!(rig.sink.count(|e| matches!(e, AppEvent::PreviewComputed { .. })) == 1);

    let (line0, line1) = rig.periph.display.last().unwrap();
    assert_eq!(line0, "01-06-2024 08:00");
    assert_eq!(line1, "15.0 40.0   4.3 ");
}

#[test]
fn preview_can_be_disabled() {
    let config = SystemConfig {
        preview_on_sample: false,
        ..Default::default()
    };
    let mut rig = Rig::new(config, MockSensor::steady(15.0, 40.0), dt(8, 0, 0));
    rig.run_secs(11);
    assert_eq!(rig.service.snapshot().derived_minutes, 0.0);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::PreviewComputed { .. })), 0);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::SampleTaken { .. })), 2);
}

#[test]
fn sampling_and_display_follow_their_intervals() {
    let mut rig = Rig::new(SystemConfig::default(), MockSensor::steady(20.0, 50.0), dt(8, 0, 0));
    rig.run_secs(20);
    assert_eq!(rig.periph.sensor.reads, 4);
    // Splash plus one frame per second.
    assert_eq!(rig.periph.display.frames.len(), 21);
    assert_eq!(rig.service.tick_count(), 20);
}

#[test]
fn display_failure_is_not_fatal() {
    let mut rig = Rig::new(SystemConfig::default(), MockSensor::steady(35.0, 95.0), dt(8, 59, 50));
    rig.periph.display.fail = true;
    rig.run_until(dt(9, 0, 5));
    assert!(rig.periph.relay.is_on());
}

#[test]
fn invalid_config_is_rejected() {
    let config = SystemConfig {
        first_hour: 20,
        last_hour: 3,
        ..Default::default()
    };
    assert_eq!(
        AppService::new(config).err(),
        Some(Error::Config(ConfigError::ValidationFailed("first_hour > last_hour")))
    );
}

fn sensor_ok(t: f32, h: f32) -> Result<fuzzyirrigation::app::ports::Reading, SensorError> {
    fuzzyirrigation::app::ports::Reading::new(t, h)
}
