//! Mock collaborators for integration tests.
//!
//! Every port gets a recording or scripted fake so tests can drive the
//! control loop with a simulated clock and assert on the full history of
//! relay, display and console traffic.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::i2c::{self, I2c, Operation};

use fuzzyirrigation::app::context::Peripherals;
use fuzzyirrigation::app::events::AppEvent;
use fuzzyirrigation::app::ports::{
    ActuatorPort, ClockPort, ConsoleLine, ConsolePort, DisplayPort, EventSink, Reading, SensorPort,
};
use fuzzyirrigation::clock::DateTime;
use fuzzyirrigation::error::{ClockError, DisplayError, SensorError};

// ── Sensor ────────────────────────────────────────────────────

/// Returns scripted results first, then `steady` forever.
pub struct MockSensor {
    pub script: VecDeque<Result<Reading, SensorError>>,
    pub steady: Result<Reading, SensorError>,
    pub reads: usize,
}

impl MockSensor {
    pub fn steady(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            script: VecDeque::new(),
            steady: Reading::new(temperature_c, humidity_pct),
            reads: 0,
        }
    }

    pub fn failing() -> Self {
        Self {
            script: VecDeque::new(),
            steady: Err(SensorError::Timeout),
            reads: 0,
        }
    }
}

impl SensorPort for MockSensor {
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.reads += 1;
        self.script.pop_front().unwrap_or(self.steady)
    }
}

// ── Clock ─────────────────────────────────────────────────────

/// Simulated RTC holding Unix seconds.
pub struct SimClock {
    pub epoch: u64,
    pub fail: bool,
    pub reads: usize,
}

impl SimClock {
    pub fn at(dt: DateTime) -> Self {
        Self {
            epoch: dt.to_unix(),
            fail: false,
            reads: 0,
        }
    }

    pub fn advance(&mut self, secs: u64) {
        self.epoch += secs;
    }

    pub fn datetime(&self) -> DateTime {
        DateTime::from_unix(self.epoch)
    }
}

impl ClockPort for SimClock {
    fn now(&mut self) -> Result<DateTime, ClockError> {
        self.reads += 1;
        if self.fail {
            Err(ClockError::Bus)
        } else {
            Ok(DateTime::from_unix(self.epoch))
        }
    }
}

// ── Display ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<(String, String)>,
    pub fail: bool,
}

impl MockDisplay {
    pub fn last(&self) -> Option<&(String, String)> {
        self.frames.last()
    }
}

impl DisplayPort for MockDisplay {
    fn render(&mut self, line0: &str, line1: &str) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Bus);
        }
        self.frames.push((line0.to_string(), line1.to_string()));
        Ok(())
    }
}

// ── Relay ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockRelay {
    pub calls: Vec<bool>,
}

impl MockRelay {
    pub fn is_on(&self) -> bool {
        self.calls.last().copied().unwrap_or(false)
    }
}

impl ActuatorPort for MockRelay {
    fn set_relay(&mut self, on: bool) {
        self.calls.push(on);
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn armed(&self) -> Vec<(DateTime, f32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::WateringArmed { at, minutes } => Some((*at, *minutes)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Console ───────────────────────────────────────────────────

/// Each entry answers one `read_line`; `None` simulates a timeout.
/// Once the script runs out, every read times out.
#[derive(Default)]
pub struct ScriptedConsole {
    pub input: VecDeque<Option<&'static str>>,
    pub output: Vec<String>,
    pub timeouts_requested: Vec<u32>,
}

impl ScriptedConsole {
    pub fn with(lines: &[Option<&'static str>]) -> Self {
        Self {
            input: lines.iter().copied().collect(),
            ..Default::default()
        }
    }
}

impl ConsolePort for ScriptedConsole {
    fn read_line(&mut self, timeout_ms: u32) -> Option<ConsoleLine> {
        self.timeouts_requested.push(timeout_ms);
        let line = self.input.pop_front().flatten()?;
        let mut out = ConsoleLine::new();
        out.push_str(line).ok()?;
        Some(out)
    }

    fn write_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}

// ── Simulation rig ────────────────────────────────────────────

pub type MockPeripherals = Peripherals<MockSensor, SimClock, MockDisplay, MockRelay>;

pub fn peripherals(sensor: MockSensor, start: DateTime) -> MockPeripherals {
    Peripherals::new(sensor, SimClock::at(start), MockDisplay::default(), MockRelay::default())
}

// ── embedded-hal fakes ────────────────────────────────────────

/// Delay that returns immediately; one `delay_us(1)` is one poll step.
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Output pin recording every level written.
#[derive(Default)]
pub struct RecordingPin {
    pub writes: Vec<bool>,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.writes.push(true);
        Ok(())
    }
}

/// Open-drain line whose reads follow a script of `(level, polls)` runs,
/// then stay high (pull-up).
pub struct ScriptedLine {
    runs: VecDeque<(bool, u32)>,
    pub writes: Vec<bool>,
}

impl ScriptedLine {
    pub fn new(runs: Vec<(bool, u32)>) -> Self {
        Self {
            runs: runs.into(),
            writes: Vec::new(),
        }
    }

    /// Level sequence a DHT sends for `frame`, starting right after the
    /// host releases the line.
    pub fn dht_frame(frame: [u8; 5]) -> Self {
        let mut runs = vec![(true, 20), (false, 80), (true, 80)];
        for byte in frame {
            for bit in (0..8).rev() {
                let one = byte & (1 << bit) != 0;
                runs.push((false, 50));
                runs.push((true, if one { 70 } else { 26 }));
            }
        }
        runs.push((false, 50));
        Self::new(runs)
    }
}

impl ErrorType for ScriptedLine {
    type Error = Infallible;
}

impl InputPin for ScriptedLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        while let Some((level, left)) = self.runs.front_mut() {
            if *left > 0 {
                *left -= 1;
                return Ok(*level);
            }
            self.runs.pop_front();
        }
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

impl OutputPin for ScriptedLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.writes.push(true);
        Ok(())
    }
}

/// DS3231 register file behind an `I2c` bus.
pub struct MockRtcBus {
    pub regs: [u8; 19],
    pub pointer: usize,
    pub fail: bool,
}

impl MockRtcBus {
    pub fn new() -> Self {
        Self {
            regs: [0; 19],
            pointer: 0,
            fail: false,
        }
    }
}

impl i2c::ErrorType for MockRtcBus {
    type Error = i2c::ErrorKind;
}

impl I2c for MockRtcBus {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        if self.fail || address != 0x68 {
            return Err(i2c::ErrorKind::NoAcknowledge(i2c::NoAcknowledgeSource::Address));
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if let Some((first, rest)) = bytes.split_first() {
                        self.pointer = usize::from(*first);
                        for b in rest {
                            self.regs[self.pointer % self.regs.len()] = *b;
                            self.pointer += 1;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for b in buf.iter_mut() {
                        *b = self.regs[self.pointer % self.regs.len()];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}
