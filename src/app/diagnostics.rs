//! Diagnostic console mode.
//!
//! Chosen once at boot, before the control loop starts.  The operator types
//! a temperature and a humidity; the session prints the membership degree of
//! each input set and the resulting watering duration.  `exit` at either
//! prompt returns to normal operation.

use core::fmt::Write;

use heapless::String;
use log::info;

use crate::config::SystemConfig;
use crate::control::irrigation::{HUMIDITY, TEMPERATURE};
use crate::control::{VariableId, WateringPlanner};
use crate::error::FuzzyError;

use super::ports::ConsolePort;

pub const MODE_PROMPT: &str = "ENTER DEBUG MODE [Y/N]?";
pub const TEMP_PROMPT: &str = "TEMP = ";
pub const HUM_PROMPT: &str = "HUM = ";
pub const INVALID_VALUE: &str = "INVALID VALUE";
pub const EXIT_WORD: &str = "exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Normal cooperative control loop.
    Control,
    /// Blocking console session, then the control loop.
    Diagnostic,
}

/// Ask once; anything other than `y`/`Y` before the timeout means normal mode.
pub fn select_run_mode(console: &mut impl ConsolePort, timeout_ms: u32) -> RunMode {
    console.write_line(MODE_PROMPT);
    match console.read_line(timeout_ms) {
        Some(answer) if answer.trim().eq_ignore_ascii_case("y") => RunMode::Diagnostic,
        _ => RunMode::Control,
    }
}

/// Outcome of one prompt round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionStep {
    /// A duration was computed.
    Evaluated { minutes: f32 },
    /// Input was negative or not a number.
    Rejected,
    /// A read timed out; the round starts over.
    TimedOut,
    /// The operator asked to leave.
    Exit,
}

enum Answer {
    Value(f32),
    Invalid,
    TimedOut,
    Exit,
}

pub struct DiagnosticSession {
    planner: WateringPlanner,
    timeout_ms: u32,
    evaluations: u32,
}

impl DiagnosticSession {
    pub fn new(config: &SystemConfig) -> Result<Self, FuzzyError> {
        Ok(Self {
            planner: WateringPlanner::new(config.defuzz_samples)?,
            timeout_ms: config.diagnostic_timeout_ms,
            evaluations: 0,
        })
    }

    /// Run rounds until the operator types `exit`.  Timeouts re-prompt.
    pub fn run(&mut self, console: &mut impl ConsolePort) {
        info!("Diagnostic session started");
        while self.step(console) != SessionStep::Exit {}
        info!("Diagnostic session ended after {} evaluations", self.evaluations);
    }

    /// One prompt round: temperature, humidity, result.
    pub fn step(&mut self, console: &mut impl ConsolePort) -> SessionStep {
        let temperature = match self.ask(console, TEMP_PROMPT) {
            Answer::Value(v) => Some(v),
            Answer::Invalid => None,
            Answer::TimedOut => return SessionStep::TimedOut,
            Answer::Exit => return SessionStep::Exit,
        };
        let humidity = match self.ask(console, HUM_PROMPT) {
            Answer::Value(v) => Some(v),
            Answer::Invalid => None,
            Answer::TimedOut => return SessionStep::TimedOut,
            Answer::Exit => return SessionStep::Exit,
        };

        let (Some(t), Some(h)) = (temperature, humidity) else {
            console.write_line(INVALID_VALUE);
            return SessionStep::Rejected;
        };

        let minutes = self.planner.duration_minutes(t, h);
        self.evaluations += 1;
        self.print_degrees(console, TEMPERATURE);
        self.print_degrees(console, HUMIDITY);

        let mut line: String<32> = String::new();
        let _ = write!(line, "DURATION = {:.2}", minutes);
        console.write_line(&line);
        SessionStep::Evaluated { minutes }
    }

    pub fn evaluations(&self) -> u32 {
        self.evaluations
    }

    fn ask(&self, console: &mut impl ConsolePort, prompt: &str) -> Answer {
        console.write_line(prompt);
        let Some(raw) = console.read_line(self.timeout_ms) else {
            return Answer::TimedOut;
        };
        let text = raw.trim();
        if text.eq_ignore_ascii_case(EXIT_WORD) {
            return Answer::Exit;
        }
        match text.parse::<f32>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Answer::Value(v),
            _ => Answer::Invalid,
        }
    }

    /// `temperature: cold=0.00 normal=1.00 hot=0.00`
    fn print_degrees(&self, console: &mut impl ConsolePort, id: VariableId) {
        let engine = self.planner.engine();
        let (Some(var), Ok(degrees)) = (
            engine.inputs().iter().find(|v| v.id() == id),
            engine.input_degrees(id),
        ) else {
            return;
        };
        let mut line: String<96> = String::new();
        let _ = write!(line, "{}:", var.name());
        for (set, degree) in var.sets().iter().zip(degrees.iter()) {
            let _ = write!(line, " {}={:.2}", set.name, degree);
        }
        console.write_line(&line);
    }
}
