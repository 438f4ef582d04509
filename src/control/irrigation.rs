//! The irrigation knowledge base: temperature × humidity → watering minutes.
//!
//! | temp \ hum | dry      | normal   | humid    |
//! |------------|----------|----------|----------|
//! | cold       | short    | moderate | short    |
//! | normal     | short    | moderate | moderate |
//! | hot        | long     | moderate | long     |

use super::engine::InferenceEngine;
use super::membership::MembershipFunction;
use super::rule::Rule;
use super::variable::{FuzzySet, FuzzyVariable, VariableId};
use crate::error::FuzzyError;

pub const TEMPERATURE: VariableId = VariableId(1);
pub const HUMIDITY: VariableId = VariableId(2);
pub const DURATION: VariableId = VariableId(3);

// ── Input: air temperature (°C) ───────────────────────────────

pub const COLD: u8 = 0;
pub const WARM: u8 = 1;
pub const HOT: u8 = 2;

pub const TEMPERATURE_SETS: [FuzzySet; 3] = [
    FuzzySet::new("cold", MembershipFunction::trapezoid(0.0, 0.0, 19.0, 25.0)),
    FuzzySet::new("normal", MembershipFunction::trapezoid(20.0, 25.0, 25.0, 30.0)),
    FuzzySet::new("hot", MembershipFunction::trapezoid(25.0, 30.0, 50.0, 50.0)),
];

// ── Input: relative humidity (%) ──────────────────────────────

pub const DRY: u8 = 0;
pub const MOIST: u8 = 1;
pub const HUMID: u8 = 2;

pub const HUMIDITY_SETS: [FuzzySet; 3] = [
    FuzzySet::new("dry", MembershipFunction::trapezoid(0.0, 0.0, 50.0, 70.0)),
    FuzzySet::new("normal", MembershipFunction::trapezoid(50.0, 70.0, 70.0, 90.0)),
    FuzzySet::new("humid", MembershipFunction::trapezoid(70.0, 90.0, 100.0, 100.0)),
];

// ── Output: watering duration (minutes) ───────────────────────

pub const SHORT: u8 = 0;
pub const MODERATE: u8 = 1;
pub const LONG: u8 = 2;

pub const DURATION_SETS: [FuzzySet; 3] = [
    FuzzySet::new("short", MembershipFunction::trapezoid(0.0, 0.0, 7.0, 10.0)),
    FuzzySet::new("moderate", MembershipFunction::trapezoid(7.0, 10.0, 10.0, 12.0)),
    FuzzySet::new("long", MembershipFunction::trapezoid(10.0, 12.0, 15.0, 15.0)),
];

pub const RULES: [Rule; 9] = [
    Rule::new(1, COLD, DRY, SHORT),
    Rule::new(2, COLD, MOIST, MODERATE),
    Rule::new(3, COLD, HUMID, SHORT),
    Rule::new(4, WARM, DRY, SHORT),
    Rule::new(5, WARM, MOIST, MODERATE),
    Rule::new(6, WARM, HUMID, MODERATE),
    Rule::new(7, HOT, DRY, LONG),
    Rule::new(8, HOT, MOIST, MODERATE),
    Rule::new(9, HOT, HUMID, LONG),
];

/// Assemble the engine from the static tables.
pub fn build_engine(samples: usize) -> Result<InferenceEngine, FuzzyError> {
    let temperature = FuzzyVariable::with_sets(TEMPERATURE, "temperature", &TEMPERATURE_SETS)?;
    let humidity = FuzzyVariable::with_sets(HUMIDITY, "humidity", &HUMIDITY_SETS)?;
    let duration = FuzzyVariable::with_sets(DURATION, "duration", &DURATION_SETS)?;

    let mut engine = InferenceEngine::new(temperature, humidity, duration);
    engine.set_resolution(samples)?;
    for rule in RULES {
        engine.add_rule(rule)?;
    }
    Ok(engine)
}

/// Thin domain wrapper: climate in, watering minutes out.
pub struct WateringPlanner {
    engine: InferenceEngine,
}

impl WateringPlanner {
    pub fn new(samples: usize) -> Result<Self, FuzzyError> {
        Ok(Self {
            engine: build_engine(samples)?,
        })
    }

    /// Watering duration in minutes for the given climate.
    /// `0.0` when the inputs fall outside every set.
    pub fn duration_minutes(&mut self, temperature_c: f32, humidity_pct: f32) -> f32 {
        self.engine.evaluate(temperature_c, humidity_pct)
    }

    /// Last computed duration (minutes).
    pub fn last_minutes(&self) -> f32 {
        self.engine.last_output()
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }
}
