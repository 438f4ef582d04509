//! Two-input Mamdani inference engine.
//!
//! ```text
//!  crisp A ─┐  fuzzify          aggregate            defuzzify
//!           ├─▶ min(µA, µB) ─▶ max of clipped ─▶ centroid ─▶ crisp out
//!  crisp B ─┘  per rule         consequents
//! ```
//!
//! The engine is a pure function of (crisp inputs, rule base).  The only
//! value it keeps between evaluations is the last defuzzified output.

use heapless::Vec;
use log::debug;

use super::rule::Rule;
use super::variable::{FuzzyVariable, MAX_SETS, VariableId};
use crate::error::FuzzyError;

/// Maximum number of rules (stack-allocated).
pub const MAX_RULES: usize = 16;

/// Default number of integration points across the output domain.
pub const DEFAULT_SAMPLES: usize = 1000;

pub struct InferenceEngine {
    inputs: [FuzzyVariable; 2],
    output: FuzzyVariable,
    rules: Vec<Rule, MAX_RULES>,
    /// Current crisp inputs, indexed like `inputs`.
    crisp: [f32; 2],
    /// Firing strength per rule, filled by [`fuzzify`](Self::fuzzify).
    strengths: Vec<f32, MAX_RULES>,
    samples: usize,
    last_output: f32,
}

impl InferenceEngine {
    pub fn new(first: FuzzyVariable, second: FuzzyVariable, output: FuzzyVariable) -> Self {
        Self {
            inputs: [first, second],
            output,
            rules: Vec::new(),
            crisp: [0.0; 2],
            strengths: Vec::new(),
            samples: DEFAULT_SAMPLES,
            last_output: 0.0,
        }
    }

    /// Register a rule after checking every index against its variable.
    pub fn add_rule(&mut self, rule: Rule) -> Result<(), FuzzyError> {
        let checks = [
            (&self.inputs[0], rule.first),
            (&self.inputs[1], rule.second),
            (&self.output, rule.output),
        ];
        for (var, index) in checks {
            if var.set(index).is_none() {
                return Err(FuzzyError::UnknownSet {
                    variable: var.id().0,
                    index,
                });
            }
        }
        self.rules.push(rule).map_err(|_| FuzzyError::CapacityExceeded)?;
        self.strengths.clear();
        Ok(())
    }

    /// Number of integration points used by [`defuzzify`](Self::defuzzify).
    pub fn set_resolution(&mut self, samples: usize) -> Result<(), FuzzyError> {
        if samples < 2 {
            return Err(FuzzyError::InvalidResolution(samples));
        }
        self.samples = samples;
        Ok(())
    }

    /// Store a crisp value for the next [`fuzzify`](Self::fuzzify).
    /// No range check: out-of-domain values just score zero everywhere.
    pub fn set_input(&mut self, id: VariableId, value: f32) -> Result<(), FuzzyError> {
        let slot = self.input_slot(id)?;
        self.crisp[slot] = value;
        Ok(())
    }

    /// Compute every rule's firing strength from the current inputs.
    pub fn fuzzify(&mut self) {
        let [first, second] = &self.inputs;
        let [x, y] = self.crisp;
        self.strengths.clear();
        for rule in &self.rules {
            let mu_a = first.set(rule.first).map_or(0.0, |s| s.shape.degree(x));
            let mu_b = second.set(rule.second).map_or(0.0, |s| s.shape.degree(y));
            // Capacities match, so this cannot overflow.
            let _ = self.strengths.push(Rule::firing_strength(mu_a, mu_b));
        }
    }

    /// Centroid of the aggregated output.  Returns exactly `0.0` when no
    /// rule fired (fail safe: no watering).
    pub fn defuzzify(&mut self, id: VariableId) -> Result<f32, FuzzyError> {
        if id != self.output.id() {
            return Err(FuzzyError::UnknownVariable(id.0));
        }

        // Clip level per output set: max firing strength of the rules
        // that target it.
        let mut levels: Vec<f32, MAX_SETS> = self.output.sets().iter().map(|_| 0.0).collect();
        for (rule, strength) in self.rules.iter().zip(self.strengths.iter()) {
            if let Some(level) = levels.get_mut(rule.output as usize) {
                *level = level.max(*strength);
            }
        }

        let output = match self.output.domain() {
            Some((lo, hi)) if levels.iter().any(|l| *l > 0.0) => self.centroid(lo, hi, &levels),
            _ => 0.0,
        };
        debug!(
            "defuzzify: strengths={:?} levels={:?} -> {:.3}",
            self.strengths.as_slice(),
            levels.as_slice(),
            output
        );
        self.last_output = output;
        Ok(output)
    }

    /// Convenience: set both inputs, fuzzify, defuzzify.
    pub fn evaluate(&mut self, first: f32, second: f32) -> f32 {
        self.crisp = [first, second];
        self.fuzzify();
        let id = self.output.id();
        self.defuzzify(id).unwrap_or(0.0)
    }

    /// Firing strength of each rule from the last [`fuzzify`](Self::fuzzify),
    /// in rule order.
    pub fn firing_strengths(&self) -> &[f32] {
        &self.strengths
    }

    /// Degree of the current crisp input in every set of input `id`.
    pub fn input_degrees(&self, id: VariableId) -> Result<Vec<f32, MAX_SETS>, FuzzyError> {
        let slot = self.input_slot(id)?;
        Ok(self.inputs[slot].degrees(self.crisp[slot]))
    }

    pub fn inputs(&self) -> &[FuzzyVariable; 2] {
        &self.inputs
    }

    pub fn output(&self) -> &FuzzyVariable {
        &self.output
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn last_output(&self) -> f32 {
        self.last_output
    }

    // ── Internal ──────────────────────────────────────────────

    fn input_slot(&self, id: VariableId) -> Result<usize, FuzzyError> {
        self.inputs
            .iter()
            .position(|v| v.id() == id)
            .ok_or(FuzzyError::UnknownVariable(id.0))
    }

    /// Discretised centroid: Σ(x·µ(x)) / Σµ(x) over `samples` evenly spaced
    /// points in `[lo, hi]`.
    fn centroid(&self, lo: f32, hi: f32, levels: &[f32]) -> f32 {
        let n = if hi > lo { self.samples } else { 1 };
        let step = if n > 1 { (hi - lo) / (n - 1) as f32 } else { 0.0 };

        let mut moment = 0.0_f32;
        let mut area = 0.0_f32;
        for i in 0..n {
            let x = lo + step * i as f32;
            let mu = self
                .output
                .sets()
                .iter()
                .zip(levels)
                .filter(|(_, level)| **level > 0.0)
                .map(|(set, level)| set.shape.clipped(x, *level))
                .fold(0.0_f32, f32::max);
            moment += x * mu;
            area += mu;
        }

        if area > 0.0 { moment / area } else { 0.0 }
    }
}
