//! Fuzzy-logic control: membership functions, variables, rules, the
//! inference engine, and the irrigation rule base built on top of them.

pub mod engine;
pub mod irrigation;
pub mod membership;
pub mod rule;
pub mod variable;

pub use engine::InferenceEngine;
pub use irrigation::WateringPlanner;
pub use membership::MembershipFunction;
pub use rule::Rule;
pub use variable::{FuzzySet, FuzzyVariable, VariableId};
