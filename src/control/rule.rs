//! Static rule representation.
//!
//! A rule is plain data: two antecedent set indices (one per input
//! variable, AND-combined) and one consequent set index on the output
//! variable.  No ownership graph, no heap.

/// `IF first IS sets[first] AND second IS sets[second] THEN output IS sets[output]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Traceability only; never used for lookup.
    pub id: u8,
    pub first: u8,
    pub second: u8,
    pub output: u8,
}

impl Rule {
    pub const fn new(id: u8, first: u8, second: u8, output: u8) -> Self {
        Self {
            id,
            first,
            second,
            output,
        }
    }

    /// Mamdani AND: minimum of the two antecedent degrees.
    pub fn firing_strength(first_degree: f32, second_degree: f32) -> f32 {
        first_degree.min(second_degree)
    }
}
