//! Fuzzy variables: a named dimension made of ordered fuzzy sets.

use heapless::Vec;

use super::membership::MembershipFunction;
use crate::error::FuzzyError;

/// Maximum number of sets a single variable can hold (stack-allocated).
pub const MAX_SETS: usize = 8;

/// Identifier of an input or output variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableId(pub u8);

/// A linguistic term ("cold", "humid", ...) and its shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzySet {
    pub name: &'static str,
    pub shape: MembershipFunction,
}

impl FuzzySet {
    pub const fn new(name: &'static str, shape: MembershipFunction) -> Self {
        Self { name, shape }
    }
}

/// An input or output dimension.
///
/// Sets may overlap and are not normalised; making them a sensible
/// partition of the domain is up to whoever writes the rule table.
#[derive(Debug, Clone)]
pub struct FuzzyVariable {
    id: VariableId,
    name: &'static str,
    sets: Vec<FuzzySet, MAX_SETS>,
}

impl FuzzyVariable {
    pub fn new(id: VariableId, name: &'static str) -> Self {
        Self {
            id,
            name,
            sets: Vec::new(),
        }
    }

    /// Build a variable from a static set table.
    pub fn with_sets(id: VariableId, name: &'static str, sets: &[FuzzySet]) -> Result<Self, FuzzyError> {
        let mut var = Self::new(id, name);
        for set in sets {
            var.add_set(*set)?;
        }
        Ok(var)
    }

    /// Append a set.  Returns its index.
    pub fn add_set(&mut self, set: FuzzySet) -> Result<u8, FuzzyError> {
        let index = self.sets.len() as u8;
        self.sets.push(set).map_err(|_| FuzzyError::CapacityExceeded)?;
        Ok(index)
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn sets(&self) -> &[FuzzySet] {
        &self.sets
    }

    pub fn set(&self, index: u8) -> Option<&FuzzySet> {
        self.sets.get(index as usize)
    }

    /// Degree of `x` in every set, in set order.
    pub fn degrees(&self, x: f32) -> Vec<f32, MAX_SETS> {
        self.sets.iter().map(|s| s.shape.degree(x)).collect()
    }

    /// `[min(a), max(d)]` over all sets, or `None` when empty.
    pub fn domain(&self) -> Option<(f32, f32)> {
        self.sets.iter().fold(None, |acc, set| {
            let (lo, hi) = set.shape.support();
            Some(match acc {
                None => (lo, hi),
                Some((l, h)) => (l.min(lo), h.max(hi)),
            })
        })
    }
}
