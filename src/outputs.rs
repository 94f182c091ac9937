use std::collections::HashMap;
use std::hash::Hash;

use slotmap::SecondaryMap;

use crate::variable::{Variable, VariableKey};

/// Result of one evaluation: a crisp value per consequent variable, plus the
/// intermediate degrees that produced it.
#[derive(Debug, Clone)]
pub struct Outputs<T> {
    defuzzificated: SecondaryMap<VariableKey, f64>,
    firing_strengths: Vec<f64>,
    fuzzified: SecondaryMap<VariableKey, HashMap<T, f64>>,
}

impl<T: Eq + Hash> Outputs<T> {
    pub(crate) fn new(
        defuzzificated: SecondaryMap<VariableKey, f64>,
        firing_strengths: Vec<f64>,
        fuzzified: SecondaryMap<VariableKey, HashMap<T, f64>>,
    ) -> Self {
        Self {
            defuzzificated,
            firing_strengths,
            fuzzified,
        }
    }

    pub fn value<I>(&self, var: Variable<I>) -> Option<f64> {
        self.defuzzificated.get(var.0).copied()
    }

    /// One strength per rule, in the order the rules were added.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    /// Degree an antecedent's clamped input had in `label`.
    pub fn degree<I: Into<T>>(&self, var: Variable<I>, label: I) -> Option<f64> {
        self.fuzzified
            .get(var.0)
            .and_then(|terms| terms.get(&label.into()))
            .copied()
    }
}
