use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Crisp values for one evaluation, keyed by antecedent variable.
#[derive(Debug, Default, Clone)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Inputs(HashMap::with_capacity(capacity))
    }

    pub fn add<I>(&mut self, var: Variable<I>, val: f64) -> &mut Self {
        self.0.insert(var.0, val);
        self
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<f64> {
        self.0.get(&var.0).copied()
    }
}
