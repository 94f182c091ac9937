use std::hash::Hash;

use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::ops::*;
use crate::outputs::Outputs;
use crate::system::System;
use crate::variable::{Fuzzification, Role};

/// Mamdani-style inference: fuzzify, fire rules, imply, aggregate,
/// defuzzify.
///
/// Holds only operator choices. Every call to [`Inference::eval`] works in
/// its own buffers, so neither `self` nor the `System` is touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inference {
    and_op: AndOp,
    or_op: OrOp,
    imp_op: ImplicationOp,
    agg_op: AggregationOp,
    defuzz_op: DefuzzificationOp,
    fuzzification: Fuzzification,
}

impl Inference {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        imp_op: ImplicationOp,
        agg_op: AggregationOp,
        defuzz_op: DefuzzificationOp,
        fuzzification: Fuzzification,
    ) -> Self {
        Self {
            and_op,
            or_op,
            imp_op,
            agg_op,
            defuzz_op,
            fuzzification,
        }
    }

    pub fn eval<T: Copy + Eq + Hash>(&self, system: &System<T>, inputs: &Inputs) -> Result<Outputs<T>> {
        // Validate and saturate every crisp input before evaluating anything
        let mut crisp = SecondaryMap::new();

        for (key, var) in system.with_role(Role::Antecedent) {
            let raw = inputs.0.get(&key).copied().ok_or_else(|| Error::MissingInput {
                variable: var.name().to_owned(),
            })?;

            crisp.insert(key, var.clamp_input(raw)?);
        }

        // Fuzzificate facts
        let mut fuzzified = SecondaryMap::with_capacity(crisp.len());

        for (key, var) in system.with_role(Role::Antecedent) {
            if let Some(&x) = crisp.get(key) {
                fuzzified.insert(key, var.fuzzify(x, self.fuzzification));
            }
        }

        // Fire rules
        let firing_strengths: Vec<f64> = system
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let strength = rule.premise.degree(&fuzzified, self.and_op, self.or_op);
                trace!(rule = i, strength, "rule fired");
                strength
            })
            .collect();

        // Imply, aggregate and defuzzificate per consequent
        let mut defuzzificated = SecondaryMap::new();

        for (key, var) in system.with_role(Role::Consequent) {
            let mut aggregated = vec![0.; var.universe().len()].into_boxed_slice();

            for (&strength, &(conclusion, term_idx)) in firing_strengths.iter().zip(&system.conclusions) {
                if conclusion != key {
                    continue;
                }
                let Some(term) = var.terms.get(term_idx) else {
                    continue;
                };

                for (agg, &membership) in aggregated.iter_mut().zip(term.samples.iter()) {
                    *agg = self.agg_op.apply(*agg, self.imp_op.apply(strength, membership));
                }
            }

            let undefined = || Error::UndefinedDefuzzification {
                variable: var.name().to_owned(),
            };

            if aggregated.iter().all(|&m| m == 0.) {
                return Err(undefined());
            }

            let value = self
                .defuzz_op
                .call(var.universe(), &aggregated)
                .ok_or_else(undefined)?;

            debug!(variable = var.name(), value, "defuzzificated output");

            defuzzificated.insert(key, value);
        }

        Ok(Outputs::new(defuzzificated, firing_strengths, fuzzified))
    }
}
