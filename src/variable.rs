use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use crate::linspace::Linspace;
use crate::math::interp;
use crate::membership::MembershipFunction;
use crate::terms::{Term, Terms};

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Typed handle to a variable whose labels are `I`.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

impl<I> fmt::Debug for Variable<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

impl<I> Variable<I> {
    pub fn key(self) -> VariableKey {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Consumes a crisp input
    Antecedent,
    /// Produces an aggregated fuzzy set that gets defuzzified
    Consequent,
}

/// How a crisp antecedent value is turned into label degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fuzzification {
    /// Interpolate the crisp value against each shape sampled on the
    /// variable's universe, like scikit-fuzzy's `interp_membership`.
    #[default]
    Sampled,
    /// Evaluate each shape analytically at the crisp value.
    Exact,
}

pub struct Variables<T>(pub(crate) SlotMap<VariableKey, LinguisticVariable<T>>);

impl<T> Default for Variables<T> {
    fn default() -> Self {
        Self(SlotMap::with_key())
    }
}

impl<T: Copy + Eq + Hash> Variables<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_antecedent<I: Term + Into<T>>(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        resolution: usize,
    ) -> Result<Variable<I>> {
        self.add(Role::Antecedent, name.into(), universe_range, terms, resolution)
    }

    pub fn add_consequent<I: Term + Into<T>>(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        resolution: usize,
    ) -> Result<Variable<I>> {
        self.add(Role::Consequent, name.into(), universe_range, terms, resolution)
    }

    fn add<I: Term + Into<T>>(
        &mut self,
        role: Role,
        name: String,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        resolution: usize,
    ) -> Result<Variable<I>> {
        let start_term_shapes = terms.0.iter().map(|(k, v)| (k.into(), *v));
        let var = LinguisticVariable::new(name, role, universe_range, start_term_shapes, resolution)?;
        let key = self.0.insert(var);

        Ok(Variable(key, PhantomData))
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<&LinguisticVariable<T>> {
        self.0.get(var.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub(crate) struct TermShape<T> {
    pub(crate) term: T,
    pub(crate) shape: MembershipFunction,
    /// `shape` evaluated at each point of the owning variable's universe
    pub(crate) samples: Box<[f64]>,
}

/// A named axis with a closed domain and its labeled membership shapes.
/// Immutable once built.
pub struct LinguisticVariable<T> {
    name: String,
    role: Role,
    min_u: f64,
    max_u: f64,
    universe: Box<[f64]>,
    pub(crate) terms: Vec<TermShape<T>>,
}

impl<T: Copy + Eq + Hash> LinguisticVariable<T> {
    fn new(
        name: String,
        role: Role,
        universe_range: RangeInclusive<f64>,
        start_term_shapes: impl IntoIterator<Item = (T, MembershipFunction)>,
        resolution: usize,
    ) -> Result<Self> {
        let (min_u, max_u) = universe_range.into_inner();

        if !(min_u.is_finite() && max_u.is_finite() && min_u < max_u) {
            return Err(Error::InvalidDomain {
                variable: name,
                min: min_u,
                max: max_u,
            });
        }
        if resolution < 2 {
            return Err(Error::InvalidResolution { variable: name, resolution });
        }

        let universe: Box<[f64]> = Linspace::new(min_u, max_u, resolution).collect();
        let terms = start_term_shapes
            .into_iter()
            .map(|(term, shape)| TermShape {
                term,
                shape,
                samples: shape.sample(&universe).into_boxed_slice(),
            })
            .collect();

        Ok(Self {
            name,
            role,
            min_u,
            max_u,
            universe,
            terms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn domain(&self) -> RangeInclusive<f64> {
        self.min_u..=self.max_u
    }

    /// The discretized domain, in ascending order, ending exactly at the
    /// domain maximum.
    pub fn universe(&self) -> &[f64] {
        &self.universe
    }

    pub fn labels(&self) -> impl Iterator<Item = T> + '_ {
        self.terms.iter().map(|t| t.term)
    }

    pub fn membership(&self, term: &T) -> Option<&MembershipFunction> {
        self.term(term).map(|t| &t.shape)
    }

    pub(crate) fn term(&self, term: &T) -> Option<&TermShape<T>> {
        self.terms.iter().find(|t| t.term == *term)
    }

    /// Validates a crisp value and saturates it at the domain maximum.
    ///
    /// Values below the domain minimum are rejected rather than raised to it.
    pub fn clamp_input(&self, value: f64) -> Result<f64> {
        let invalid = |reason| Error::InvalidInput {
            variable: self.name.clone(),
            value,
            reason,
        };

        if value.is_nan() {
            return Err(invalid("not a number"));
        }
        if value.is_infinite() {
            return Err(invalid("not finite"));
        }
        if value < self.min_u {
            return Err(invalid("below the domain minimum"));
        }

        Ok(value.min(self.max_u))
    }

    /// Degree of every registered label at `x`.
    pub fn fuzzify(&self, x: f64, mode: Fuzzification) -> HashMap<T, f64> {
        self.terms
            .iter()
            .map(|t| {
                let degree = match mode {
                    Fuzzification::Sampled => interp(x, &self.universe, &t.samples),
                    Fuzzification::Exact => t.shape.degree(x),
                };

                (t.term, degree)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::Key;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Load {
        Light,
        Heavy,
    }

    fn load_terms() -> Terms<Load> {
        let mut terms = Terms::new();
        terms
            .insert(Load::Light, MembershipFunction::trapezoidal(0., 0., 2., 6.).unwrap())
            .insert(Load::Heavy, MembershipFunction::triangular(4., 10., 10.).unwrap());
        terms
    }

    #[test]
    fn test_fuzzify_modes_agree_on_samples() {
        let mut vars = Variables::<Load>::new();
        let load = vars.add_antecedent("load", 0. ..=10., load_terms(), 11).unwrap();
        let var = vars.get(load).unwrap();

        assert_eq!(var.universe().len(), 11);
        assert_eq!(var.role(), Role::Antecedent);

        let exact = var.fuzzify(5., Fuzzification::Exact);
        let sampled = var.fuzzify(5., Fuzzification::Sampled);

        assert_eq!(exact[&Load::Light], 0.25);
        assert_eq!(sampled[&Load::Light], 0.25);
        assert_eq!(exact[&Load::Heavy], 1. / 6.);
        assert_eq!(sampled[&Load::Heavy], 1. / 6.);
    }

    #[test]
    fn test_sampled_fuzzification_interpolates_between_samples() {
        let mut vars = Variables::<Load>::new();
        // Samples at 0, 5 and 10 only
        let load = vars.add_antecedent("load", 0. ..=10., load_terms(), 3).unwrap();
        let var = vars.get(load).unwrap();

        let sampled = var.fuzzify(2.5, Fuzzification::Sampled);
        let exact = var.fuzzify(2.5, Fuzzification::Exact);

        // Light is 1 at 0 and 0.25 at 5
        assert_eq!(sampled[&Load::Light], 0.625);
        assert_eq!(exact[&Load::Light], 0.875);
    }

    #[test]
    fn test_clamp_input() {
        let mut vars = Variables::<Load>::new();
        let load = vars.add_antecedent("load", 0. ..=10., load_terms(), 11).unwrap();
        let var = vars.get(load).unwrap();

        assert_eq!(var.clamp_input(3.5), Ok(3.5));
        assert_eq!(var.clamp_input(10.), Ok(10.));
        assert_eq!(var.clamp_input(250.), Ok(10.));
        assert!(matches!(
            var.clamp_input(-0.1),
            Err(Error::InvalidInput { reason: "below the domain minimum", .. })
        ));
        assert!(matches!(var.clamp_input(f64::NAN), Err(Error::InvalidInput { .. })));
        assert!(matches!(var.clamp_input(f64::INFINITY), Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn test_rejects_bad_domain_and_resolution() {
        let mut vars = Variables::<Load>::new();

        assert!(matches!(
            vars.add_consequent("load", 10. ..=0., load_terms(), 11),
            Err(Error::InvalidDomain { .. })
        ));
        assert!(matches!(
            vars.add_consequent("load", 0. ..=10., load_terms(), 1),
            Err(Error::InvalidResolution { resolution: 1, .. })
        ));
        assert!(vars.is_empty());
    }
}
