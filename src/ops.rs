use num::Float;
use serde::{Deserialize, Serialize};

use crate::math::interp;

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }
}

/// How a rule's firing strength shapes its consequent membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationOp {
    /// Clip the shape at the firing strength (correlation-minimum, Mamdani)
    #[default]
    Min,
    /// Scale the shape by the firing strength (correlation-product, Larsen)
    Prod,
}

impl ImplicationOp {
    pub fn apply<F: Float>(self, strength: F, membership: F) -> F {
        match self {
            Self::Min => F::min(strength, membership),
            Self::Prod => strength * membership,
        }
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
}

impl AggregationOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
        }
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Membership-weighted mean of the sample points
    #[default]
    Centroid,
    /// Center of Gravity of the piecewise-linear area under the samples
    Cog,
    /// Bisector of Area
    Boa,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Largest value for which the membership function is maximum
    Lom,
    /// Smallest value for which the membership function is maximum
    Som,
}

impl DefuzzificationOp {
    /// Reduces `membership`, sampled at `universe`, to one crisp value.
    ///
    /// Returns `None` when the membership is zero everywhere or the slices are
    /// empty, as none of the methods is defined there.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        if universe.is_empty() || universe.len() != membership.len() {
            return None;
        }

        match self {
            Self::Centroid => {
                let (num, den) = universe
                    .iter()
                    .zip(membership)
                    .fold((F::zero(), F::zero()), |(num, den), (&u, &m)| (num + u * m, den + m));

                (den > F::zero()).then(|| num / den)
            },
            Self::Cog => {
                let two = F::one() + F::one();
                let three = two + F::one();
                let (num, den) = segments(universe, membership).fold(
                    (F::zero(), F::zero()),
                    |(num, den), ((x1, m1), (x2, m2))| {
                        let base = x2 - x1;
                        let area_rect = F::min(m1, m2) * base;
                        let center_rect = x1 + base / two;
                        let area_tri = base * F::abs(m2 - m1) / two;
                        let center_tri = if m2 > m1 {
                            x1 + two / three * base
                        } else {
                            x1 + F::one() / three * base
                        };

                        (num + area_rect * center_rect + area_tri * center_tri, den + area_rect + area_tri)
                    },
                );

                (den > F::zero()).then(|| num / den)
            },
            Self::Boa => {
                let two = F::one() + F::one();
                let areas: Vec<F> = segments(universe, membership)
                    .map(|((x1, m1), (x2, m2))| (m1 + m2) * (x2 - x1) / two)
                    .collect();
                let total_area = areas.iter().fold(F::zero(), |acc, &a| acc + a);

                if total_area <= F::zero() {
                    return None;
                }

                let target = total_area / two;
                let mut cum_area = F::zero();

                for (i, &area) in areas.iter().enumerate() {
                    if cum_area + area >= target {
                        let xp = [cum_area, cum_area + area];
                        let fp = [universe[i], universe[i + 1]];

                        return Some(interp(target, &xp, &fp));
                    }
                    cum_area = cum_area + area;
                }

                universe.last().copied()
            },
            Self::Mom => {
                let maximum = peak(membership)?;
                let (len, sum) = at_peak(universe, membership, maximum)
                    .fold((F::zero(), F::zero()), |(len, sum), u| (len + F::one(), sum + u));

                Some(sum / len)
            },
            Self::Lom => {
                let maximum = peak(membership)?;
                at_peak(universe, membership, maximum).reduce(F::max)
            },
            Self::Som => {
                let maximum = peak(membership)?;
                at_peak(universe, membership, maximum).reduce(F::min)
            },
        }
    }
}

/// Consecutive `((x1, m1), (x2, m2))` pairs
fn segments<'a, F: Float>(universe: &'a [F], membership: &'a [F]) -> impl Iterator<Item = ((F, F), (F, F))> + 'a {
    universe
        .windows(2)
        .zip(membership.windows(2))
        .map(|(x, m)| ((x[0], m[0]), (x[1], m[1])))
}

/// Largest membership, if it is positive
fn peak<F: Float>(membership: &[F]) -> Option<F> {
    membership
        .iter()
        .copied()
        .reduce(F::max)
        .filter(|&m| m > F::zero())
}

fn at_peak<'a, F: Float>(universe: &'a [F], membership: &'a [F], maximum: F) -> impl Iterator<Item = F> + 'a {
    universe
        .iter()
        .zip(membership)
        .filter_map(move |(&u, &m)| (m == maximum).then_some(u))
}

#[test]
fn test_operators() {
    assert_eq!(AndOp::Min.apply(0.3, 0.8), 0.3);
    assert_eq!(AndOp::Prod.apply(0.5, 0.5), 0.25);
    assert_eq!(AndOp::BoundedProd.apply(0.5, 0.25), 0.);
    assert_eq!(AndOp::DrasticProd.apply(0.4, 1.), 0.4);
    assert_eq!(AndOp::DrasticProd.apply(0.4, 0.9), 0.);
    assert_eq!(OrOp::Max.apply(0.3, 0.8), 0.8);
    assert_eq!(OrOp::ProbOr.apply(0.5, 0.5), 0.75);
    assert_eq!(OrOp::BoundedSum.apply(0.5, 0.75), 1.);
    assert_eq!(OrOp::DrasticSum.apply(0., 0.4), 0.4);
    assert_eq!(ImplicationOp::Min.apply(0.4, 0.9), 0.4);
    assert_eq!(ImplicationOp::Prod.apply(0.5, 0.5), 0.25);
    assert_eq!(AggregationOp::Max.apply(0.2, 0.6), 0.6);
}

#[test]
fn test_defuzzification() {
    let universe = [0., 1., 2., 3., 4.];
    let membership = [0., 0.5, 1., 0.5, 0.];

    assert_eq!(DefuzzificationOp::Centroid.call(&universe, &membership), Some(2.));
    assert_eq!(DefuzzificationOp::Cog.call(&universe, &membership), Some(2.));
    assert_eq!(DefuzzificationOp::Boa.call(&universe, &membership), Some(2.));
    assert_eq!(DefuzzificationOp::Mom.call(&universe, &membership), Some(2.));

    let plateau = [0., 1., 1., 0.25, 0.];

    assert_eq!(DefuzzificationOp::Som.call(&universe, &plateau), Some(1.));
    assert_eq!(DefuzzificationOp::Lom.call(&universe, &plateau), Some(2.));
    assert_eq!(DefuzzificationOp::Mom.call(&universe, &plateau), Some(1.5));
}

#[test]
fn test_defuzzification_of_empty_set() {
    let universe = [0., 1., 2.];
    let membership = [0., 0., 0.];

    for op in [
        DefuzzificationOp::Centroid,
        DefuzzificationOp::Cog,
        DefuzzificationOp::Boa,
        DefuzzificationOp::Mom,
        DefuzzificationOp::Lom,
        DefuzzificationOp::Som,
    ] {
        assert_eq!(op.call(&universe, &membership), None, "{op:?}");
    }

    assert_eq!(DefuzzificationOp::Centroid.call::<f64>(&[], &[]), None);
}
