use crate::error::{Error, Result};

/// Piecewise-linear membership shape.
///
/// Breakpoints are ordered left to right. Collapsed edges (`a == b` on a
/// triangle, or a zero-width plateau) are allowed and behave as a step at
/// the collapsed point instead of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MembershipFunction {
    /// Foot, peak, foot
    Triangular(f64, f64, f64),
    /// Foot, plateau start, plateau end, foot
    Trapezoidal(f64, f64, f64, f64),
}

impl MembershipFunction {
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        check_breakpoints(&[a, b, c])?;

        Ok(Self::Triangular(a, b, c))
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        check_breakpoints(&[a, b, c, d])?;

        Ok(Self::Trapezoidal(a, b, c, d))
    }

    /// Degree of membership of `x`, always within `[0, 1]`.
    pub fn degree(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.;
        }

        match *self {
            Self::Triangular(a, b, c) => {
                if x == b {
                    1.
                } else if x <= a || x >= c {
                    0.
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            },
            Self::Trapezoidal(a, b, c, d) => {
                if b <= x && x <= c {
                    1.
                } else if x <= a || x >= d {
                    0.
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            },
        }
    }

    pub fn breakpoints(&self) -> Vec<f64> {
        match *self {
            Self::Triangular(a, b, c) => vec![a, b, c],
            Self::Trapezoidal(a, b, c, d) => vec![a, b, c, d],
        }
    }

    /// Evaluates the shape at every point of `universe`.
    pub fn sample(&self, universe: &[f64]) -> Vec<f64> {
        universe.iter().map(|&u| self.degree(u)).collect()
    }
}

fn check_breakpoints(points: &[f64]) -> Result<()> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(Error::InvalidShape {
            points: points.to_vec(),
            reason: "breakpoints must be finite",
        });
    }

    if points.windows(2).any(|w| w[0] > w[1]) {
        return Err(Error::InvalidShape {
            points: points.to_vec(),
            reason: "breakpoints must be in ascending order",
        });
    }

    Ok(())
}

#[test]
fn test_triangular() {
    let medium = MembershipFunction::triangular(150., 400., 750.).unwrap();

    assert_eq!(medium.degree(150.), 0.);
    assert_eq!(medium.degree(400.), 1.);
    assert_eq!(medium.degree(750.), 0.);
    assert_eq!(medium.degree(260.), 0.44);
    assert_eq!(medium.degree(575.), 0.5);
    assert_eq!(medium.degree(-10.), 0.);
    assert_eq!(medium.degree(1e9), 0.);
}

#[test]
fn test_collapsed_edges() {
    let very_unfair = MembershipFunction::triangular(0., 0., 35.).unwrap();

    assert_eq!(very_unfair.degree(0.), 1.);
    assert_eq!(very_unfair.degree(-0.5), 0.);
    assert_eq!(very_unfair.degree(17.5), 0.5);

    let very_fair = MembershipFunction::triangular(85., 100., 100.).unwrap();

    assert_eq!(very_fair.degree(100.), 1.);
    assert_eq!(very_fair.degree(100.5), 0.);

    let singleton = MembershipFunction::trapezoidal(4., 4., 4., 4.).unwrap();

    assert_eq!(singleton.degree(4.), 1.);
    assert_eq!(singleton.degree(4.000001), 0.);
    assert_eq!(singleton.degree(f64::NAN), 0.);
}

#[test]
fn test_collapsed_triangles_are_monotone() {
    let very_unfair = MembershipFunction::triangular(0., 0., 35.).unwrap();
    let very_fair = MembershipFunction::triangular(85., 100., 100.).unwrap();
    let scores: Vec<f64> = (0..=100).map(f64::from).collect();

    // Only a falling ramp on the left shoulder
    assert!(scores
        .windows(2)
        .all(|w| very_unfair.degree(w[0]) >= very_unfair.degree(w[1])));
    // Only a rising ramp on the right shoulder
    assert!(scores
        .windows(2)
        .all(|w| very_fair.degree(w[0]) <= very_fair.degree(w[1])));
}

#[test]
fn test_trapezoidal_shoulders() {
    let expensive = MembershipFunction::trapezoidal(4e9, 7e9, 2e10, 2e10).unwrap();

    assert_eq!(expensive.degree(2e10), 1.);
    assert_eq!(expensive.degree(5.5e9), 0.5);
    assert_eq!(expensive.degree(4e9), 0.);

    let small = MembershipFunction::trapezoidal(0., 0., 100., 250.).unwrap();

    assert_eq!(small.degree(0.), 1.);
    assert_eq!(small.degree(175.), 0.5);
    assert_eq!(small.degree(250.), 0.);
}

#[test]
fn test_rejects_bad_breakpoints() {
    assert!(matches!(
        MembershipFunction::triangular(5., 4., 6.),
        Err(Error::InvalidShape { .. })
    ));
    assert!(matches!(
        MembershipFunction::trapezoidal(0., f64::NAN, 1., 2.),
        Err(Error::InvalidShape { .. })
    ));
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::MembershipFunction;

    /// Four ordered breakpoints within [-1000, 1000]
    fn ordered_points() -> impl Strategy<Value = [f64; 4]> {
        prop::array::uniform4(-1000.0f64..1000.0).prop_map(|mut p| {
            p.sort_by(f64::total_cmp);
            p
        })
    }

    proptest! {
        #[test]
        fn degree_stays_in_unit_interval(p in ordered_points(), x in -5000.0f64..5000.0) {
            let trap = MembershipFunction::trapezoidal(p[0], p[1], p[2], p[3]).unwrap();
            let tri = MembershipFunction::triangular(p[0], p[1], p[3]).unwrap();

            prop_assert!((0.0..=1.0).contains(&trap.degree(x)));
            prop_assert!((0.0..=1.0).contains(&tri.degree(x)));
        }

        #[test]
        fn trapezoid_support_and_plateau(p in ordered_points(), t in 0.0f64..=1.0, x in -5000.0f64..5000.0) {
            let trap = MembershipFunction::trapezoidal(p[0], p[1], p[2], p[3]).unwrap();
            let on_plateau = (p[1] + (p[2] - p[1]) * t).clamp(p[1], p[2]);

            prop_assert_eq!(trap.degree(on_plateau), 1.);
            if x < p[0] || x > p[3] {
                prop_assert_eq!(trap.degree(x), 0.);
            }
        }

        #[test]
        fn ramps_are_monotone(p in ordered_points(), s in 0.0f64..=1.0, t in 0.0f64..=1.0) {
            let trap = MembershipFunction::trapezoidal(p[0], p[1], p[2], p[3]).unwrap();
            let (lo, hi) = if s <= t { (s, t) } else { (t, s) };

            let rise = |f: f64| (p[0] + (p[1] - p[0]) * f).clamp(p[0], p[1]);
            prop_assert!(trap.degree(rise(lo)) <= trap.degree(rise(hi)));

            let fall = |f: f64| (p[2] + (p[3] - p[2]) * f).clamp(p[2], p[3]);
            prop_assert!(trap.degree(fall(lo)) >= trap.degree(fall(hi)));
        }

        #[test]
        fn triangle_ramps_are_monotone(p in ordered_points(), s in 0.0f64..=1.0, t in 0.0f64..=1.0) {
            let tri = MembershipFunction::triangular(p[0], p[1], p[3]).unwrap();
            let (lo, hi) = if s <= t { (s, t) } else { (t, s) };

            let rise = |f: f64| (p[0] + (p[1] - p[0]) * f).clamp(p[0], p[1]);
            prop_assert!(tri.degree(rise(lo)) <= tri.degree(rise(hi)));

            let fall = |f: f64| (p[1] + (p[3] - p[1]) * f).clamp(p[1], p[3]);
            prop_assert!(tri.degree(fall(lo)) >= tri.degree(fall(hi)));
        }
    }
}
