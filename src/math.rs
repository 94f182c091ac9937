use num::Float;

/// Similar to numpy.interp, for a single point. `xp` must be increasing and
/// the same length as `fp`; values outside `xp` take the nearest end value.
pub(crate) fn interp<F: Float>(x: F, xp: &[F], fp: &[F]) -> F {
    let (Some(&x_first), Some(&x_last)) = (xp.first(), xp.last()) else {
        return F::zero();
    };
    let (Some(&y_first), Some(&y_last)) = (fp.first(), fp.last()) else {
        return F::zero();
    };

    // Base cases
    if x <= x_first {
        return y_first;
    }
    if x >= x_last {
        return y_last;
    }

    // First sample strictly greater than x; never 0 or len here
    let i = xp.partition_point(|&p| p <= x);
    let (x1, x2) = (xp[i - 1], xp[i]);
    let (y1, y2) = (fp[i - 1], fp[i]);

    // Actual interpolation
    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

#[test]
fn test_interp() {
    fn interp_all(x: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
        x.iter().map(|&x| interp(x, xp, fp)).collect()
    }

    let x = [0., 1., 1.5, 2.72, 3.24];
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];

    assert_eq!(interp_all(&x, &xs, &ys), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];

    assert_eq!(interp_all(&x, &xs, &ys), vec![4., 0., 2.]);
}

#[test]
fn test_interp_hits_samples_exactly() {
    let xs = [0., 10., 20.];
    let ys = [0., 1., 0.];

    assert_eq!(interp(10., &xs, &ys), 1.);
    assert_eq!(interp(20., &xs, &ys), 0.);
    assert_eq!(interp(5., &xs, &ys), 0.5);
    assert_eq!(interp::<f64>(5., &[], &[]), 0.);
}
