use num::Float;

/// Evenly spaced samples over a closed interval, like numpy.linspace with
/// `endpoint=True`. The last sample is always exactly `max`.
pub struct Linspace<F> {
    start: F,
    end: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub fn new(min: F, max: F, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = F::from(n - 1).unwrap_or_else(F::one);
            (max - min) / num_steps
        } else {
            F::zero()
        };
        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            return None;
        }

        let i = self.index;
        self.index += 1;

        // Accumulated rounding would otherwise leave the final sample a few
        // ulps short of the domain maximum
        if i + 1 == self.len && self.len > 1 {
            return Some(self.end);
        }

        Some(self.start + self.step * F::from(i).unwrap_or_else(F::zero))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

#[test]
fn test_linspace() {
    let points: Vec<f64> = Linspace::new(0., 100., 101).collect();

    assert_eq!(points.len(), 101);
    assert_eq!(points[0], 0.);
    assert_eq!(points[35], 35.);
    assert_eq!(points[100], 100.);

    let points: Vec<f64> = Linspace::new(0., 2000., 1000).collect();

    assert_eq!(points.len(), 1000);
    assert_eq!(*points.last().unwrap(), 2000.);
    assert!(points.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(Linspace::new(3., 9., 1).collect::<Vec<f64>>(), vec![3.]);
    assert!(Linspace::<f64>::new(3., 9., 0).next().is_none());
}
