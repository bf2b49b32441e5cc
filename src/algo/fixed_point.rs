//! Fixed-point iteration.
//!
//! Repeated application of a map: `x_{k+1} = g(x_k)`. Converges linearly to
//! an attracting fixed point (one where `|g'| < 1`); diverges or cycles
//! elsewhere. There is no failure detection beyond the budgets: when they
//! run out, the last iterate is returned and the report tells the caller how
//! far iteration got.
//!
//! # References
//!
//! \[1\] [Wikipedia](https://en.wikipedia.org/wiki/Fixed-point_iteration)

use getset::{CopyGetters, Setters};
use nalgebra::{convert, DVector};

use crate::core::{RealField, Report, VectorReport};

/// Options for [`fixed_point`] and [`fixed_point_n`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct FixedPointOptions<T: RealField> {
    /// Step tolerance: iteration stops when consecutive iterates differ by
    /// at most this much. Default: `1e-10`.
    xatol: T,
    /// Iteration budget. Default: `200`.
    max_iter: usize,
}

impl<T: RealField> Default for FixedPointOptions<T> {
    fn default() -> Self {
        Self {
            xatol: convert(1e-10),
            max_iter: 200,
        }
    }
}

/// Iterates the map `g` from `x0` until the step is within tolerance.
///
/// The reported residual of each iterate `x` is the displacement
/// `g(x) - x`, which is zero exactly at a fixed point.
pub fn fixed_point<T, G>(mut g: G, x0: T, options: &FixedPointOptions<T>) -> (T, Report<T>)
where
    T: RealField,
    G: FnMut(T) -> T,
{
    let mut report = Report::new();
    let mut x = x0;

    while report.n_iter < options.max_iter {
        let next = g(x);
        report.n_fev += 1;
        report.n_iter += 1;
        report.record(next, next - x);

        let step = (next - x).abs();
        x = next;

        if step <= options.xatol {
            break;
        }
    }

    (x, report)
}

/// Iterates the map `g` on vectors from `x0` until the step norm is within
/// tolerance.
pub fn fixed_point_n<T, G>(
    mut g: G,
    x0: &DVector<T>,
    options: &FixedPointOptions<T>,
) -> (DVector<T>, VectorReport<T>)
where
    T: RealField,
    G: FnMut(&DVector<T>) -> DVector<T>,
{
    let mut report = VectorReport::new();
    let mut x = x0.clone();

    while report.n_iter < options.max_iter {
        let next = g(&x);
        report.n_fev += 1;
        report.n_iter += 1;

        let displacement = &next - &x;
        let step = displacement.norm();
        report.record(&next, &displacement);
        x = next;

        if step <= options.xatol {
            break;
        }
    }

    (x, report)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::dvector;

    use super::*;
    use crate::testing;

    #[test]
    fn dottie_number() {
        let options = FixedPointOptions::default();
        let (x, report) = fixed_point(testing::dottie, 1.0, &options);

        assert_abs_diff_eq!(x, testing::DOTTIE_NUMBER, epsilon = 1e-9);
        assert!(report.n_iter < options.max_iter());
    }

    #[test]
    fn already_at_fixed_point_stops_after_one_check() {
        let options = FixedPointOptions::default();
        let (x, report) = fixed_point(|x: f64| x, 3.0, &options);

        assert_eq!(x, 3.0);
        assert_eq!(report.n_iter, 1);
        assert_eq!(report.n_fev, 1);
    }

    #[test]
    fn divergent_map_exhausts_budget_silently() {
        let mut options = FixedPointOptions::default();
        options.set_max_iter(10);

        let (x, report) = fixed_point(|x: f64| 2.0 * x, 1.0, &options);

        assert_eq!(report.n_iter, 10);
        assert_eq!(x, 1024.0);
    }

    #[test]
    fn residuals_shrink_for_contraction() {
        let options = FixedPointOptions::default();
        let (_, report) = fixed_point(testing::dottie, 1.0, &options);

        let first = report.residuals[0].abs();
        let last = report.residuals[report.residuals.len() - 1].abs();
        assert!(last < first);
    }

    #[test]
    fn vector_contraction_converges() {
        // Affine contraction with fixed point (2, 1).
        let options = FixedPointOptions::default();
        let (x, _) = fixed_point_n(
            |x: &DVector<f64>| dvector![0.5 * x[0] + 1.0, 0.25 * x[1] + 0.75],
            &dvector![0.0, 0.0],
            &options,
        );

        assert_abs_diff_eq!(x[0], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(x[1], 1.0, epsilon = 1e-9);
    }
}
