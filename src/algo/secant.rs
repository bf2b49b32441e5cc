//! Secant method.
//!
//! An open method that replaces Newton's derivative by a finite difference
//! through the last two iterates. Convergence is superlinear (order about
//! 1.618) near a simple root, at one function evaluation per iteration.
//!
//! # References
//!
//! \[1\] [Wikipedia](https://en.wikipedia.org/wiki/Secant_method)

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::convert;
use thiserror::Error;

use crate::core::{Initial, RealField, Report};
use crate::perturb::perturb;

/// Options for [`secant`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct SecantOptions<T: RealField> {
    /// Step tolerance: the solver stops when `|x_{k+1} - x_k| <= xatol`.
    /// Default: `1e-10`.
    xatol: T,
    /// Value tolerance: the solver stops when `|f(x)| <= vtol`. Default: `0`.
    vtol: T,
    /// Iteration budget. Default: `200`.
    max_iter: usize,
    /// Function evaluation budget. Default: `200`.
    max_fev: usize,
}

impl<T: RealField> Default for SecantOptions<T> {
    fn default() -> Self {
        Self {
            xatol: convert(1e-10),
            vtol: T::zero(),
            max_iter: 200,
            max_fev: 200,
        }
    }
}

/// Error returned from [`secant`].
#[derive(Debug, Error)]
pub enum SecantError<T> {
    /// The secant denominator stayed zero even after perturbing the iterate;
    /// the function is locally flat and no update can be computed.
    #[error("secant denominator vanished near {x:?}")]
    DegenerateSecant {
        /// Iterate at which the update degenerated.
        x: T,
    },
}

/// Finds a root of `f` by the secant method.
///
/// A [`Point`](Initial::Point) start generates the second iterate as
/// `x0 + sqrt(EPSILON) * (1 + |x0|)`; an [`Interval`](Initial::Interval)
/// supplies both starting iterates directly (no ordering or sign-change
/// requirement).
pub fn secant<T, F>(
    mut f: F,
    initial: impl Into<Initial<T>>,
    options: &SecantOptions<T>,
) -> Result<(T, Report<T>), SecantError<T>>
where
    T: RealField,
    F: FnMut(T) -> T,
{
    let (mut x0, mut x1) = match initial.into() {
        Initial::Point(x0) => (x0, x0 + T::EPSILON_SQRT * (T::one() + x0.abs())),
        Initial::Interval(a, b) => (a, b),
    };

    let mut f0 = f(x0);
    let mut f1 = f(x1);

    let mut report = Report::new();
    report.n_fev = 2;
    report.record(x0, f0);
    report.record(x1, f1);

    if f0.abs() <= options.vtol {
        return Ok((x0, report));
    }
    if f1.abs() <= options.vtol {
        return Ok((x1, report));
    }

    let mut root = x1;

    while report.n_iter < options.max_iter && report.n_fev < options.max_fev {
        if f1 == f0 {
            debug!("secant denominator is zero, perturbing the iterate");
            x1 = perturb(x1);
            f1 = f(x1);
            report.n_fev += 1;

            if f1 == f0 {
                return Err(SecantError::DegenerateSecant { x: x1 });
            }
        }

        let x2 = (x0 * f1 - x1 * f0) / (f1 - f0);
        let f2 = f(x2);
        report.n_fev += 1;
        report.n_iter += 1;
        report.record(x2, f2);

        let step = (x2 - x1).abs();
        root = x2;

        if f2.abs() <= options.vtol || step <= options.xatol {
            break;
        }

        x0 = x1;
        f0 = f1;
        x1 = x2;
        f1 = f2;
    }

    Ok((root, report))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::testing;

    #[test]
    fn cubic_from_point() {
        let options = SecantOptions::default();
        let (root, report) = secant(testing::cubic, 3.0, &options).unwrap();

        assert_abs_diff_eq!(root, testing::CUBIC_ROOT, epsilon = 1e-9);
        assert!(report.n_iter < 20);
    }

    #[test]
    fn parabola_from_pair() {
        let options = SecantOptions::default();
        let (root, _) = secant(testing::parabola, (0.5, 2.0), &options).unwrap();

        assert_abs_diff_eq!(root, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn early_exit_on_initial_root() {
        let mut options = SecantOptions::default();
        options.set_vtol(1e-12);

        let (root, report) = secant(testing::parabola, (1.0, 2.0), &options).unwrap();
        assert_eq!(root, 1.0);
        assert_eq!(report.n_iter, 0);
        assert_eq!(report.n_fev, 2);
    }

    #[test]
    fn constant_function_is_degenerate() {
        let options = SecantOptions::default();
        let result = secant(|_x: f64| 1.0, 0.0, &options);

        assert!(matches!(result, Err(SecantError::DegenerateSecant { .. })));
    }
}
