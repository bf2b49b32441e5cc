//! ITP (interpolate, truncate, project) method.
//!
//! A bracketing method with the minmax-optimal worst case of bisection and
//! superlinear average-case convergence. Each iteration computes the regula
//! falsi point, truncates it toward the bisection point, and projects the
//! result into an interval that shrinks at least as fast as bisection would.
//! The worst-case iteration count is `ceil(log2(width / batol)) + n0`.
//!
//! # References
//!
//! \[1\] [Wikipedia](https://en.wikipedia.org/wiki/ITP_method)
//!
//! \[2\] Oliveira, Takahashi, *An Enhancement of the Bisection Method
//! Average Performance Preserving Minmax Optimality*, ACM TOMS 47 (2021).

use getset::{CopyGetters, Setters};
use nalgebra::{convert, try_convert};
use thiserror::Error;

use crate::bracket::{self, BracketError};
use crate::core::{Initial, RealField, Report};

/// Options for [`itp`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct ItpOptions<T: RealField> {
    /// Bracket width tolerance; the solver stops when the bracket is
    /// narrower. Clamped from below to `2 * EPSILON`. Default: `2 * EPSILON`.
    batol: T,
    /// Iteration budget. Default: `200`.
    max_iter: usize,
    /// Function evaluation budget of the solver loop. Default: `200`.
    max_fev: usize,
    /// Truncation scale. Must be positive. Default: `0.1`.
    kappa1: T,
    /// Truncation exponent. The superlinearity guarantee requires a value in
    /// `[1, 1 + phi)` where `phi` is the golden ratio. Default:
    /// `0.98 * (1 + phi)`.
    kappa2: T,
    /// Number of extra iterations allowed beyond the bisection worst case.
    /// Default: `1`.
    n0: usize,
    /// Whether a user-supplied interval that does not bracket a root may be
    /// re-expanded by the bracket search. Default: `false`.
    rebracket: bool,
}

impl<T: RealField> Default for ItpOptions<T> {
    fn default() -> Self {
        let phi = (1.0 + 5f64.sqrt()) / 2.0;
        Self {
            batol: T::EPSILON + T::EPSILON,
            max_iter: 200,
            max_fev: 200,
            kappa1: convert(0.1),
            kappa2: convert(0.98 * (1.0 + phi)),
            n0: 1,
            rebracket: false,
        }
    }
}

/// Error returned from [`itp`].
#[derive(Debug, Error)]
pub enum ItpError<T> {
    /// No sign-changing interval could be established.
    #[error(transparent)]
    Bracket(#[from] BracketError<T>),
}

/// Finds a root of `f` by the ITP method.
///
/// Starting-point semantics match [`bisection`](super::bisection). Returns
/// the midpoint of the final bracket and the diagnostics report. Termination
/// is on bracket width only; an exactly-zero function value collapses the
/// bracket, which terminates on the next width check.
pub fn itp<T, F>(
    mut f: F,
    initial: impl Into<Initial<T>>,
    options: &ItpOptions<T>,
) -> Result<(T, Report<T>), ItpError<T>>
where
    T: RealField,
    F: FnMut(T) -> T,
{
    let initial = initial.into();
    let budget = match initial {
        Initial::Point(_) => bracket::DEFAULT_MAX_ITER,
        Initial::Interval(..) if options.rebracket => bracket::DEFAULT_MAX_ITER,
        Initial::Interval(..) => 0,
    };
    let found = bracket::find(&mut f, initial, budget)?;

    let mut a = found.bracket.a;
    let mut b = found.bracket.b;
    let mut ya = found.fa;
    let mut yb = found.fb;

    // Normalize to an increasing crossing: work with `flip * f` so that the
    // value at `a` is non-positive and the value at `b` non-negative.
    let flip = if ya > T::zero() { -T::one() } else { T::one() };
    ya *= flip;
    yb *= flip;

    let batol = options.batol.max(T::EPSILON + T::EPSILON);
    let half: T = convert(0.5);
    let eps = batol * half;

    // Bisection worst case plus the slack n0 fixes the projection radius
    // schedule.
    let n_half = match try_convert::<T, f64>(((b - a) / batol).log2().ceil()) {
        Some(n) if n > 0.0 => n as usize,
        _ => 0,
    };
    let n_max = n_half + options.n0;

    let mut report = Report::new();

    while b - a >= batol && report.n_iter < options.max_iter && report.n_fev < options.max_fev {
        let width = b - a;
        let xh = (a + b) * half;

        // Projection radius: how far from the bisection point the accepted
        // step may land while preserving the worst-case schedule.
        let slack: T = convert(2f64.powi(n_max.saturating_sub(report.n_iter) as i32));
        let r = (eps * slack - width * half).max(T::zero());

        // Interpolate: regula falsi point.
        let xf = (yb * a - ya * b) / (yb - ya);

        // Truncate: nudge it toward the bisection point.
        let sigma = if xh >= xf { T::one() } else { -T::one() };
        let delta = options.kappa1 * width.powf(options.kappa2);
        let xt = if delta <= (xh - xf).abs() { xf + sigma * delta } else { xh };

        // Project: clamp into the minmax interval around the bisection point.
        let xitp = if (xt - xh).abs() <= r { xt } else { xh - sigma * r };

        let yitp = flip * f(xitp);
        report.n_fev += 1;
        report.n_iter += 1;
        report.record(xitp, flip * yitp);

        if yitp > T::zero() {
            b = xitp;
            yb = yitp;
        } else if yitp < T::zero() {
            a = xitp;
            ya = yitp;
        } else {
            a = xitp;
            b = xitp;
        }

        report.record_bracket(a, b);
    }

    Ok(((a + b) * half, report))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::testing;

    #[test]
    fn cubic_root() {
        let options = ItpOptions::default();
        let (root, _) = itp(testing::cubic, (2.0, 3.0), &options).unwrap();

        assert_abs_diff_eq!(root, testing::CUBIC_ROOT, epsilon = 1e-12);
    }

    #[test]
    fn worst_case_matches_bisection_schedule() {
        let options = ItpOptions::default();
        let (_, report) = itp(testing::parabola, (0.0, 2.0), &options).unwrap();

        // No more than ceil(log2(width / batol)) + n0 iterations.
        let batol = 2.0 * f64::EPSILON;
        let bound = (2.0 / batol).log2().ceil() as usize + 1;
        assert!(report.n_iter <= bound);
    }

    #[test]
    fn smooth_function_takes_few_iterations() {
        let options = ItpOptions::default();
        let (root, report) = itp(testing::kepler, (0.0, 3.0), &options).unwrap();

        assert!(testing::kepler(root).abs() < 1e-9);
        // Far below the ~52-iteration bisection worst case for this width.
        assert!(report.n_iter < 20);
    }

    #[test]
    fn bracket_shrinks_monotonically() {
        let options = ItpOptions::default();
        let (_, report) = itp(testing::parabola, (0.0, 100.0), &options).unwrap();

        let mut prev = f64::INFINITY;
        for &(lo, hi) in &report.brackets {
            assert!(lo <= hi);
            assert!(hi - lo <= prev);
            prev = hi - lo;
        }
    }

    #[test]
    fn exact_zero_collapses_bracket() {
        let options = ItpOptions::default();
        // Root at 1 and a symmetric bracket: the first bisection-like step
        // may or may not hit it exactly, but a collapsed bracket must still
        // terminate cleanly.
        let (root, _) = itp(|x: f64| x - 1.0, (0.0, 2.0), &options).unwrap();

        assert_abs_diff_eq!(root, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn decreasing_function_is_normalized() {
        let options = ItpOptions::default();
        let (root, _) = itp(|x: f64| 1.0 - x * x, (0.0, 2.0), &options).unwrap();

        assert_abs_diff_eq!(root, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn non_bracketing_interval_errors_without_rebracket() {
        let options = ItpOptions::default();
        let result = itp(testing::parabola, (2.0, 3.0), &options);

        assert!(matches!(result, Err(ItpError::Bracket(_))));
    }
}
