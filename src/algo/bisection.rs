//! Bisection method.
//!
//! The simplest bracketing method: each iteration evaluates the midpoint of
//! the bracket and discards the half in which the sign does not change. The
//! bracket width halves every iteration, so the number of iterations needed
//! to reach a width tolerance is known in advance and used as the default
//! iteration budget.
//!
//! # References
//!
//! \[1\] [Wikipedia](https://en.wikipedia.org/wiki/Bisection_method)

use getset::{CopyGetters, Setters};
use nalgebra::{convert, try_convert};
use thiserror::Error;

use crate::bracket::{self, BracketError};
use crate::core::{Initial, RealField, Report};

/// Options for [`bisection`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct BisectionOptions<T: RealField> {
    /// Value tolerance: the solver stops when `|f(c)| <= vtol`. Default: `0`.
    vtol: T,
    /// Bracket tolerance: the solver stops when the bracket is narrower.
    /// Clamped to at least `2 * EPSILON`. Default: `2 * EPSILON`.
    batol: T,
    /// Iteration budget. `None` derives the exact number of halvings needed,
    /// `ceil(log2((b - a) / batol))`; a given cap is combined with the
    /// derived count by taking the tighter of the two. Default: `None`.
    max_iter: Option<usize>,
    /// Function evaluation budget of the solver loop. Default: `200`.
    max_fev: usize,
    /// Whether a user-supplied interval that does not bracket a root may be
    /// re-expanded by the bracket search. When `false`, such an interval is
    /// an error. Default: `false`.
    rebracket: bool,
}

impl<T: RealField> Default for BisectionOptions<T> {
    fn default() -> Self {
        Self {
            vtol: T::zero(),
            batol: T::EPSILON + T::EPSILON,
            max_iter: None,
            max_fev: 200,
            rebracket: false,
        }
    }
}

/// Error returned from [`bisection`].
#[derive(Debug, Error)]
pub enum BisectionError<T> {
    /// No sign-changing interval could be established.
    #[error(transparent)]
    Bracket(#[from] BracketError<T>),
}

/// Finds a root of `f` by bisection.
///
/// A [`Point`](Initial::Point) start is expanded into a bracket first; see
/// [`bracket::find`] and the `rebracket` option for the interval semantics.
/// Returns the last midpoint and the diagnostics report. The report counts
/// only the evaluations of the solver loop; the bracket search accounts for
/// its own.
pub fn bisection<T, F>(
    mut f: F,
    initial: impl Into<Initial<T>>,
    options: &BisectionOptions<T>,
) -> Result<(T, Report<T>), BisectionError<T>>
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

    let (mut a, mut b) = (found.bracket.a, found.bracket.b);
    let mut fa = found.fa;

    let batol = options.batol.max(T::EPSILON + T::EPSILON);
    let max_iter = derived_iterations(b - a, batol, options.max_iter);

    let mut report = Report::new();
    let two: T = convert(2.0);

    let mut c = (a + b) / two;
    let mut fc = f(c);
    report.n_fev += 1;
    report.record(c, fc);
    report.record_bracket(a, b);

    while fc.abs() > options.vtol
        && b - a >= batol
        && report.n_iter < max_iter
        && report.n_fev < options.max_fev
    {
        // Keep the endpoint whose sign differs from the midpoint.
        if fa * fc > T::zero() {
            a = c;
            fa = fc;
        } else {
            b = c;
        }

        c = (a + b) / two;
        fc = f(c);
        report.n_fev += 1;
        report.n_iter += 1;
        report.record(c, fc);
        report.record_bracket(a, b);
    }

    Ok((c, report))
}

/// Number of halvings needed to shrink `width` below `batol`, combined with
/// an optional caller-supplied cap.
fn derived_iterations<T: RealField>(width: T, batol: T, cap: Option<usize>) -> usize {
    let halvings = try_convert((width / batol).log2().ceil())
        .map(|n: f64| if n > 0.0 { n as usize } else { 0 })
        .unwrap_or(usize::MAX);

    match cap {
        Some(cap) => cap.min(halvings),
        None => halvings,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::testing;

    #[test]
    fn parabola_with_huge_bracket() {
        let options = BisectionOptions::default();
        let (root, report) = bisection(testing::parabola, (0.0, 9999999.0), &options).unwrap();

        assert_abs_diff_eq!(root, 1.0, epsilon = 1e-8);
        // One midpoint evaluation up front, then one per iteration.
        assert_eq!(report.n_fev, report.n_iter + 1);
    }

    #[test]
    fn early_exit_when_midpoint_is_root() {
        let mut options = BisectionOptions::default();
        options.set_vtol(1e-12);

        // Midpoint of [-2, 2] is the root of x^3 - 2x.
        let (root, report) = bisection(|x: f64| x * x * x - 2.0 * x, (-2.0, 2.0), &options).unwrap();

        assert_eq!(root, 0.0);
        assert_eq!(report.n_iter, 0);
        assert_eq!(report.n_fev, 1);
    }

    #[test]
    fn bracket_invariant_and_monotone_shrink() {
        let options = BisectionOptions::default();
        let (_, report) = bisection(testing::cubic, (0.0, 3.0), &options).unwrap();

        let mut width = f64::INFINITY;
        for &(a, b) in &report.brackets {
            assert!(testing::cubic(a) * testing::cubic(b) <= 0.0);
            assert!(b - a <= width);
            width = b - a;
        }
    }

    #[test]
    fn derived_budget_is_capped_by_caller() {
        let mut options = BisectionOptions::default();
        options.set_max_iter(Some(5));

        let (_, report) = bisection(testing::parabola, (0.0, 100.0), &options).unwrap();
        assert_eq!(report.n_iter, 5);
    }

    #[test]
    fn point_start_expands_to_bracket() {
        let options = BisectionOptions::default();
        let (root, _) = bisection(testing::cubic, 2.5, &options).unwrap();

        assert_abs_diff_eq!(root, testing::CUBIC_ROOT, epsilon = 1e-8);
    }

    #[test]
    fn non_bracketing_interval_is_rejected_without_rebracket() {
        let options = BisectionOptions::default();
        let result = bisection(testing::parabola, (2.0, 3.0), &options);

        assert!(matches!(
            result,
            Err(BisectionError::Bracket(BracketError::NoSignChange { .. }))
        ));
    }

    #[test]
    fn non_bracketing_interval_is_expanded_with_rebracket() {
        let mut options = BisectionOptions::default();
        options.set_rebracket(true);

        let (root, _) = bisection(testing::parabola, (2.0, 3.0), &options).unwrap();
        assert_abs_diff_eq!(root.abs(), 1.0, epsilon = 1e-8);
    }
}
