//! Brent-Dekker method.
//!
//! The workhorse bracketing method. It keeps three points: the current best
//! iterate `b`, its predecessor `a`, and a point `c` such that `f(b)` and
//! `f(c)` bracket the root. Each iteration attempts inverse quadratic
//! interpolation (or a secant step when only two distinct values are
//! available) and accepts it only when it is confidently better conditioned
//! than bisection; otherwise it bisects. Convergence is superlinear near
//! simple roots while never losing the bisection worst-case guarantee.
//!
//! # References
//!
//! \[1\] [Wikipedia](https://en.wikipedia.org/wiki/Brent%27s_method)
//!
//! \[2\] Brent, *Algorithms for Minimization without Derivatives*, ch. 4.

use getset::{CopyGetters, Setters};
use nalgebra::convert;
use thiserror::Error;

use crate::bracket::{self, BracketError};
use crate::core::{Initial, RealField, Report};

/// Options for [`brent_dekker`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct BrentOptions<T: RealField> {
    /// User part of the scaled tolerance `delta = 2 * EPSILON * |b| + xatol`;
    /// the solver stops when the half bracket width drops below `delta`.
    /// Default: `1e-10`.
    xatol: T,
    /// Value tolerance: the solver stops when `|f(b)| <= vtol`. Default: `0`.
    vtol: T,
    /// Iteration budget. Default: `200`.
    max_iter: usize,
    /// Function evaluation budget of the solver loop. Default: `200`.
    max_fev: usize,
    /// Whether a user-supplied interval that does not bracket a root may be
    /// re-expanded by the bracket search. Default: `false`.
    rebracket: bool,
}

impl<T: RealField> Default for BrentOptions<T> {
    fn default() -> Self {
        Self {
            xatol: convert(1e-10),
            vtol: T::zero(),
            max_iter: 200,
            max_fev: 200,
            rebracket: false,
        }
    }
}

/// Error returned from [`brent_dekker`].
#[derive(Debug, Error)]
pub enum BrentError<T> {
    /// No sign-changing interval could be established.
    #[error(transparent)]
    Bracket(#[from] BracketError<T>),
}

/// Finds a root of `f` by the Brent-Dekker method.
///
/// Starting-point semantics match [`bisection`](super::bisection): a point is
/// expanded into a bracket, an interval is verified (and re-expanded only
/// with the `rebracket` option). Returns the best iterate `b` and the
/// diagnostics report.
pub fn brent_dekker<T, F>(
    mut f: F,
    initial: impl Into<Initial<T>>,
    options: &BrentOptions<T>,
) -> Result<(T, Report<T>), BrentError<T>>
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
    let mut fa = found.fa;
    let mut fb = found.fb;

    let mut report = Report::new();

    if fa.abs() <= options.vtol {
        return Ok((a, report));
    }
    if fb.abs() <= options.vtol {
        return Ok((b, report));
    }

    let two: T = convert(2.0);
    let three: T = convert(3.0);
    let half: T = convert(0.5);

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    let mut root = b;

    while report.n_iter < options.max_iter && report.n_fev < options.max_fev {
        // Restore the bracketing triple: f(b) and f(c) must have opposite
        // signs, and b must be the best iterate so far.
        if (fb > T::zero()) == (fc > T::zero()) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        // Tolerance scaled by the magnitude of the best iterate.
        let delta = two * T::EPSILON * b.abs() + options.xatol;
        let m = (c - b) * half;

        root = b;
        if m.abs() <= delta || fb == T::zero() || fb.abs() <= options.vtol {
            break;
        }

        if e.abs() < delta || fa.abs() <= fb.abs() {
            // Interpolation made too little progress; bisect.
            d = m;
            e = m;
        } else {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // Only two distinct points: linear (secant) interpolation.
                (two * m * s, T::one() - s)
            } else {
                // Inverse quadratic interpolation through a, b, c.
                let q0 = fa / fc;
                let r = fb / fc;
                (
                    s * (two * m * q0 * (q0 - r) - (b - a) * (r - T::one())),
                    (q0 - T::one()) * (r - T::one()) * (s - T::one()),
                )
            };

            if p > T::zero() {
                q = -q;
            } else {
                p = -p;
            }

            // Accept the interpolated step only when it stays well inside
            // the bracket and shrinks faster than the step two iterations
            // ago; fall back to bisection otherwise.
            if two * p < (three * m * q - (delta * q).abs()).min((e * q).abs()) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = m;
            }
        }

        a = b;
        fa = fb;

        if d.abs() > delta {
            b += d;
        } else if m > T::zero() {
            b += delta;
        } else {
            b -= delta;
        }

        fb = f(b);
        report.n_fev += 1;
        report.n_iter += 1;
        report.record(b, fb);

        // When f(b) lands on the same side as f(c), the bracketing partner
        // of b is a (the previous best) until the triple is restored.
        let partner = if (fb > T::zero()) == (fc > T::zero()) { a } else { c };
        report.record_bracket(b.min(partner), b.max(partner));
    }

    Ok((root, report))
}
