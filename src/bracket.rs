//! Expanding-interval search for a sign change.
//!
//! A bracket is an interval whose endpoints have function values of opposite
//! signs; by continuity it is guaranteed to contain a root. The bracketing
//! solvers ([`bisection`](crate::algo::bisection),
//! [`brent_dekker`](crate::algo::brent_dekker), [`itp`](crate::algo::itp))
//! obtain their initial bracket from [`find`], which expands an interval
//! geometrically around its center until a sign change appears.

use log::warn;
use nalgebra::convert;
use thiserror::Error;

use crate::core::{Initial, RealField};
use crate::perturb::perturb;

/// Default budget for the expansion loop.
pub const DEFAULT_MAX_ITER: usize = 200;

/// A sign-changing interval, normalized so that `a < b`.
#[derive(Debug, Clone, Copy)]
pub struct Bracket<T> {
    /// Lower bound.
    pub a: T,
    /// Upper bound.
    pub b: T,
}

impl<T: RealField> Bracket<T> {
    /// Width of the interval.
    pub fn width(&self) -> T {
        self.b - self.a
    }
}

/// Result of a successful bracket search.
#[derive(Debug, Clone, Copy)]
pub struct Bracketing<T> {
    /// The sign-changing interval.
    pub bracket: Bracket<T>,
    /// Function value at the lower bound.
    pub fa: T,
    /// Function value at the upper bound.
    pub fb: T,
    /// Number of expansion iterations.
    pub n_iter: usize,
    /// Number of function evaluations. Two evaluations per iteration plus the
    /// two initial endpoint evaluations.
    pub n_fev: usize,
}

/// Error returned from [`find`].
///
/// This is a recoverable condition, not a hard failure: the best (still
/// non-bracketing) interval reached by the search is carried in the error so
/// a caller can inspect or reuse it. The sign-change invariant does *not*
/// hold for that interval.
#[derive(Debug, Error)]
pub enum BracketError<T> {
    /// No sign change was found within the iteration budget.
    #[error("no sign change found in [{a:?}, {b:?}] within {n_iter} iterations")]
    NoSignChange {
        /// Lower bound of the widest interval tried.
        a: T,
        /// Upper bound of the widest interval tried.
        b: T,
        /// Number of expansion iterations performed.
        n_iter: usize,
        /// Number of function evaluations performed.
        n_fev: usize,
    },
}

/// Searches for a sign-changing interval of `f`.
///
/// A [`Point`](Initial::Point) seed forms the initial interval
/// `(x0, perturb(x0))`; an [`Interval`](Initial::Interval) is used directly,
/// normalized so that `a < b`. If the initial interval already brackets a
/// root, it is returned immediately with zero iterations and two
/// evaluations. Otherwise the half-width of the interval is doubled around
/// its fixed center until the endpoint values change sign or `max_iter`
/// expansions have been tried.
pub fn find<T, F>(f: &mut F, initial: Initial<T>, max_iter: usize) -> Result<Bracketing<T>, BracketError<T>>
where
    T: RealField,
    F: FnMut(T) -> T,
{
    let (mut a, mut b) = match initial {
        Initial::Point(x0) => (x0, perturb(x0)),
        Initial::Interval(a, b) => (a, b),
    };
    if a > b {
        std::mem::swap(&mut a, &mut b);
    }

    let mut fa = f(a);
    let mut fb = f(b);
    let mut n_fev = 2;

    // `<=` admits an endpoint that is itself a root.
    if fa * fb <= T::zero() {
        return Ok(Bracketing {
            bracket: Bracket { a, b },
            fa,
            fb,
            n_iter: 0,
            n_fev,
        });
    }

    let two: T = convert(2.0);
    let center = (a + b) / two;
    let mut half_width = (b - a) / two;

    for n_iter in 1..=max_iter {
        half_width *= two;
        a = center - half_width;
        b = center + half_width;

        fa = f(a);
        fb = f(b);
        n_fev += 2;

        if fa * fb <= T::zero() {
            return Ok(Bracketing {
                bracket: Bracket { a, b },
                fa,
                fb,
                n_iter,
                n_fev,
            });
        }
    }

    warn!("bracket search exhausted its budget of {max_iter} iterations");

    Err(BracketError::NoSignChange {
        a,
        b,
        n_iter: max_iter,
        n_fev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_bracketing_interval_returns_immediately() {
        let mut f = |x: f64| x * x - 1.0;
        let found = find(&mut f, (0.0, 2.0).into(), DEFAULT_MAX_ITER).unwrap();

        assert_eq!(found.n_iter, 0);
        assert_eq!(found.n_fev, 2);
        assert_eq!(found.bracket.a, 0.0);
        assert_eq!(found.bracket.b, 2.0);
    }

    #[test]
    fn interval_is_normalized() {
        let mut f = |x: f64| x * x - 1.0;
        let found = find(&mut f, (2.0, 0.0).into(), DEFAULT_MAX_ITER).unwrap();

        assert!(found.bracket.a < found.bracket.b);
        assert!(found.fa * found.fb < 0.0);
    }

    #[test]
    fn expansion_from_point_finds_sign_change() {
        // f(x) = x with x0 = 10: the interval must expand down past zero
        // while staying centered near 10.
        let mut f = |x: f64| x;
        let found = find(&mut f, 10.0.into(), DEFAULT_MAX_ITER).unwrap();

        assert!(found.fa < 0.0 && found.fb > 0.0);
        assert!(found.bracket.a < 0.0 && found.bracket.b > 10.0);

        // Doubling formula: two evaluations per expansion plus the seed pair.
        assert_eq!(found.n_fev, 2 * found.n_iter + 2);
    }

    #[test]
    fn hopeless_function_reports_best_interval() {
        // Strictly positive; no sign change exists.
        let mut f = |x: f64| x * x + 1.0;
        let err = find(&mut f, (0.0, 1.0).into(), 20).unwrap_err();

        let BracketError::NoSignChange { a, b, n_iter, n_fev } = err;
        assert!(a < b);
        assert_eq!(n_iter, 20);
        assert_eq!(n_fev, 2 * 20 + 2);
    }
}
