//! Post-hoc convergence analysis of an iterate sequence.
//!
//! Given the iterate history from a solver [`Report`](crate::core::Report),
//! estimates the asymptotic order of convergence and the asymptotic error
//! constant. With four consecutive iterates `d, c, b, a` (oldest to newest)
//! and step norms `r_ab = ||a - b||`, `r_bc = ||b - c||`, `r_cd = ||c - d||`:
//!
//! ```text
//! alpha_k  = ln(r_ab / r_bc) / ln(r_bc / r_cd)
//! lambda_k = r_ab / r_bc^alpha_k
//! ```
//!
//! An estimate at index *k* needs two iterates before and one after, so the
//! first two and the last indices are always undefined (NaN), and sequences
//! of length three or less produce no estimate at all.

use nalgebra::{convert, DVector};

use crate::core::RealField;

/// Estimated order of convergence of an iterate sequence.
///
/// Produced by [`convergence_order`] and [`convergence_order_n`].
#[derive(Debug, Clone)]
pub struct ConvergenceOrder<T> {
    /// Best single estimate of the order, taken at the last index that has
    /// one. NaN if the sequence is too short.
    pub alpha: T,
    /// Asymptotic error constant paired with [`alpha`](ConvergenceOrder::alpha).
    pub lambda: T,
    /// Per-index order estimates, aligned with the iterate sequence. NaN at
    /// the first two and the last index.
    pub alpha_all: Vec<T>,
    /// Per-index error-constant estimates, aligned like
    /// [`alpha_all`](ConvergenceOrder::alpha_all).
    pub lambda_all: Vec<T>,
}

/// Estimates the convergence order of a scalar iterate sequence.
pub fn convergence_order<T: RealField>(iterates: &[T]) -> ConvergenceOrder<T> {
    let steps: Vec<T> = iterates
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .collect();
    from_steps(&steps, iterates.len())
}

/// Estimates the convergence order of a vector iterate sequence.
///
/// Step sizes are Euclidean norms of consecutive iterate differences.
pub fn convergence_order_n<T: RealField>(iterates: &[DVector<T>]) -> ConvergenceOrder<T> {
    let steps: Vec<T> = iterates
        .windows(2)
        .map(|w| (&w[1] - &w[0]).norm())
        .collect();
    from_steps(&steps, iterates.len())
}

fn from_steps<T: RealField>(steps: &[T], len: usize) -> ConvergenceOrder<T> {
    let nan: T = convert(f64::NAN);
    let mut alpha_all = vec![nan; len];
    let mut lambda_all = vec![nan; len];

    // With iterates x_0..x_n the estimate at index k uses steps k-2, k-1 and
    // k, i.e. iterates x_{k-2}..x_{k+1}. Valid indices are 2..=n-1.
    if len > 3 {
        for k in 2..len - 1 {
            let r_ab = steps[k];
            let r_bc = steps[k - 1];
            let r_cd = steps[k - 2];

            let alpha = (r_ab / r_bc).ln() / (r_bc / r_cd).ln();
            alpha_all[k] = alpha;
            lambda_all[k] = r_ab / r_bc.powf(alpha);
        }
    }

    // Last index with an estimate; the index after it would need an iterate
    // past the end of the sequence.
    let best = len.checked_sub(2);
    let pick = |all: &[T]| best.and_then(|k| all.get(k)).copied().unwrap_or(nan);

    ConvergenceOrder {
        alpha: pick(&alpha_all),
        lambda: pick(&lambda_all),
        alpha_all,
        lambda_all,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn quadratic_sequence() {
        // x_{k+1} = x_k^2 converges to zero quadratically with lambda = 1.
        let mut x = 0.9999999f64;
        let mut iterates = vec![x];
        for _ in 0..29 {
            x = x * x;
            iterates.push(x);
        }

        let order = convergence_order(&iterates);
        assert_abs_diff_eq!(order.alpha, 2.0, epsilon = 0.05);
        assert_abs_diff_eq!(order.lambda, 1.0, epsilon = 0.05);
    }

    #[test]
    fn linear_sequence() {
        // x_k = 1 / 2^k: order one, error constant one half.
        let iterates: Vec<f64> = (0..30).map(|k| 0.5f64.powi(k)).collect();

        let order = convergence_order(&iterates);
        assert_abs_diff_eq!(order.alpha, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(order.lambda, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn short_sequences_are_undefined() {
        for len in 0..=3 {
            let iterates: Vec<f64> = (0..len).map(|k| k as f64).collect();
            let order = convergence_order(&iterates);

            assert!(order.alpha.is_nan());
            assert!(order.lambda.is_nan());
            assert!(order.alpha_all.iter().all(|a| a.is_nan()));
            assert!(order.lambda_all.iter().all(|l| l.is_nan()));
        }
    }

    #[test]
    fn edges_are_undefined() {
        let iterates: Vec<f64> = (0..10).map(|k| 0.5f64.powi(k)).collect();
        let order = convergence_order(&iterates);

        assert!(order.alpha_all[0].is_nan());
        assert!(order.alpha_all[1].is_nan());
        assert!(order.alpha_all[9].is_nan());
        assert!(order.alpha_all[2..9].iter().all(|a| a.is_finite()));
    }

    #[test]
    fn vector_sequence_matches_scalar() {
        let scalar: Vec<f64> = (0..12).map(|k| 0.5f64.powi(k)).collect();
        let vectors: Vec<_> = scalar.iter().map(|&x| nalgebra::dvector![x, 0.0]).collect();

        let a = convergence_order(&scalar);
        let b = convergence_order_n(&vectors);
        assert_abs_diff_eq!(a.alpha, b.alpha, epsilon = 1e-12);
    }
}
