//! Deterministic iterate perturbation.
//!
//! Derivative-based solvers land on degenerate points from time to time: a
//! zero derivative in Newton's method, equal function values in the secant
//! update, a singular Jacobian matrix in the multivariate methods. The
//! standard local recovery is to nudge the iterate by a small relative step
//! and retry. The nudge is deterministic and scale-aware, not random.

use nalgebra::{convert, DVector};

use crate::core::RealField;

/// Returns the default relative step, `100 * T::EPSILON`.
pub fn default_step<T: RealField>() -> T {
    T::EPSILON * convert(100.0)
}

/// Perturbs a scalar iterate by the default relative step.
///
/// See [`perturb_with`] for the exact formula.
pub fn perturb<T: RealField>(x: T) -> T {
    perturb_with(x, default_step())
}

/// Perturbs a scalar iterate by the given relative step.
///
/// Returns `x + rel * (1 + |x|)`, or `rel` when `x` is zero. The step grows
/// with the magnitude of `x`, so the nudge remains meaningful for large
/// iterates and does not vanish near zero.
pub fn perturb_with<T: RealField>(x: T, rel: T) -> T {
    if x == T::zero() {
        rel
    } else {
        x + rel * (T::one() + x.abs())
    }
}

/// Perturbs a vector iterate componentwise by the default relative step.
///
/// The zero vector maps to a dense vector filled with the relative step.
pub fn perturb_vector<T: RealField>(x: &DVector<T>) -> DVector<T> {
    perturb_vector_with(x, default_step())
}

/// Perturbs a vector iterate componentwise by the given relative step.
pub fn perturb_vector_with<T: RealField>(x: &DVector<T>, rel: T) -> DVector<T> {
    x.map(|xi| perturb_with(xi, rel))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::dvector;

    use super::*;

    #[test]
    fn zero_maps_to_relative_step() {
        assert_eq!(perturb(0.0), 100.0 * f64::EPSILON);
    }

    #[test]
    fn nonzero_is_nudged_away() {
        let x = 3.0;
        let xp = perturb(x);
        assert_ne!(xp, x);
        assert_abs_diff_eq!(xp, x, epsilon = 1e-12);

        // Deterministic.
        assert_eq!(perturb(x), xp);
    }

    #[test]
    fn step_scales_with_magnitude() {
        let small = perturb(1.0) - 1.0;
        let large = perturb(1e6) - 1e6;
        assert!(large > small);
    }

    #[test]
    fn zero_vector_becomes_dense_step() {
        let x = dvector![0.0, 0.0, 0.0];
        let xp = perturb_vector(&x);
        assert!(xp.iter().all(|&v| v == 100.0 * f64::EPSILON));
    }

    #[test]
    fn negative_iterates_move_too() {
        let xp = perturb(-5.0);
        assert_ne!(xp, -5.0);
        assert_abs_diff_eq!(xp, -5.0, epsilon = 1e-11);
    }
}
