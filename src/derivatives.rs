//! Finite-difference approximation of the Jacobian matrix.
//!
//! [`broyden`](crate::algo::broyden) needs a Jacobian only for its very first
//! step; when the caller has no analytic one, this module approximates it by
//! forward differences. The approximation evaluates the system once per
//! dimension.

use nalgebra::{DMatrix, DVector};

use crate::core::RealField;

/// Approximates the Jacobian matrix of `f` at `x` by forward differences.
///
/// `fx` must hold `f(x)`. Performs `x.len()` evaluations of `f`.
///
/// The step for column *j* balances two competing needs: it should be as
/// small as possible for the difference quotient to approach the real
/// derivative, but a very small step makes `f(x + e_j * step) ~= f(x)` with
/// few good digits. Scaling the step by `x_j` itself (with a unit floor for
/// components near zero) is a reasonable trade-off.
pub fn jacobian<T, F>(f: &mut F, x: &DVector<T>, fx: &DVector<T>) -> DMatrix<T>
where
    T: RealField,
    F: FnMut(&DVector<T>) -> DVector<T>,
{
    let n = x.len();
    let mut jac = DMatrix::zeros(n, n);
    let mut xj = x.clone();

    for j in 0..n {
        let step = T::EPSILON_SQRT * x[j].abs().max(T::one()) * T::one().copysign(x[j]);
        let step = if step == T::zero() { T::EPSILON_SQRT } else { step };

        xj[j] = x[j] + step;
        let fxj = f(&xj);
        xj[j] = x[j];

        // J[i, j] = (f(x + e_j * step_j) - f(x))_i / step_j.
        let mut col = jac.column_mut(j);
        col.copy_from(&fxj);
        col -= fx;
        col /= step;
    }

    jac
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::{dmatrix, dvector};

    use super::*;
    use crate::testing;

    #[test]
    fn rosenbrock_jacobian() {
        let x = dvector![2.0, 2.0];
        let fx = testing::rosenbrock(&x);

        let jac = jacobian(&mut testing::rosenbrock, &x, &fx);

        let expected = dmatrix![-40.0, 10.0; -1.0, 0.0];
        assert_abs_diff_eq!(jac, expected, epsilon = 1e-5);
    }

    #[test]
    fn jacobian_near_zero_uses_floored_step() {
        let x = dvector![0.0, 0.0];
        let fx = testing::circle_hyperbola(&x);

        let jac = jacobian(&mut testing::circle_hyperbola, &x, &fx);
        assert!(jac.iter().all(|v| v.is_finite()));
    }
}
