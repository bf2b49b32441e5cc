//! Broyden's method.
//!
//! A quasi-Newton method for systems of equations. The Jacobian is computed
//! (or approximated by finite differences) only once, at the initial point;
//! its inverse is then maintained across iterations by the Sherman-Morrison
//! rank-one update driven by the secant condition on the residuals. This
//! replaces the O(n^3) linear solve of full Newton by an O(n^2) update per
//! step, at the price of superlinear instead of quadratic convergence.
//!
//! # References
//!
//! \[1\] [Wikipedia](https://en.wikipedia.org/wiki/Broyden%27s_method)
//!
//! \[2\] [A Class of Methods for Solving Nonlinear Simultaneous
//! Equations](https://www.ams.org/journals/mcom/1965-19-092/S0025-5718-1965-0198670-6/)

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::{convert, DMatrix, DVector};
use thiserror::Error;

use super::newton::within_vtol;
use crate::core::{RealField, VectorReport};
use crate::derivatives::jacobian;
use crate::perturb::perturb_vector;

/// Options for [`broyden`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct BroydenOptions<T: RealField> {
    /// Step tolerance: the solver stops when the quasi-Newton step is
    /// shorter. Default: `1e-10`.
    xatol: T,
    /// Value tolerance: the solver stops when every residual component
    /// satisfies `|f_i(x)| < vtol`. Default: `0`.
    vtol: T,
    /// Iteration budget. Default: `200`.
    max_iter: usize,
    /// Function evaluation budget. Default: `200`.
    max_fev: usize,
}

impl<T: RealField> Default for BroydenOptions<T> {
    fn default() -> Self {
        Self {
            xatol: convert(1e-10),
            vtol: T::zero(),
            max_iter: 200,
            max_fev: 200,
        }
    }
}

/// Error returned from [`broyden`].
#[derive(Debug, Error)]
pub enum BroydenError {
    /// The initial Jacobian matrix stayed numerically singular after a
    /// perturbation retry; no initial inverse approximation exists.
    #[error("initial jacobian matrix is singular")]
    SingularJacobian,
}

/// Finds a root of `f` by Broyden's method, approximating the initial
/// Jacobian by forward differences.
///
/// The finite-difference initialization costs `x0.len()` extra function
/// evaluations; afterwards the method spends exactly one evaluation per
/// iteration. See [`broyden_with_jacobian`] for supplying an analytic
/// Jacobian instead.
pub fn broyden<T, F>(
    mut f: F,
    x0: DVector<T>,
    options: &BroydenOptions<T>,
) -> Result<(DVector<T>, VectorReport<T>), BroydenError>
where
    T: RealField,
    F: FnMut(&DVector<T>) -> DVector<T>,
{
    let dim = x0.len();
    let mut report = VectorReport::new();

    let init = |x: &DVector<T>, fx: &DVector<T>, f: &mut F, report: &mut VectorReport<T>| {
        report.n_fev += dim;
        jacobian(f, x, fx)
    };

    solve(&mut f, init, x0, options, &mut report).map(|x| (x, report))
}

/// Finds a root of `f` by Broyden's method with an analytic Jacobian for
/// the initial point.
///
/// `jac` is evaluated exactly once; the report's `n_jev` stays at one no
/// matter how many iterations are performed.
pub fn broyden_with_jacobian<T, F, J>(
    mut f: F,
    mut jac: J,
    x0: DVector<T>,
    options: &BroydenOptions<T>,
) -> Result<(DVector<T>, VectorReport<T>), BroydenError>
where
    T: RealField,
    F: FnMut(&DVector<T>) -> DVector<T>,
    J: FnMut(&DVector<T>) -> DMatrix<T>,
{
    let mut report = VectorReport::new();

    let init = |x: &DVector<T>, _fx: &DVector<T>, _f: &mut F, report: &mut VectorReport<T>| {
        report.n_jev += 1;
        jac(x)
    };

    solve(&mut f, init, x0, options, &mut report).map(|x| (x, report))
}

fn solve<T, F, I>(
    f: &mut F,
    mut init: I,
    x0: DVector<T>,
    options: &BroydenOptions<T>,
    report: &mut VectorReport<T>,
) -> Result<DVector<T>, BroydenError>
where
    T: RealField,
    F: FnMut(&DVector<T>) -> DVector<T>,
    I: FnMut(&DVector<T>, &DVector<T>, &mut F, &mut VectorReport<T>) -> DMatrix<T>,
{
    let mut x = x0;
    let mut fx = f(&x);
    report.n_fev += 1;
    report.record(&x, &fx);

    if within_vtol(&fx, options.vtol) {
        return Ok(x);
    }

    // Inverse of the initial Jacobian, via LU against the identity. On a
    // singular matrix, perturb the initial point and try once more.
    let j0 = init(&x, &fx, f, report);
    let mut h = match j0.lu().try_inverse() {
        Some(h) => h,
        None => {
            debug!("initial jacobian is singular, perturbing the initial point");
            let xp = perturb_vector(&x);
            let fxp = f(&xp);
            report.n_fev += 1;

            let jp = init(&xp, &fxp, f, report);
            match jp.lu().try_inverse() {
                Some(h) => {
                    x = xp;
                    fx = fxp;
                    h
                }
                None => return Err(BroydenError::SingularJacobian),
            }
        }
    };

    while report.n_iter < options.max_iter && report.n_fev < options.max_fev {
        let s = -(&h * &fx);
        let step = s.norm();

        x += &s;
        let fx1 = f(&x);
        report.n_fev += 1;
        report.n_iter += 1;
        report.record(&x, &fx1);

        if step <= options.xatol || within_vtol(&fx1, options.vtol) {
            return Ok(x);
        }

        // Sherman-Morrison update of the inverse approximation:
        // H += (s - H df) s^T H / (s^T H df), with df the residual change.
        let df = &fx1 - &fx;
        let hdf = &h * &df;
        let denom = s.dot(&hdf);

        if denom == T::zero() {
            debug!("rank-one update denominator is zero, keeping the previous inverse");
        } else {
            let u = &s - &hdf;
            let update = (u * s.transpose() * &h) / denom;
            h += update;
        }

        fx = fx1;
    }

    Ok(x)
}
