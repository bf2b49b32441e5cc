//! Newton's method, scalar and multivariate.
//!
//! The scalar variant iterates `x - f(x) / f'(x)` with a supplied derivative;
//! the multivariate variant solves `J(x) y = -f(x)` by LU decomposition and
//! steps by `y`. Both converge quadratically near a simple root. Degenerate
//! derivatives are handled locally by perturbing the iterate and retrying; a
//! Jacobian that stays singular away from a root is a fatal error.
//!
//! # References
//!
//! \[1\] [Wikipedia](https://en.wikipedia.org/wiki/Newton%27s_method)
//!
//! \[2\] [Numerical Methods for Unconstrained Optimization and Nonlinear
//! Equations](https://epubs.siam.org/doi/book/10.1137/1.9781611971200)

use getset::{CopyGetters, Setters};
use log::debug;
use nalgebra::{convert, DVector};
use thiserror::Error;

use crate::core::{RealField, Report, VectorReport};
use crate::perturb::{perturb, perturb_vector};

/// Options for [`newton`] and [`newton_n`].
#[derive(Debug, Clone, CopyGetters, Setters)]
#[getset(get_copy = "pub", set = "pub")]
pub struct NewtonOptions<T: RealField> {
    /// Step tolerance: the solver stops when the Newton step is shorter.
    /// Default: `1e-10`.
    xatol: T,
    /// Value tolerance on the residual. The scalar solver stops when
    /// `|f(x)| <= vtol`, the multivariate one when every component satisfies
    /// `|f_i(x)| < vtol`. Default: `0`.
    vtol: T,
    /// Iteration budget. Default: `200`.
    max_iter: usize,
    /// Function evaluation budget. Default: `200`.
    max_fev: usize,
    /// Derivative/Jacobian evaluation budget, tracked independently of the
    /// function budget. Default: `200`.
    max_dev: usize,
}

impl<T: RealField> Default for NewtonOptions<T> {
    fn default() -> Self {
        Self {
            xatol: convert(1e-10),
            vtol: T::zero(),
            max_iter: 200,
            max_fev: 200,
            max_dev: 200,
        }
    }
}

/// Error returned from [`newton`] and [`newton_n`].
#[derive(Debug, Error)]
pub enum NewtonError<T> {
    /// The derivative stayed zero even after perturbing the iterate.
    #[error("derivative vanished near {x:?}")]
    DerivativeVanished {
        /// Iterate at which the derivative vanished.
        x: T,
    },
    /// The Jacobian matrix stayed numerically singular after a perturbation
    /// retry while the residual is not within tolerance. The solver cannot
    /// proceed.
    #[error("jacobian matrix is singular away from a root")]
    SingularJacobian,
}

/// Finds a root of a scalar `f` with derivative `df` by Newton's method.
pub fn newton<T, F, D>(
    mut f: F,
    mut df: D,
    x0: T,
    options: &NewtonOptions<T>,
) -> Result<(T, Report<T>), NewtonError<T>>
where
    T: RealField,
    F: FnMut(T) -> T,
    D: FnMut(T) -> T,
{
    let mut x = x0;
    let mut fx = f(x);
    let mut dfx = df(x);

    let mut report = Report::new();
    report.n_fev = 1;
    report.n_dev = 1;
    report.record(x, fx);
    report.derivatives.push(dfx);

    if fx.abs() <= options.vtol {
        return Ok((x, report));
    }

    while report.n_iter < options.max_iter
        && report.n_fev < options.max_fev
        && report.n_dev < options.max_dev
    {
        if dfx == T::zero() {
            debug!("derivative is zero, perturbing the iterate");
            x = perturb(x);
            fx = f(x);
            dfx = df(x);
            report.n_fev += 1;
            report.n_dev += 1;

            if dfx == T::zero() {
                return Err(NewtonError::DerivativeVanished { x });
            }
        }

        let step = fx / dfx;
        x -= step;

        fx = f(x);
        dfx = df(x);
        report.n_fev += 1;
        report.n_dev += 1;
        report.n_iter += 1;
        report.record(x, fx);
        report.derivatives.push(dfx);

        if fx.abs() <= options.vtol || step.abs() <= options.xatol {
            break;
        }
    }

    Ok((x, report))
}

/// Finds a root of a vector-valued `f` with Jacobian `jac` by Newton's
/// method.
///
/// Each iteration solves `J(x) y = -f(x)` for the step `y` by LU
/// decomposition; the Jacobian is never inverted explicitly. If the solve
/// reports a singular matrix, the iterate is perturbed and the solve retried
/// once; if the retry fails too but the unperturbed residual is already
/// within tolerance, the solver terminates successfully there (the root may
/// coincide with a singular Jacobian). Otherwise
/// [`NewtonError::SingularJacobian`] propagates.
pub fn newton_n<T, F, J>(
    mut f: F,
    mut jac: J,
    x0: DVector<T>,
    options: &NewtonOptions<T>,
) -> Result<(DVector<T>, VectorReport<T>), NewtonError<T>>
where
    T: RealField,
    F: FnMut(&DVector<T>) -> DVector<T>,
    J: FnMut(&DVector<T>) -> nalgebra::DMatrix<T>,
{
    let mut x = x0;
    let mut fx = f(&x);

    let mut report = VectorReport::new();
    report.n_fev = 1;
    report.record(&x, &fx);

    if within_vtol(&fx, options.vtol) {
        return Ok((x, report));
    }

    while report.n_iter < options.max_iter
        && report.n_fev < options.max_fev
        && report.n_jev < options.max_dev
    {
        let j = jac(&x);
        report.n_jev += 1;

        let y = match j.lu().solve(&-&fx) {
            Some(y) => y,
            None => {
                debug!("jacobian is singular, perturbing the iterate");
                let xp = perturb_vector(&x);
                let fxp = f(&xp);
                let jp = jac(&xp);
                report.n_fev += 1;
                report.n_jev += 1;

                match jp.lu().solve(&-&fxp) {
                    Some(y) => {
                        x = xp;
                        y
                    }
                    None => {
                        // The root itself may have a singular Jacobian; the
                        // caller cares about the unperturbed point.
                        if within_vtol(&fx, options.vtol) {
                            return Ok((x, report));
                        }
                        return Err(NewtonError::SingularJacobian);
                    }
                }
            }
        };

        let step = y.norm();
        x += y;

        fx = f(&x);
        report.n_fev += 1;
        report.n_iter += 1;
        report.record(&x, &fx);

        if step <= options.xatol || within_vtol(&fx, options.vtol) {
            break;
        }
    }

    Ok((x, report))
}

/// Componentwise residual check used by the multivariate solvers.
pub(crate) fn within_vtol<T: RealField>(fx: &DVector<T>, vtol: T) -> bool {
    fx.iter().all(|fi| fi.abs() < vtol)
}
