//! The root-finding and fixed-point algorithms.
//!
//! All solvers run to convergence or budget exhaustion and return the root
//! estimate together with a diagnostics [`Report`](crate::core::Report).
//!
//! * [Bisection](bisection) -- Robust bracketing baseline with a guaranteed
//!   halving rate.
//! * [Brent-Dekker](brent) -- Recommended bracketing method; combines inverse
//!   quadratic interpolation, secant steps and bisection.
//! * [ITP](itp) -- Bracketing method with a worst-case bisection guarantee
//!   and superlinear steps when interpolation is trustworthy.
//! * [Secant](secant) -- Derivative-free open method.
//! * [Newton](newton) -- Scalar and multivariate Newton iteration with
//!   supplied derivatives.
//! * [Broyden](broyden) -- Quasi-Newton method that evaluates the Jacobian
//!   only once.
//! * [Fixed point](fixed_point) -- Generic contraction-mapping iteration.

pub mod bisection;
pub mod brent;
pub mod broyden;
pub mod fixed_point;
pub mod itp;
pub mod newton;
pub mod secant;

pub use bisection::{bisection, BisectionError, BisectionOptions};
pub use brent::{brent_dekker, BrentError, BrentOptions};
pub use broyden::{broyden, broyden_with_jacobian, BroydenError, BroydenOptions};
pub use fixed_point::{fixed_point, fixed_point_n, FixedPointOptions};
pub use itp::{itp, ItpError, ItpOptions};
pub use newton::{newton, newton_n, NewtonError, NewtonOptions};
pub use secant::{secant, SecantError, SecantOptions};
