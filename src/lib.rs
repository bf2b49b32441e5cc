#![allow(clippy::many_single_char_names)]
#![warn(missing_docs)]

//! # Findroot
//!
//! A pure Rust library of iterative root-finding and fixed-point methods for
//! scalar functions and small systems of nonlinear equations.
//!
//! This library provides the classic bracketing methods (bisection,
//! Brent-Dekker, ITP), open methods (secant, Newton, Broyden) and plain
//! fixed-point iteration, written entirely in Rust on top of the `nalgebra`
//! crate. Every solver returns its root estimate together with a diagnostics
//! report carrying the iterate history and evaluation counters, so the
//! choice between convergence and budget exhaustion is always left to the
//! caller rather than made behind their back.
//!
//! ## Algorithms
//!
//! * [Bisection](algo::bisection) -- Robust bracketing baseline with a
//!   guaranteed halving rate.
//! * [Brent-Dekker](algo::brent) -- Recommended scalar method to be used as
//!   a default and it will just work in most of the cases.
//! * [ITP](algo::itp) -- Bracketing method with the bisection worst case and
//!   superlinear average behavior.
//! * [Secant](algo::secant) -- Derivative-free open method, fast near simple
//!   roots.
//! * [Newton](algo::newton) -- Scalar and multivariate Newton iteration with
//!   user-supplied derivatives.
//! * [Broyden](algo::broyden) -- Quasi-Newton method for systems that
//!   evaluates the Jacobian at most once.
//! * [Fixed point](algo::fixed_point) -- Contraction-mapping iteration.
//!
//! ## Scalar roots
//!
//! A scalar problem is just a closure. Bracketing solvers accept either an
//! interval or a single point that is expanded into a sign-changing interval
//! automatically.
//!
//! ```rust
//! use findroot::algo::{brent_dekker, BrentOptions};
//!
//! let f = |x: f64| x * x * x - 2.0 * x - 5.0;
//!
//! let options = BrentOptions::default();
//! let (root, report) = brent_dekker(f, (2.0, 3.0), &options).expect("no bracket");
//!
//! assert!((f(root)).abs() < 1e-9);
//! println!("root = {root} after {} evaluations", report.n_fev);
//! ```
//!
//! ## Systems of equations
//!
//! Multivariate solvers work on `nalgebra` dynamic vectors. With an analytic
//! Jacobian, use [`newton_n`](algo::newton_n); without one,
//! [`broyden`](algo::broyden) builds a finite-difference approximation once
//! and cheaply updates it from then on.
//!
//! ```rust
//! use findroot::algo::{broyden, BroydenOptions};
//! use findroot::nalgebra::{dvector, DVector};
//!
//! // Intersection of a circle and a hyperbola.
//! let f = |x: &DVector<f64>| dvector![
//!     x[0] * x[0] + x[1] * x[1] - 4.0,
//!     x[0] * x[1] - 1.0,
//! ];
//!
//! let options = BroydenOptions::default();
//! let (x, report) = broyden(f, dvector![2.0, 1.0], &options).expect("singular Jacobian");
//!
//! assert!(f(&x).norm() < 1e-8);
//! assert_eq!(report.n_jev, 0);
//! ```
//!
//! ## Diagnostics
//!
//! Budget exhaustion is deliberately not an error. Solvers return the last
//! iterate and the caller compares the report counters against the
//! configured budgets, or feeds the iterate history to
//! [`analysis::convergence_order`] to estimate the empirical order of
//! convergence.
//!
//! ## License
//!
//! Licensed under MIT.

pub mod algo;
pub mod analysis;
pub mod bracket;
mod core;
pub mod derivatives;
pub mod perturb;

pub use core::*;

#[cfg(feature = "testing")]
pub mod testing;

#[cfg(not(feature = "testing"))]
pub(crate) mod testing;

pub use nalgebra;
