//! Test problems with known roots, useful for smoke testing, debugging and
//! benchmarking the solvers.
//!
//! The scalar problems exercise distinct solver behaviors: [`parabola`] has
//! well-separated simple roots, [`cubic`] has an inflection near its root and
//! [`kepler`] is a transcendental equation with a flat region. The vector
//! problems are the classic [`rosenbrock`] system and a small
//! [`circle_hyperbola`] intersection.

#![allow(unused)]

use nalgebra::{dvector, DMatrix, DVector};

/// `f(x) = x^2 - 1` with roots at -1 and 1.
pub fn parabola(x: f64) -> f64 {
    x * x - 1.0
}

/// Derivative of [`parabola`].
pub fn parabola_df(x: f64) -> f64 {
    2.0 * x
}

/// `f(x) = x^3 - 2x - 5`, the classic example used by Wallis; single real
/// root near 2.0945514815.
pub fn cubic(x: f64) -> f64 {
    x * x * x - 2.0 * x - 5.0
}

/// Root of [`cubic`].
pub const CUBIC_ROOT: f64 = 2.0945514815423265;

/// Kepler's equation `E - e sin(E) - M` for eccentricity 0.8 and mean
/// anomaly 0.2; a transcendental equation with a nearly flat start.
pub fn kepler(e_anomaly: f64) -> f64 {
    e_anomaly - 0.8 * e_anomaly.sin() - 0.2
}

/// The two-dimensional Rosenbrock system. Root at `(1, 1)`.
pub fn rosenbrock(x: &DVector<f64>) -> DVector<f64> {
    dvector![10.0 * (x[1] - x[0] * x[0]), 1.0 - x[0]]
}

/// Analytic Jacobian of [`rosenbrock`].
pub fn rosenbrock_jac(x: &DVector<f64>) -> DMatrix<f64> {
    nalgebra::dmatrix![
        -20.0 * x[0], 10.0;
        -1.0, 0.0
    ]
}

/// Intersection of the circle `x^2 + y^2 = 4` with the hyperbola `xy = 1`.
/// One root is near `(1.9319, 0.5176)`.
pub fn circle_hyperbola(x: &DVector<f64>) -> DVector<f64> {
    dvector![x[0] * x[0] + x[1] * x[1] - 4.0, x[0] * x[1] - 1.0]
}

/// Analytic Jacobian of [`circle_hyperbola`].
pub fn circle_hyperbola_jac(x: &DVector<f64>) -> DMatrix<f64> {
    nalgebra::dmatrix![
        2.0 * x[0], 2.0 * x[1];
        x[1], x[0]
    ]
}

/// Contraction mapping `g(x) = cos(x)` whose fixed point is the Dottie
/// number, about 0.7390851332.
pub fn dottie(x: f64) -> f64 {
    x.cos()
}

/// Fixed point of [`dottie`].
pub const DOTTIE_NUMBER: f64 = 0.7390851332151607;
