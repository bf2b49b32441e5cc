use super::real::RealField;

/// Starting point for a scalar solver.
///
/// Solvers accept either a single initial guess or an interval. Bracketing
/// solvers expand a [`Point`](Initial::Point) into a sign-changing interval
/// via [`bracket::find`](crate::bracket::find); open solvers such as
/// [`secant`](crate::algo::secant) use an [`Interval`](Initial::Interval) as
/// their two starting iterates.
///
/// Both `T` and `(T, T)` convert into `Initial<T>`, so call sites can pass
/// `1.5` or `(0.0, 2.0)` directly.
#[derive(Debug, Clone, Copy)]
pub enum Initial<T> {
    /// Single initial guess.
    Point(T),
    /// Initial interval. It does not need to be ordered or sign-changing.
    Interval(T, T),
}

impl<T: RealField> From<T> for Initial<T> {
    fn from(x0: T) -> Self {
        Initial::Point(x0)
    }
}

impl<T: RealField> From<(T, T)> for Initial<T> {
    fn from((a, b): (T, T)) -> Self {
        Initial::Interval(a, b)
    }
}
