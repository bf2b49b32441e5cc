use nalgebra::DVector;

use super::real::RealField;

/// Per-call diagnostics of a scalar solver.
///
/// The report is built incrementally during the iteration and returned
/// together with the root estimate. Histories are append-only and sized by
/// the actual iteration count.
///
/// Budget exhaustion is not an error: a solver returns its last iterate and
/// the caller detects non-convergence by comparing [`n_iter`](Report::n_iter)
/// and [`n_fev`](Report::n_fev) against the configured budgets.
#[derive(Debug, Clone, Default)]
pub struct Report<T> {
    /// Intermediate iterates, in order of computation.
    pub iterates: Vec<T>,
    /// Function values at [`iterates`](Report::iterates).
    pub residuals: Vec<T>,
    /// Derivative values at the iterates. Empty for derivative-free solvers.
    pub derivatives: Vec<T>,
    /// Bracket bounds after each iteration. Empty for open solvers.
    pub brackets: Vec<(T, T)>,
    /// Number of completed iterations.
    pub n_iter: usize,
    /// Number of function evaluations performed by the solver.
    pub n_fev: usize,
    /// Number of derivative evaluations. Zero for derivative-free solvers.
    pub n_dev: usize,
}

impl<T: RealField> Report<T> {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self {
            iterates: Vec::new(),
            residuals: Vec::new(),
            derivatives: Vec::new(),
            brackets: Vec::new(),
            n_iter: 0,
            n_fev: 0,
            n_dev: 0,
        }
    }

    pub(crate) fn record(&mut self, x: T, fx: T) {
        self.iterates.push(x);
        self.residuals.push(fx);
    }

    pub(crate) fn record_bracket(&mut self, a: T, b: T) {
        self.brackets.push((a, b));
    }
}

/// Per-call diagnostics of an n-dimensional solver.
///
/// The n-dimensional counterpart of [`Report`]. Jacobian evaluations are
/// counted in [`n_jev`](VectorReport::n_jev); for quasi-Newton methods this
/// stays at the initialization count. Unlike the scalar report, which keeps
/// the derivative values in [`derivatives`](Report::derivatives), the
/// Jacobian matrices themselves are not stored: they are n-by-n per
/// iteration, and a caller inspecting conditioning is better served by
/// re-evaluating the Jacobian at the iterates of interest.
#[derive(Debug, Clone, Default)]
pub struct VectorReport<T: RealField> {
    /// Intermediate iterates, in order of computation.
    pub iterates: Vec<DVector<T>>,
    /// Residual vectors at [`iterates`](VectorReport::iterates).
    pub residuals: Vec<DVector<T>>,
    /// Number of completed iterations.
    pub n_iter: usize,
    /// Number of function evaluations performed by the solver.
    pub n_fev: usize,
    /// Number of Jacobian evaluations.
    pub n_jev: usize,
}

impl<T: RealField> VectorReport<T> {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self {
            iterates: Vec::new(),
            residuals: Vec::new(),
            n_iter: 0,
            n_fev: 0,
            n_jev: 0,
        }
    }

    pub(crate) fn record(&mut self, x: &DVector<T>, fx: &DVector<T>) {
        self.iterates.push(x.clone());
        self.residuals.push(fx.clone());
    }
}
