//! Core abstractions and types shared by all solvers.
//!
//! *Users* are mainly interested in the [`Initial`] starting point, the
//! per-call [`Report`] diagnostics and the [`RealField`] numeric abstraction.
//! Solver implementations additionally use the tools in the
//! [`bracket`](crate::bracket), [`perturb`](crate::perturb) and
//! [`derivatives`](crate::derivatives) modules.

mod initial;
mod real;
mod report;

pub use initial::*;
pub use real::*;
pub use report::*;
