/// Extension of `nalgebra::RealField` with machine-epsilon constants that the
/// solvers need for tolerance floors, perturbation steps and finite
/// differences.
pub trait RealField: nalgebra::RealField + Copy {
    /// Machine epsilon.
    const EPSILON: Self;

    /// Square root of machine epsilon. This value is a standard constant for
    /// epsilons in approximating first-order derivative-based concepts.
    const EPSILON_SQRT: Self;
}

impl RealField for f32 {
    const EPSILON: Self = f32::EPSILON;
    const EPSILON_SQRT: Self = 0.00034526698;
}

impl RealField for f64 {
    const EPSILON: Self = f64::EPSILON;
    const EPSILON_SQRT: Self = 0.000000014901161193847656;
}
