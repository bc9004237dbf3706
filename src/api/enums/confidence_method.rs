use core::fmt;

/// Formula used to derive the confidence half-width of a group.
///
/// Given a population standard deviation `sd` and a trial count `N`:
///
/// - [`ConfidenceMethod::NormalApproximation`]: `1.96 * sd / sqrt(N)`
/// - [`ConfidenceMethod::StudentT`]: `t(0.95, N - 1) * sd`
///
/// The Student-t form is not scaled by `sqrt(N)`. This matches the figure scripts
/// the results were originally published with.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConfidenceMethod {
    NormalApproximation,
    StudentT,
}

impl fmt::Display for ConfidenceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceMethod::NormalApproximation => write!(f, "normal (1.96 * sd / sqrt(N))"),
            ConfidenceMethod::StudentT => write!(f, "student-t (t(0.95, N-1) * sd)"),
        }
    }
}
