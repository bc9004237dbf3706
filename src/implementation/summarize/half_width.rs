use crate::api::enums::ConfidenceMethod;
use crate::api::errors::AnalysisError;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// z value of the two sided 95% normal interval.
pub const NORMAL_Z_95: f64 = 1.96;

/// Probability the Student-t quantile is taken at.
pub const STUDENT_T_PROBABILITY: f64 = 0.95;

/// Computes the confidence half-width for a group.
///
/// # Arguments
/// * `method` - Formula to use, see [`ConfidenceMethod`].
/// * `std_dev` - Population standard deviation of the group.
/// * `trials` - Trial count `N` fed into the formula.
///
/// # Errors
///
/// [`AnalysisError::InvalidTrialCount`] if `trials` is 0, or below 2 for
/// [`ConfidenceMethod::StudentT`] on a group with spread.
pub fn half_width(method: ConfidenceMethod, std_dev: f64, trials: u32) -> Result<f64, AnalysisError> {
    if trials == 0 {
        return Err(AnalysisError::InvalidTrialCount(trials));
    }

    // No spread, no interval; also sidesteps df = 0 for single value groups.
    if std_dev == 0.0 {
        return Ok(0.0);
    }

    match method {
        ConfidenceMethod::NormalApproximation => {
            Ok(NORMAL_Z_95 * std_dev / (trials as f64).sqrt())
        }
        ConfidenceMethod::StudentT => Ok(t_quantile(trials)? * std_dev),
    }
}

/// Returns the 0.95 quantile of the Student-t distribution with `trials - 1`
/// degrees of freedom.
pub fn t_quantile(trials: u32) -> Result<f64, AnalysisError> {
    if trials < 2 {
        return Err(AnalysisError::InvalidTrialCount(trials));
    }

    let degrees_of_freedom = (trials - 1) as f64;
    let distribution = StudentsT::new(0.0, 1.0, degrees_of_freedom)
        .map_err(|e| AnalysisError::Quantile(e.to_string()))?;
    Ok(distribution.inverse_cdf(STUDENT_T_PROBABILITY))
}
