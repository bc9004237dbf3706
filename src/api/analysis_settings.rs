use crate::api::enums::{ConfidenceMethod, ExperimentVariant, TrialCount};
use crate::api::errors::AnalysisError;
use std::path::PathBuf;

/// Controls a single analysis run.
///
/// # Remarks
///
/// Everything the sweep scripts kept in module level variables lives here, so a run
/// can be reproduced from its settings alone. [`AnalysisSettings::new`] fills in the
/// values the published figures were generated with.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    /// Experiment whose results are analyzed.
    pub variant: ExperimentVariant,

    /// Directory scanned for the raw result files.
    pub input_dir: PathBuf,

    /// Directory the cache CSV (and any outputs) are written to.
    pub work_dir: PathBuf,

    /// Set this to 'true' to reuse an existing cache CSV instead of
    /// concatenating the raw result files again.
    pub skip_concatenation: bool,

    /// Formula used for the confidence half-width.
    pub confidence_method: ConfidenceMethod,

    /// Trial count fed into the half-width formula.
    ///
    /// # Remarks
    ///
    /// The published figures assumed every group contained [`ExperimentVariant::default_trials`]
    /// values. Runs which failed leave groups smaller than that, which makes the
    /// half-width too narrow; use [`TrialCount::Observed`] to account for them.
    pub trials: TrialCount,
}

impl AnalysisSettings {
    /// Creates settings for `variant` with the defaults of the published figures.
    pub fn new(variant: ExperimentVariant) -> Self {
        AnalysisSettings {
            variant,
            input_dir: PathBuf::from("."),
            work_dir: PathBuf::from("."),
            skip_concatenation: false,
            confidence_method: variant.confidence_method(),
            trials: TrialCount::Fixed(variant.default_trials()),
        }
    }

    /// Path of the concatenated cache CSV.
    pub fn cache_path(&self) -> PathBuf {
        self.work_dir.join(self.variant.cache_file_name())
    }

    /// Checks the settings can produce a summary.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidTrialCount`] if a fixed trial count below 2 is combined
    /// with [`ConfidenceMethod::StudentT`], which needs at least one degree of freedom.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if let (ConfidenceMethod::StudentT, TrialCount::Fixed(trials)) =
            (self.confidence_method, self.trials)
        {
            if trials.get() < 2 {
                return Err(AnalysisError::InvalidTrialCount(trials.get()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::num::NonZeroU32;
    use std::path::Path;

    #[test]
    fn defaults_follow_variant() {
        let settings = AnalysisSettings::new(ExperimentVariant::Figure1);
        assert_eq!(settings.confidence_method, ConfidenceMethod::StudentT);
        assert_eq!(
            settings.trials,
            TrialCount::Fixed(NonZeroU32::new(1000).unwrap())
        );
        assert!(!settings.skip_concatenation);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn cache_path_is_inside_work_dir() {
        let mut settings = AnalysisSettings::new(ExperimentVariant::PolicyCountEpsilon);
        settings.work_dir = PathBuf::from("out");
        assert_eq!(
            settings.cache_path(),
            Path::new("out").join("policy_counts_epsilon.csv")
        );
    }

    #[test]
    fn student_t_needs_two_trials() {
        let mut settings = AnalysisSettings::new(ExperimentVariant::Figure1);
        settings.trials = TrialCount::Fixed(NonZeroU32::new(1).unwrap());
        assert!(matches!(
            settings.validate(),
            Err(AnalysisError::InvalidTrialCount(1))
        ));

        settings.confidence_method = ConfidenceMethod::NormalApproximation;
        assert!(settings.validate().is_ok());
    }
}
