use super::{ConfidenceMethod, FieldKind, FieldRole, Partition};
use crate::api::errors::AnalysisError;
use crate::records::field_spec::FieldSpec;
use crate::records::key_part::KeyPart;
use crate::records::record_schema::RecordSchema;
use core::fmt;
use core::num::NonZeroU32;
use core::str::FromStr;
use thiserror::Error;

/// Number of independent runs each sweep point was repeated for.
pub const DEFAULT_TRIALS: NonZeroU32 = match NonZeroU32::new(1000) {
    Some(trials) => trials,
    None => panic!("trial count must be non-zero"),
};

/// Sample counts (per state-action pair) plotted for the loss sweep.
pub const SAMPLE_COUNTS: [i64; 4] = [2, 5, 10, 20];

/// Trajectory counts plotted for the planning loss sweeps.
pub const TRAJECTORY_COUNTS: [i64; 4] = [5, 10, 20, 50];

/// X axis range shared by the sweeps over [0, 1].
const UNIT_SWEEP_RANGE: (f64, f64) = (-0.1, 1.1);

/// X axis range of the Boltzmann temperature sweep.
const BOLTZMANN_RANGE: (f64, f64) = (-0.1, 1.0);

/// The experiments whose results can be aggregated.
///
/// Each variant fixes the layout of its result records, the file name filter used to
/// find its output files, the confidence method and the labels of its charts.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ExperimentVariant {
    /// Training and testing loss vs. discount factor, one chart per sample count.
    ///
    /// Records: `samples:int, gamma:float, split:int, loss:float`
    Figure1,

    /// Planning loss vs. discount factor, one series per trajectory count.
    ///
    /// Records: `trajectories:int, gamma:float, loss:float`
    Figure3Gamma,

    /// Planning loss vs. epsilon-greedy exploration rate.
    ///
    /// Records: `trajectories:int, epsilon:float, loss:float`
    Figure3Epsilon,

    /// Planning loss vs. Boltzmann temperature.
    ///
    /// Records: `trajectories:int, beta:float, loss:float`
    Figure3Boltzmann,

    /// Number of optimal policies vs. discount factor.
    ///
    /// Records: `gamma:float, count:int`
    PolicyCount,

    /// Number of optimal policies vs. exploration rate.
    ///
    /// Records: `epsilon:float, count:int`
    PolicyCountEpsilon,
}

/// Returned when parsing an unknown variant name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown experiment variant '{0}'. Expected one of: figure1, figure3-gamma, figure3-epsilon, figure3-boltzmann, policy-count, policy-count-epsilon")]
pub struct UnknownVariantError(pub String);

impl ExperimentVariant {
    /// All variants, in the order they are listed to users.
    pub const ALL: [ExperimentVariant; 6] = [
        ExperimentVariant::Figure1,
        ExperimentVariant::Figure3Gamma,
        ExperimentVariant::Figure3Epsilon,
        ExperimentVariant::Figure3Boltzmann,
        ExperimentVariant::PolicyCount,
        ExperimentVariant::PolicyCountEpsilon,
    ];

    /// Command line name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            ExperimentVariant::Figure1 => "figure1",
            ExperimentVariant::Figure3Gamma => "figure3-gamma",
            ExperimentVariant::Figure3Epsilon => "figure3-epsilon",
            ExperimentVariant::Figure3Boltzmann => "figure3-boltzmann",
            ExperimentVariant::PolicyCount => "policy-count",
            ExperimentVariant::PolicyCountEpsilon => "policy-count-epsilon",
        }
    }

    /// Substring a source file name must contain to belong to this experiment.
    pub fn file_filter(&self) -> &'static str {
        match self {
            ExperimentVariant::Figure1 => "run_figure1.o",
            ExperimentVariant::Figure3Gamma => "run_figure3.o",
            ExperimentVariant::Figure3Epsilon => "run_figure3_eps.o",
            ExperimentVariant::Figure3Boltzmann => "run_figure3_beta.o",
            ExperimentVariant::PolicyCount => "run_policy_count.o",
            ExperimentVariant::PolicyCountEpsilon => "run_policy_count_eps.o",
        }
    }

    /// Name of the concatenated cache CSV.
    pub fn cache_file_name(&self) -> &'static str {
        match self {
            ExperimentVariant::Figure1 => "figure1_results.csv",
            ExperimentVariant::Figure3Gamma => "figure3_gamma_results.csv",
            ExperimentVariant::Figure3Epsilon => "figure3_epsilon_results.csv",
            ExperimentVariant::Figure3Boltzmann => "figure3_boltzmann_results.csv",
            ExperimentVariant::PolicyCount => "policy_counts.csv",
            ExperimentVariant::PolicyCountEpsilon => "policy_counts_epsilon.csv",
        }
    }

    /// File name stem shared by every output derived from the cache CSV.
    pub fn output_stem(&self) -> &'static str {
        let name = self.cache_file_name();
        name.strip_suffix(".csv").unwrap_or(name)
    }

    /// Column layout of the result records.
    pub fn schema(&self) -> Result<RecordSchema, AnalysisError> {
        use FieldKind::*;
        use FieldRole::*;

        match self {
            ExperimentVariant::Figure1 => RecordSchema::new([
                FieldSpec::new(0, Int, Outer),
                FieldSpec::new(1, Float, Inner),
                FieldSpec::new(2, Int, Split),
                FieldSpec::new(3, Float, Value),
            ]),
            ExperimentVariant::Figure3Gamma
            | ExperimentVariant::Figure3Epsilon
            | ExperimentVariant::Figure3Boltzmann => RecordSchema::new([
                FieldSpec::new(0, Int, Outer),
                FieldSpec::new(1, Float, Inner),
                FieldSpec::new(2, Float, Value),
            ]),
            ExperimentVariant::PolicyCount | ExperimentVariant::PolicyCountEpsilon => {
                RecordSchema::new([
                    FieldSpec::new(0, Float, Inner),
                    FieldSpec::new(1, Int, Value),
                ])
            }
        }
    }

    /// Formula the published figures used for their error bars.
    pub fn confidence_method(&self) -> ConfidenceMethod {
        match self {
            ExperimentVariant::Figure1 => ConfidenceMethod::StudentT,
            _ => ConfidenceMethod::NormalApproximation,
        }
    }

    /// Number of runs each sweep point was repeated for.
    pub fn default_trials(&self) -> NonZeroU32 {
        DEFAULT_TRIALS
    }

    /// Outer conditions drawn by default, ascending. Empty for single-key variants.
    pub fn conditions(&self) -> &'static [i64] {
        match self {
            ExperimentVariant::Figure1 => &SAMPLE_COUNTS,
            ExperimentVariant::Figure3Gamma
            | ExperimentVariant::Figure3Epsilon
            | ExperimentVariant::Figure3Boltzmann => &TRAJECTORY_COUNTS,
            ExperimentVariant::PolicyCount | ExperimentVariant::PolicyCountEpsilon => &[],
        }
    }

    /// True if each outer condition gets its own chart rather than its own series.
    pub fn chart_per_condition(&self) -> bool {
        matches!(self, ExperimentVariant::Figure1)
    }

    /// True if missing runs should be reported as a failure rate after concatenation.
    pub fn reports_failure_rate(&self) -> bool {
        matches!(
            self,
            ExperimentVariant::Figure3Gamma
                | ExperimentVariant::Figure3Epsilon
                | ExperimentVariant::Figure3Boltzmann
        )
    }

    /// Chart title. `condition` is only used by [`Self::chart_per_condition`] variants.
    pub fn title(&self, condition: Option<KeyPart>) -> String {
        match self {
            ExperimentVariant::Figure1 => match condition {
                Some(samples) => format!("{} samples per (s,a) pair", samples),
                None => "Loss vs. Discount factor".to_string(),
            },
            ExperimentVariant::Figure3Gamma => "Planning loss vs. Discount factor".to_string(),
            ExperimentVariant::Figure3Epsilon => "Planning loss vs. Exploration".to_string(),
            ExperimentVariant::Figure3Boltzmann => {
                "Planning loss vs. Boltzmann temperature".to_string()
            }
            ExperimentVariant::PolicyCount | ExperimentVariant::PolicyCountEpsilon => {
                "Number of optimal policies vs. Discount Factor".to_string()
            }
        }
    }

    /// Label of the swept parameter.
    pub fn x_label(&self) -> &'static str {
        match self {
            ExperimentVariant::Figure1
            | ExperimentVariant::Figure3Gamma
            | ExperimentVariant::PolicyCount => "Gamma",
            ExperimentVariant::Figure3Epsilon | ExperimentVariant::PolicyCountEpsilon => "Epsilon",
            ExperimentVariant::Figure3Boltzmann => "Beta",
        }
    }

    /// Label of the measured value.
    pub fn y_label(&self) -> &'static str {
        match self {
            ExperimentVariant::Figure1 => "Loss",
            ExperimentVariant::Figure3Gamma
            | ExperimentVariant::Figure3Epsilon
            | ExperimentVariant::Figure3Boltzmann => "Planning Loss",
            ExperimentVariant::PolicyCount | ExperimentVariant::PolicyCountEpsilon => {
                "Number of optimal policies"
            }
        }
    }

    /// Legend entry of a single line series.
    pub fn series_label(&self, partition: Partition, condition: Option<KeyPart>) -> String {
        match (self, partition) {
            (ExperimentVariant::Figure1, Partition::Training) => "Training Loss".to_string(),
            (ExperimentVariant::Figure1, Partition::Testing) => "Testing Loss".to_string(),
            (ExperimentVariant::PolicyCount | ExperimentVariant::PolicyCountEpsilon, _) => {
                "Optimal policies".to_string()
            }
            (_, _) => match condition {
                Some(trajectories) => format!("{} trajectories", trajectories),
                None => "All runs".to_string(),
            },
        }
    }

    /// Fixed X axis range, if the figure used one.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        match self {
            ExperimentVariant::Figure1 => None,
            ExperimentVariant::Figure3Boltzmann => Some(BOLTZMANN_RANGE),
            _ => Some(UNIT_SWEEP_RANGE),
        }
    }

    /// File name of the chart for `condition`.
    pub fn chart_file_name(&self, condition: Option<KeyPart>) -> String {
        match condition {
            Some(condition) if self.chart_per_condition() => {
                format!("{}_{}.png", self.output_stem(), condition)
            }
            _ => format!("{}.png", self.output_stem()),
        }
    }
}

impl fmt::Display for ExperimentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExperimentVariant {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ExperimentVariant::ALL
            .into_iter()
            .find(|variant| variant.name() == wanted)
            .ok_or_else(|| UnknownVariantError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn every_preset_schema_is_valid() {
        for variant in ExperimentVariant::ALL {
            let schema = variant.schema().unwrap();
            assert_eq!(schema.has_split(), variant == ExperimentVariant::Figure1);
            assert_eq!(schema.has_outer(), !variant.conditions().is_empty());
        }
    }

    #[test]
    fn names_round_trip() {
        for variant in ExperimentVariant::ALL {
            assert_eq!(variant.to_string().parse::<ExperimentVariant>(), Ok(variant));
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(
            "Figure3-Boltzmann".parse::<ExperimentVariant>(),
            Ok(ExperimentVariant::Figure3Boltzmann)
        );
        assert!("figure2".parse::<ExperimentVariant>().is_err());
    }

    #[rstest]
    #[case(ExperimentVariant::Figure1, "figure1_results.csv", "run_figure1.o")]
    #[case(ExperimentVariant::Figure3Gamma, "figure3_gamma_results.csv", "run_figure3.o")]
    #[case(ExperimentVariant::Figure3Epsilon, "figure3_epsilon_results.csv", "run_figure3_eps.o")]
    #[case(ExperimentVariant::Figure3Boltzmann, "figure3_boltzmann_results.csv", "run_figure3_beta.o")]
    #[case(ExperimentVariant::PolicyCount, "policy_counts.csv", "run_policy_count.o")]
    #[case(ExperimentVariant::PolicyCountEpsilon, "policy_counts_epsilon.csv", "run_policy_count_eps.o")]
    fn file_names(
        #[case] variant: ExperimentVariant,
        #[case] cache: &str,
        #[case] filter: &str,
    ) {
        assert_eq!(variant.cache_file_name(), cache);
        assert_eq!(variant.file_filter(), filter);
    }

    #[test]
    fn figure1_labels() {
        let variant = ExperimentVariant::Figure1;
        assert_eq!(variant.title(Some(KeyPart::Int(5))), "5 samples per (s,a) pair");
        assert_eq!(
            variant.series_label(Partition::Testing, Some(KeyPart::Int(5))),
            "Testing Loss"
        );
        assert_eq!(
            variant.chart_file_name(Some(KeyPart::Int(5))),
            "figure1_results_5.png"
        );
        assert_eq!(variant.confidence_method(), ConfidenceMethod::StudentT);
    }

    #[test]
    fn figure3_labels() {
        let variant = ExperimentVariant::Figure3Boltzmann;
        assert_eq!(
            variant.series_label(Partition::All, Some(KeyPart::Int(20))),
            "20 trajectories"
        );
        assert_eq!(
            variant.chart_file_name(Some(KeyPart::Int(20))),
            "figure3_boltzmann_results.png"
        );
        assert_eq!(variant.x_range(), Some((-0.1, 1.0)));
        assert_eq!(variant.x_label(), "Beta");
        assert!(variant.reports_failure_rate());
    }
}
