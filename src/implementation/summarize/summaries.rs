use super::group_summary::GroupSummary;
use super::half_width::half_width;
use crate::api::enums::{ConfidenceMethod, Partition, TrialCount};
use crate::api::errors::AnalysisError;
use crate::implementation::aggregate::grouped_values::GroupedValues;
use crate::records::group_key::GroupKey;
use crate::records::key_part::KeyPart;
use crate::utilities::math::{mean, population_std_dev};
use derive_new::new;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summaries of a single partition, ascending by key.
pub type PartitionSummaries = BTreeMap<GroupKey, GroupSummary>;

/// A single point of a plotted line series.
#[derive(new, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Swept parameter value.
    pub x: f64,
    pub mean: f64,
    pub half_width: f64,
}

/// Flat representation of one summarized group, used for export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub partition: Partition,
    pub key: GroupKey,
    #[serde(flatten)]
    pub summary: GroupSummary,
}

/// Summary statistics of every group, ordered by partition and key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summaries {
    partitions: BTreeMap<Partition, PartitionSummaries>,
}

impl Summaries {
    /// Returns the summaries of a single partition.
    pub fn partition(&self, partition: Partition) -> Option<&PartitionSummaries> {
        self.partitions.get(&partition)
    }

    /// Partitions present, ascending.
    pub fn partitions(&self) -> impl Iterator<Item = Partition> + '_ {
        self.partitions.keys().copied()
    }

    /// Returns the summary of a single group.
    pub fn get(&self, partition: Partition, key: &GroupKey) -> Option<&GroupSummary> {
        self.partitions
            .get(&partition)
            .and_then(|groups| groups.get(key))
    }

    /// Number of summarized groups across all partitions.
    pub fn len(&self) -> usize {
        self.partitions.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all groups, ascending by partition then key.
    pub fn iter(&self) -> impl Iterator<Item = (Partition, &GroupKey, &GroupSummary)> {
        self.partitions.iter().flat_map(|(partition, groups)| {
            groups
                .iter()
                .map(move |(key, summary)| (*partition, key, summary))
        })
    }

    /// Flattens the summaries for serialization.
    pub fn entries(&self) -> Vec<SummaryEntry> {
        self.iter()
            .map(|(partition, key, summary)| SummaryEntry {
                partition,
                key: *key,
                summary: *summary,
            })
            .collect()
    }

    /// Distinct outer conditions of a partition, ascending.
    ///
    /// Single-key variants yield exactly one [`None`] condition.
    pub fn conditions(&self, partition: Partition) -> Vec<Option<KeyPart>> {
        let Some(groups) = self.partitions.get(&partition) else {
            return Vec::new();
        };

        // Keys are sorted by outer condition first, so duplicates are adjacent.
        let mut conditions: Vec<Option<KeyPart>> = groups.keys().map(|key| key.outer).collect();
        conditions.dedup();
        conditions
    }

    /// Line series for one outer condition of a partition, ascending by the swept parameter.
    pub fn series(&self, partition: Partition, outer: Option<KeyPart>) -> Vec<SeriesPoint> {
        let Some(groups) = self.partitions.get(&partition) else {
            return Vec::new();
        };

        groups
            .iter()
            .filter(|(key, _)| key.outer == outer)
            .map(|(key, summary)| {
                SeriesPoint::new(key.inner.as_f64(), summary.mean, summary.half_width)
            })
            .collect()
    }

    /// Groups whose size differs from `expected_trials`.
    ///
    /// With a fixed trial count these groups get a half-width which does not reflect
    /// the number of values they actually contain.
    pub fn incomplete_groups(&self, expected_trials: u32) -> Vec<(Partition, GroupKey, usize)> {
        self.iter()
            .filter(|(_, _, summary)| summary.count != expected_trials as usize)
            .map(|(partition, key, summary)| (partition, *key, summary.count))
            .collect()
    }
}

/// Reduces every group to its mean, population standard deviation and confidence half-width.
///
/// # Arguments
/// * `groups` - Grouped values, typically produced by [`ingest`].
/// * `method` - Formula for the half-width.
/// * `trials` - Trial count fed into the formula.
///
/// # Errors
///
/// - [`AnalysisError::EmptyGroup`] if a group holds no values.
/// - [`AnalysisError::NonFiniteStatistic`] if a statistic comes out NaN or infinite.
/// - [`AnalysisError::InvalidTrialCount`] if the trial count cannot be used with `method`.
///
/// [`ingest`]: crate::implementation::aggregate::result_aggregator::ingest
pub fn summarize(
    groups: &GroupedValues,
    method: ConfidenceMethod,
    trials: TrialCount,
) -> Result<Summaries, AnalysisError> {
    let mut summaries = Summaries::default();

    // Walk partitions and keys in ascending order so the first failing group is stable.
    for partition in groups.partitions() {
        let Some(group_map) = groups.partition(partition) else {
            continue;
        };
        let mut keys: Vec<(&GroupKey, &Vec<f64>)> = group_map.iter().collect();
        keys.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut partition_summaries = PartitionSummaries::new();
        for (key, values) in keys {
            if values.is_empty() {
                return Err(AnalysisError::EmptyGroup {
                    partition,
                    key: *key,
                });
            }

            let mean = mean(values);
            let std_dev = population_std_dev(values, mean);
            let group_trials = trials.resolve(values.len());
            let half_width = half_width(method, std_dev, group_trials)?;

            if !mean.is_finite() || !std_dev.is_finite() || !half_width.is_finite() {
                return Err(AnalysisError::NonFiniteStatistic {
                    partition,
                    key: *key,
                });
            }

            partition_summaries.insert(
                *key,
                GroupSummary::new(mean, std_dev, half_width, values.len(), group_trials),
            );
        }

        summaries.partitions.insert(partition, partition_summaries);
    }

    Ok(summaries)
}
