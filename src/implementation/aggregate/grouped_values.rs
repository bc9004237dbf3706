use crate::api::enums::partition::Partition;
use crate::records::group_key::GroupKey;
use ahash::RandomState;
use hashbrown::HashMap;

/// Values of a single partition, keyed by group.
pub type GroupMap = HashMap<GroupKey, Vec<f64>, RandomState>;

/// Observations grouped by partition and key.
///
/// Groups are created on first insertion and only ever appended to. The order of
/// values inside a group carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct GroupedValues {
    partitions: HashMap<Partition, GroupMap, RandomState>,
}

impl GroupedValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the group named by `partition` and `key`.
    pub fn push(&mut self, partition: Partition, key: GroupKey, value: f64) {
        self.partitions
            .entry(partition)
            .or_default()
            .entry(key)
            .or_default()
            .push(value);
    }

    /// Inserts a whole group, replacing any values already stored under `key`.
    ///
    /// Lets tests build groups which [`Self::push`] can never produce, such as empty ones.
    #[cfg(test)]
    pub(crate) fn insert_group(&mut self, partition: Partition, key: GroupKey, values: Vec<f64>) {
        self.partitions
            .entry(partition)
            .or_default()
            .insert(key, values);
    }

    /// Returns the groups of a single partition.
    pub fn partition(&self, partition: Partition) -> Option<&GroupMap> {
        self.partitions.get(&partition)
    }

    /// Returns the values of a single group.
    pub fn group(&self, partition: Partition, key: &GroupKey) -> Option<&[f64]> {
        self.partitions
            .get(&partition)
            .and_then(|groups| groups.get(key))
            .map(Vec::as_slice)
    }

    /// Partitions present in the data, ascending.
    pub fn partitions(&self) -> Vec<Partition> {
        let mut partitions: Vec<Partition> = self.partitions.keys().copied().collect();
        partitions.sort_unstable();
        partitions
    }

    /// Total number of groups across all partitions.
    pub fn group_count(&self) -> usize {
        self.partitions.values().map(|groups| groups.len()).sum()
    }

    /// Total number of values across all groups.
    pub fn value_count(&self) -> usize {
        self.partitions
            .values()
            .flat_map(|groups| groups.values())
            .map(|values| values.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.value_count() == 0
    }
}
