use derive_new::new;
use serde::Serialize;

/// Summary statistics of a single group.
///
/// Computed once all records were ingested; never mutated afterwards.
#[derive(new, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupSummary {
    /// Arithmetic mean of the group's values.
    pub mean: f64,

    /// Population standard deviation of the group's values.
    pub std_dev: f64,

    /// Half-width of the confidence interval around [`Self::mean`].
    pub half_width: f64,

    /// Number of values actually present in the group.
    pub count: usize,

    /// Trial count the half-width was computed with.
    pub trials: u32,
}

impl GroupSummary {
    /// Lower and upper bound of the confidence interval.
    pub fn interval(&self) -> (f64, f64) {
        (self.mean - self.half_width, self.mean + self.half_width)
    }

    /// Returns the (mean, std_dev, half_width) triple.
    pub fn triple(&self) -> (f64, f64, f64) {
        (self.mean, self.std_dev, self.half_width)
    }
}
