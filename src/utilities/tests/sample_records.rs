//! Canned result records shared by the unit tests.

use itertools::Itertools;

/// Training/testing scenario for the sample-count sweep.
pub const SPLIT_SCENARIO: [&str; 3] = ["2,0.0,0,-80.0", "2,0.0,1,-75.0", "2,0.1,0,-78.0"];

/// Two training rows sharing key (2, 0.1).
pub const SHARED_KEY_ROWS: [&str; 2] = ["2,0.1,0,10.0", "2,0.1,0,20.0"];

/// Generates `runs_per_key` lines of `condition,parameter,loss` for every
/// combination of `conditions` and `parameters`.
///
/// Losses are deterministic: `-(condition * 10 + run)` scaled by the parameter,
/// which keeps every group's spread non-zero when `runs_per_key > 1`.
pub fn generated_sweep_lines(
    conditions: &[i64],
    parameters: &[f64],
    runs_per_key: usize,
) -> Vec<String> {
    conditions
        .iter()
        .cartesian_product(parameters.iter())
        .flat_map(|(condition, parameter)| {
            (0..runs_per_key).map(move |run| {
                let loss = -((condition * 10) as f64 + run as f64) * (1.0 + parameter);
                format!("{},{},{}", condition, parameter, loss)
            })
        })
        .collect()
}
