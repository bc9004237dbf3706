use itertools::Itertools;

/// Generates figure1 style records: every sample count and gamma, `runs` times,
/// alternating between the training and testing split.
pub fn generate_figure1_lines(gammas: usize, runs: usize) -> Vec<String> {
    let samples = [2, 5, 10, 20];
    let gammas: Vec<f64> = (0..gammas).map(|x| x as f64 / gammas as f64).collect();

    samples
        .iter()
        .cartesian_product(gammas.iter())
        .cartesian_product(0..runs)
        .map(|((samples, gamma), run)| {
            format!("{},{},{},{}", samples, gamma, run % 2, -((run % 97) as f64) - 0.5)
        })
        .collect()
}
