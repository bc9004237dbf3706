mod plots;
mod report;

use argh::FromArgs;
use bytesize::ByteSize;
use core::num::NonZeroU32;
use indicatif::{ProgressBar, ProgressStyle};
use plots::{condition_coverage, PlotRenderer};
use report::{format_summary_table, write_json_summary};
use std::path::PathBuf;
use sweep_stats::prelude::*;

/// Resolution of the concatenation progress bar.
const PROGRESS_TICKS: u64 = 1000;

/// Number of incomplete groups listed before the rest are summarized as a count.
const MAX_LISTED_GROUPS: usize = 5;

/// Aggregates parameter sweep results and plots them with confidence intervals
#[derive(FromArgs, Debug)]
pub struct Args {
    /// experiment variant: figure1, figure3-gamma, figure3-epsilon, figure3-boltzmann,
    /// policy-count, policy-count-epsilon (default: figure1)
    #[argh(option, short = 'v', default = "ExperimentVariant::Figure1")]
    variant: ExperimentVariant,

    /// directory scanned for result files (default: current directory)
    #[argh(option, short = 'i', default = "PathBuf::from(\".\")")]
    input_dir: PathBuf,

    /// directory the cache CSV, charts and JSON are written to (default: current directory)
    #[argh(option, short = 'w', default = "PathBuf::from(\".\")")]
    work_dir: PathBuf,

    /// reuse the existing cache CSV instead of concatenating the result files
    #[argh(switch, short = 'n')]
    no_parse: bool,

    /// trial count used for the confidence interval (default: 1000)
    #[argh(option, short = 't')]
    trials: Option<u32>,

    /// use the number of values in each group as its trial count
    #[argh(switch)]
    observed_trials: bool,

    /// also write the summaries as JSON
    #[argh(switch)]
    json: bool,

    /// skip drawing the charts
    #[argh(switch)]
    no_plot: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = argh::from_env();
    let settings = settings_from_args(&args)?;

    // Validate arguments
    if !settings.skip_concatenation && !settings.input_dir.is_dir() {
        return Err("Input directory does not exist".into());
    }

    if !settings.work_dir.is_dir() {
        return Err("Work directory does not exist".into());
    }

    settings.validate()?;

    println!("📊 Analyzing {} results", settings.variant);
    println!("Input directory: {}", settings.input_dir.display());
    println!("Cache file: {}", settings.cache_path().display());
    println!("Confidence method: {}", settings.confidence_method);
    match settings.trials {
        TrialCount::Fixed(trials) => println!("Trial count: {}", trials),
        TrialCount::Observed => println!("Trial count: observed per group"),
    }

    if settings.skip_concatenation {
        println!("⏭️  Reusing existing cache file");
    } else {
        let report = concatenate_with_progress(&settings)?;
        println!(
            "📁 Concatenated {} files ({} records, {})",
            report.files_read,
            report.lines_written,
            ByteSize(report.bytes_written)
        );

        if settings.variant.reports_failure_rate() {
            let expected = expected_runs(&settings);
            println!(
                "Failure rate: {}/{} = {}",
                report.empty_files,
                expected,
                report.failure_rate(expected)
            );
        }
    }

    let mut source = CsvFileSource::new(settings.cache_path());
    let summaries = if args.no_plot {
        run_analysis(&settings, &mut source, &mut NoRender)?
    } else {
        let mut renderer = PlotRenderer::new(&settings.work_dir);
        let summaries = run_analysis(&settings, &mut source, &mut renderer)?;
        for chart in renderer.written() {
            println!("🖼️  Wrote {}", chart.display());
        }
        if renderer.written().is_empty() {
            eprintln!("⚠️  Warning: no preset condition has results, no charts were drawn");
        }
        summaries
    };

    let coverage = condition_coverage(settings.variant, &summaries);
    for condition in coverage.missing {
        eprintln!(
            "⚠️  Warning: condition {} has no results and was not drawn",
            condition
        );
    }
    for condition in coverage.unlisted {
        eprintln!(
            "⚠️  Warning: condition {} is not one of the {} presets and was not drawn",
            condition, settings.variant
        );
    }

    warn_incomplete_groups(&settings, &summaries);

    println!();
    println!("{}", format_summary_table(settings.variant, &summaries));

    if args.json {
        let path = write_json_summary(&settings, &summaries, &settings.work_dir)?;
        println!("💾 Wrote {}", path.display());
    }

    println!("✅ Analysis complete");
    Ok(())
}

/// Resolves the command line into [`AnalysisSettings`].
fn settings_from_args(args: &Args) -> Result<AnalysisSettings, Box<dyn std::error::Error>> {
    let mut settings = AnalysisSettings::new(args.variant);
    settings.input_dir = args.input_dir.clone();
    settings.work_dir = args.work_dir.clone();
    settings.skip_concatenation = args.no_parse;

    match (args.trials, args.observed_trials) {
        (Some(_), true) => {
            return Err("--trials and --observed-trials cannot be combined".into());
        }
        (Some(trials), false) => {
            let trials = NonZeroU32::new(trials).ok_or("Trial count must be at least 1")?;
            settings.trials = TrialCount::Fixed(trials);
        }
        (None, true) => settings.trials = TrialCount::Observed,
        (None, false) => {}
    }

    Ok(settings)
}

/// Number of runs each sweep point was launched with.
fn expected_runs(settings: &AnalysisSettings) -> u32 {
    match settings.trials {
        TrialCount::Fixed(trials) => trials.get(),
        TrialCount::Observed => settings.variant.default_trials().get(),
    }
}

fn concatenate_with_progress(
    settings: &AnalysisSettings,
) -> Result<ConcatenationReport, AnalysisError> {
    let bar = ProgressBar::new(PROGRESS_TICKS);
    bar.set_style(
        ProgressStyle::with_template("Concatenating [{bar:40}] {percent}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let progress = ProgressCallback::new(|fraction: f64| {
        bar.set_position((fraction * PROGRESS_TICKS as f64) as u64);
    });
    let report = prepare_records(settings, &progress);
    bar.finish_and_clear();

    Ok(report?.unwrap_or_default())
}

/// Warns about groups whose size differs from the fixed trial count.
fn warn_incomplete_groups(settings: &AnalysisSettings, summaries: &Summaries) {
    let TrialCount::Fixed(trials) = settings.trials else {
        return;
    };

    let incomplete = summaries.incomplete_groups(trials.get());
    if incomplete.is_empty() {
        return;
    }

    eprintln!(
        "⚠️  Warning: {} groups do not hold {} values, their intervals still assume {} trials (see --observed-trials)",
        incomplete.len(),
        trials,
        trials
    );
    for (partition, key, count) in incomplete.iter().take(MAX_LISTED_GROUPS) {
        eprintln!("   {} {}: {} values", partition, key, count);
    }
    if incomplete.len() > MAX_LISTED_GROUPS {
        eprintln!("   ... and {} more", incomplete.len() - MAX_LISTED_GROUPS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, argh::EarlyExit> {
        Args::from_args(&["sweep-plotter"], args)
    }

    #[test]
    fn defaults_match_figure1() {
        let settings = settings_from_args(&parse(&[]).unwrap()).unwrap();

        assert_eq!(settings.variant, ExperimentVariant::Figure1);
        assert_eq!(settings.confidence_method, ConfidenceMethod::StudentT);
        assert_eq!(settings.trials, TrialCount::Fixed(DEFAULT_TRIALS));
        assert!(!settings.skip_concatenation);
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&["-v", "figure3-boltzmann", "-n", "-t", "200", "-w", "out"]).unwrap();
        let settings = settings_from_args(&args).unwrap();

        assert_eq!(settings.variant, ExperimentVariant::Figure3Boltzmann);
        assert_eq!(settings.trials, TrialCount::Fixed(NonZeroU32::new(200).unwrap()));
        assert!(settings.skip_concatenation);
        assert_eq!(settings.cache_path(), PathBuf::from("out").join("figure3_boltzmann_results.csv"));
        assert_eq!(expected_runs(&settings), 200);
    }

    #[test]
    fn observed_trials() {
        let settings = settings_from_args(&parse(&["--observed-trials"]).unwrap()).unwrap();
        assert_eq!(settings.trials, TrialCount::Observed);
        assert_eq!(expected_runs(&settings), 1000);
    }

    #[test]
    fn conflicting_or_zero_trials_are_rejected() {
        assert!(settings_from_args(&parse(&["-t", "5", "--observed-trials"]).unwrap()).is_err());
        assert!(settings_from_args(&parse(&["-t", "0"]).unwrap()).is_err());
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(parse(&["-v", "figure2"]).is_err());
    }
}
