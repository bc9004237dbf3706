use crate::api::analysis_settings::AnalysisSettings;
use crate::api::errors::AnalysisError;
use crate::api::traits::{Progress, RecordSource, RendersSummaries};
use crate::implementation::aggregate::result_aggregator::ResultAggregator;
use crate::implementation::summarize::summaries::{summarize, Summaries};
use crate::utilities::io::concatenate::{concatenate_files, ConcatenationReport};
use crate::utilities::io::file_finder::find_result_files;

/// Concatenates the variant's raw result files into its cache CSV.
///
/// Returns [`None`] without touching the filesystem when
/// [`AnalysisSettings::skip_concatenation`] is set.
pub fn prepare_records(
    settings: &AnalysisSettings,
    progress: &impl Progress,
) -> Result<Option<ConcatenationReport>, AnalysisError> {
    if settings.skip_concatenation {
        return Ok(None);
    }

    let files = find_result_files(&settings.input_dir, settings.variant.file_filter())?;
    let report = concatenate_files(&files, &settings.cache_path(), progress)?;
    Ok(Some(report))
}

/// Ingests every record of `source`, summarizes the groups and hands the result
/// to `renderer`.
///
/// # Arguments
/// * `settings` - Variant, confidence method and trial count of the run.
/// * `source` - Supplies the concatenated record lines.
/// * `renderer` - Receives the finished summaries.
///
/// # Returns
/// The summaries that were rendered.
///
/// # Errors
///
/// Fails fast on the first invalid setting, unreadable or malformed record,
/// degenerate group or renderer failure.
pub fn run_analysis<S, R>(
    settings: &AnalysisSettings,
    source: &mut S,
    renderer: &mut R,
) -> Result<Summaries, AnalysisError>
where
    S: RecordSource + ?Sized,
    R: RendersSummaries + ?Sized,
{
    settings.validate()?;
    let schema = settings.variant.schema()?;

    let mut aggregator = ResultAggregator::new(&schema);
    aggregator.ingest(source.lines()?)?;
    let groups = aggregator.finish();

    let summaries = summarize(&groups, settings.confidence_method, settings.trials)?;
    renderer.render(settings.variant, &summaries)?;
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::enums::{ExperimentVariant, Partition, TrialCount};
    use crate::api::traits::{InMemorySource, NoProgress};
    use crate::records::group_key::GroupKey;
    use crate::records::key_part::KeyPart;
    use crate::utilities::io::csv_file_source::CsvFileSource;
    use crate::utilities::tests::sample_records::SPLIT_SCENARIO;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRenderer {
        rendered: Vec<(ExperimentVariant, usize)>,
    }

    impl RendersSummaries for RecordingRenderer {
        fn render(
            &mut self,
            variant: ExperimentVariant,
            summaries: &Summaries,
        ) -> Result<(), AnalysisError> {
            self.rendered.push((variant, summaries.len()));
            Ok(())
        }
    }

    struct FailingRenderer;

    impl RendersSummaries for FailingRenderer {
        fn render(&mut self, _: ExperimentVariant, _: &Summaries) -> Result<(), AnalysisError> {
            Err(AnalysisError::Render("no display".to_string()))
        }
    }

    #[test]
    fn runs_without_file_or_display_access() {
        let settings = AnalysisSettings::new(ExperimentVariant::Figure1);
        let mut source = InMemorySource::new(SPLIT_SCENARIO);
        let mut renderer = RecordingRenderer::default();

        let summaries = run_analysis(&settings, &mut source, &mut renderer).unwrap();

        assert_eq!(renderer.rendered, vec![(ExperimentVariant::Figure1, 3)]);
        let key = GroupKey::pair(KeyPart::Int(2), KeyPart::float(0.0).unwrap());
        let training = summaries.get(Partition::Training, &key).unwrap();
        assert_eq!(training.mean, -80.0);
        assert_eq!(training.half_width, 0.0);
    }

    #[test]
    fn renderer_errors_are_propagated() {
        let settings = AnalysisSettings::new(ExperimentVariant::PolicyCount);
        let mut source = InMemorySource::new(["0.5,3"]);

        let result = run_analysis(&settings, &mut source, &mut FailingRenderer);
        assert!(matches!(result, Err(AnalysisError::Render(_))));
    }

    #[test]
    fn parse_errors_abort_before_rendering() {
        let settings = AnalysisSettings::new(ExperimentVariant::PolicyCount);
        let mut source = InMemorySource::new(["0.5,3", "0.5"]);
        let mut renderer = RecordingRenderer::default();

        let result = run_analysis(&settings, &mut source, &mut renderer);
        assert!(matches!(result, Err(AnalysisError::Parse(_))));
        assert!(renderer.rendered.is_empty());
    }

    #[test]
    fn concatenates_then_analyzes_from_disk() {
        let input_dir = TempDir::new().unwrap();
        let work_dir = TempDir::new().unwrap();
        fs::write(input_dir.path().join("run_figure3.o1"), "5,0.1,-10.0\n").unwrap();
        fs::write(input_dir.path().join("run_figure3.o2"), "5,0.1,-20.0\n").unwrap();
        fs::write(input_dir.path().join("run_figure3.o3"), "").unwrap();
        fs::write(input_dir.path().join("run_figure3_eps.o1"), "5,0.1,-99.0\n").unwrap();

        let mut settings = AnalysisSettings::new(ExperimentVariant::Figure3Gamma);
        settings.input_dir = input_dir.path().to_path_buf();
        settings.work_dir = work_dir.path().to_path_buf();
        settings.trials = TrialCount::Observed;

        let report = prepare_records(&settings, &NoProgress).unwrap().unwrap();
        assert_eq!(report.files_read, 3);
        assert_eq!(report.empty_files, 1);

        let mut source = CsvFileSource::new(settings.cache_path());
        let mut renderer = RecordingRenderer::default();
        let summaries = run_analysis(&settings, &mut source, &mut renderer).unwrap();

        let key = GroupKey::pair(KeyPart::Int(5), KeyPart::float(0.1).unwrap());
        let summary = summaries.get(Partition::All, &key).unwrap();
        assert_eq!(summary.mean, -15.0);
        assert_eq!(summary.count, 2);
        // 1.96 * 5 / sqrt(2)
        assert!((summary.half_width - 6.929_646_455_628_166).abs() < 1e-9);

        // Reusing the cache yields the same result.
        settings.skip_concatenation = true;
        assert!(prepare_records(&settings, &NoProgress).unwrap().is_none());
        let mut source = CsvFileSource::new(settings.cache_path());
        let again = run_analysis(&settings, &mut source, &mut renderer).unwrap();
        assert_eq!(summaries, again);
    }
}
