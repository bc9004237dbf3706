use crate::api::enums::experiment_variant::ExperimentVariant;
use crate::api::errors::AnalysisError;
use crate::implementation::summarize::summaries::Summaries;

/// Receives the finished summaries of a run, e.g. to draw them as charts.
pub trait RendersSummaries {
    /// Renders the summaries of `variant`.
    ///
    /// Implementations report their own failures as [`AnalysisError::Render`].
    fn render(&mut self, variant: ExperimentVariant, summaries: &Summaries)
        -> Result<(), AnalysisError>;
}

/// A renderer which draws nothing. Used when only the numbers are of interest.
pub struct NoRender;

impl RendersSummaries for NoRender {
    fn render(
        &mut self,
        _variant: ExperimentVariant,
        _summaries: &Summaries,
    ) -> Result<(), AnalysisError> {
        Ok(())
    }
}
