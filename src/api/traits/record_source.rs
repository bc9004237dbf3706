use crate::api::errors::AnalysisError;

/// Supplies the raw, comma separated record lines of a sweep.
///
/// Each call to [`RecordSource::lines`] hands out a single-pass iterator; lines are
/// consumed exactly once.
pub trait RecordSource {
    /// Opens the source and returns an iterator over its lines.
    ///
    /// Errors while reading individual lines are surfaced through the iterator
    /// items so the aggregator can abort on the first failure.
    fn lines(
        &mut self,
    ) -> Result<Box<dyn Iterator<Item = Result<String, AnalysisError>> + '_>, AnalysisError>;
}

/// A [`RecordSource`] over lines already held in memory.
pub struct InMemorySource {
    lines: Vec<String>,
}

impl InMemorySource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl RecordSource for InMemorySource {
    fn lines(
        &mut self,
    ) -> Result<Box<dyn Iterator<Item = Result<String, AnalysisError>> + '_>, AnalysisError> {
        Ok(Box::new(self.lines.drain(..).map(Ok)))
    }
}
