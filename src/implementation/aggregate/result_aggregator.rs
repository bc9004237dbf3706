use super::grouped_values::GroupedValues;
use crate::api::errors::{AnalysisError, ParseError};
use crate::api::traits::extracts_observation::ExtractsObservation;
use crate::records::record_schema::RecordSchema;

/// Anything the aggregator can accept as a single record line.
pub trait IntoRecordLine {
    type Line: AsRef<str>;

    /// Unwraps the line, surfacing any error that occurred while reading it.
    fn into_record_line(self) -> Result<Self::Line, AnalysisError>;
}

impl<'a> IntoRecordLine for &'a str {
    type Line = &'a str;

    fn into_record_line(self) -> Result<Self::Line, AnalysisError> {
        Ok(self)
    }
}

impl IntoRecordLine for String {
    type Line = String;

    fn into_record_line(self) -> Result<Self::Line, AnalysisError> {
        Ok(self)
    }
}

/// Path reported for read errors of lines which do not come from a named file.
pub const UNNAMED_STREAM: &str = "<stream>";

impl IntoRecordLine for std::io::Result<String> {
    type Line = String;

    fn into_record_line(self) -> Result<Self::Line, AnalysisError> {
        self.map_err(|e| AnalysisError::file_access(UNNAMED_STREAM, e))
    }
}

impl IntoRecordLine for Result<String, AnalysisError> {
    type Line = String;

    fn into_record_line(self) -> Result<Self::Line, AnalysisError> {
        self
    }
}

/// Streams result records into [`GroupedValues`].
///
/// Each line is parsed with the [`RecordSchema`], then handed to an
/// [`ExtractsObservation`] implementation which names the group, the value and the
/// partition. By default the schema itself acts as the extractor.
///
/// Line numbers keep counting across multiple calls to [`ResultAggregator::ingest`],
/// so errors point at the right line of a concatenated input.
pub struct ResultAggregator<'a, E: ExtractsObservation = RecordSchema> {
    schema: &'a RecordSchema,
    extractor: &'a E,
    groups: GroupedValues,
    lines_read: usize,
}

impl<'a> ResultAggregator<'a, RecordSchema> {
    /// Creates an aggregator which extracts keys and values using the schema's field roles.
    pub fn new(schema: &'a RecordSchema) -> Self {
        Self::with_extractor(schema, schema)
    }
}

impl<'a, E: ExtractsObservation> ResultAggregator<'a, E> {
    /// Creates an aggregator with a custom extractor.
    pub fn with_extractor(schema: &'a RecordSchema, extractor: &'a E) -> Self {
        Self {
            schema,
            extractor,
            groups: GroupedValues::new(),
            lines_read: 0,
        }
    }

    /// Parses a single line and appends its value to the matching group.
    pub fn push_line(&mut self, line: &str) -> Result<(), ParseError> {
        self.lines_read += 1;
        let record = self.schema.parse_line(line, self.lines_read)?;
        let key = self.extractor.key(&record)?;
        let value = self.extractor.value(&record)?;
        let partition = self.extractor.partition(&record)?;
        self.groups.push(partition, key, value);
        Ok(())
    }

    /// Consumes every line of `lines`.
    ///
    /// # Errors
    ///
    /// Aborts on the first line that fails to read or parse. Values pushed by
    /// earlier lines stay in the aggregator.
    pub fn ingest<I>(&mut self, lines: I) -> Result<(), AnalysisError>
    where
        I: IntoIterator,
        I::Item: IntoRecordLine,
    {
        for line in lines {
            let line = line.into_record_line()?;
            self.push_line(line.as_ref())?;
        }

        Ok(())
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Freezes the groups for reduction.
    pub fn finish(self) -> GroupedValues {
        self.groups
    }
}

/// Groups all `lines` using the field roles declared by `schema`.
///
/// # Example
/// ```
/// use sweep_stats::prelude::*;
///
/// let schema = ExperimentVariant::Figure1.schema().unwrap();
/// let groups = ingest(["2,0.1,0,10.0", "2,0.1,0,20.0"], &schema).unwrap();
/// assert_eq!(groups.value_count(), 2);
/// ```
pub fn ingest<I>(lines: I, schema: &RecordSchema) -> Result<GroupedValues, AnalysisError>
where
    I: IntoIterator,
    I::Item: IntoRecordLine,
{
    let mut aggregator = ResultAggregator::new(schema);
    aggregator.ingest(lines)?;
    Ok(aggregator.finish())
}

/// Groups all `lines`, using `extractor` to derive keys, values and partitions.
pub fn ingest_with<I, E>(
    lines: I,
    schema: &RecordSchema,
    extractor: &E,
) -> Result<GroupedValues, AnalysisError>
where
    I: IntoIterator,
    I::Item: IntoRecordLine,
    E: ExtractsObservation,
{
    let mut aggregator = ResultAggregator::with_extractor(schema, extractor);
    aggregator.ingest(lines)?;
    Ok(aggregator.finish())
}
