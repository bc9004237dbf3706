pub use crate::api::analysis_settings::AnalysisSettings;
pub use crate::api::analyzer::{prepare_records, run_analysis};
pub use crate::api::enums::*;
pub use crate::api::errors::{AnalysisError, ParseError};
pub use crate::api::traits::*;
pub use crate::implementation::aggregate::grouped_values::GroupedValues;
pub use crate::implementation::aggregate::result_aggregator::{
    ingest, ingest_with, ResultAggregator,
};
pub use crate::implementation::summarize::group_summary::GroupSummary;
pub use crate::implementation::summarize::summaries::{
    summarize, SeriesPoint, Summaries, SummaryEntry,
};
pub use crate::records::group_key::GroupKey;
pub use crate::records::key_part::{KeyPart, SweepValue};
pub use crate::records::record_schema::RecordSchema;
pub use crate::utilities::io::concatenate::ConcatenationReport;
pub use crate::utilities::io::csv_file_source::CsvFileSource;
