/// Maps a parsed record onto its group key, value and partition.
pub mod extracts_observation;
/// Used for reporting progress to external callers.
pub mod progress;
/// Supplies raw record lines to the aggregator.
pub mod record_source;
/// Receives finished summaries, e.g. to draw them.
pub mod renders_summaries;

/// Prelude with re-exports
pub use extracts_observation::*;
pub use progress::*;
pub use record_source::*;
pub use renders_summaries::*;
