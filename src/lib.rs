//! # sweep-stats
//! Groups the raw result rows of a reinforcement learning parameter sweep and reduces
//! each group to a mean with a confidence half-width, ready for plotting.
//!
//! The typical flow is:
//! - Concatenate the per-run output files into a cache CSV ([`utilities::io::concatenate`])
//! - Ingest the CSV into groups ([`implementation::aggregate::result_aggregator`])
//! - Summarize the groups ([`implementation::summarize::summaries`])
//! - Hand the summaries to a renderer ([`api::analyzer::run_analysis`])

/// Public High Level API
pub mod api {
    pub mod enums {
        pub mod confidence_method;
        pub mod experiment_variant;
        pub mod field_kind;
        pub mod field_role;
        pub mod partition;
        pub mod trial_count;

        pub use confidence_method::*;
        pub use experiment_variant::*;
        pub use field_kind::*;
        pub use field_role::*;
        pub use partition::*;
        pub use trial_count::*;
    }

    pub mod traits;

    /// Explicit configuration for a single analysis run.
    pub mod analysis_settings;

    /// Entry point tying together ingest, summary and rendering.
    pub mod analyzer;

    /// Errors surfaced by the library.
    pub mod errors;
}

/// Data structures describing a single result record and the keys derived from it.
pub mod records {
    /// Describes a single column within a result record.
    pub mod field_spec;

    /// Composite key used to bucket observations.
    pub mod group_key;

    /// Single component of a [`group_key::GroupKey`].
    pub mod key_part;

    /// A record after its fields were converted to their declared types.
    pub mod parsed_record;

    /// Declared column layout of a result record.
    pub mod record_schema;
}

pub mod implementation {
    pub mod aggregate {
        /// Values grouped per partition and key.
        pub mod grouped_values;

        /// Streams records into [`grouped_values::GroupedValues`].
        pub mod result_aggregator;
    }

    pub mod summarize {
        /// Mean, deviation and confidence half-width of a single group.
        pub mod group_summary;

        /// Confidence half-width formulas.
        pub mod half_width;

        /// Reduction of every group into a [`group_summary::GroupSummary`].
        pub mod summaries;
    }
}

pub mod utilities {
    #[cfg(test)]
    pub mod tests {
        pub mod sample_records;
    }

    pub mod io {
        /// Concatenates the raw result files into a single cache CSV.
        pub mod concatenate;

        /// Reads record lines back out of a cache CSV.
        pub mod csv_file_source;

        /// Finds result files by file name filter.
        pub mod file_finder;
    }

    pub mod math;
}

pub mod prelude;
