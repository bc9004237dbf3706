//! Console table and JSON export of the summaries

use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use sweep_stats::prelude::*;
use tabled::{Table, Tabled};
use thiserror::Error;

/// Errors that can occur while writing a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single row of the console summary table
#[derive(Debug, Clone, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Partition")]
    pub partition: String,
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Mean")]
    pub mean: String,
    #[tabled(rename = "Std Dev")]
    pub std_dev: String,
    #[tabled(rename = "± Half-width")]
    pub half_width: String,
    #[tabled(rename = "Interval")]
    pub interval: String,
    #[tabled(rename = "Count")]
    pub count: usize,
    #[tabled(rename = "Trials")]
    pub trials: u32,
}

impl SummaryRow {
    pub fn new(partition: Partition, key: &GroupKey, summary: &GroupSummary) -> Self {
        let (lower, upper) = summary.interval();
        Self {
            partition: partition.to_string(),
            key: key.to_string(),
            mean: format!("{:.4}", summary.mean),
            std_dev: format!("{:.4}", summary.std_dev),
            half_width: format!("{:.4}", summary.half_width),
            interval: format!("[{:.4}, {:.4}]", lower, upper),
            count: summary.count,
            trials: summary.trials,
        }
    }
}

/// Formats every group as an ASCII table, titled with the variant name.
pub fn format_summary_table(variant: ExperimentVariant, summaries: &Summaries) -> String {
    if summaries.is_empty() {
        return "No groups to summarize".to_string();
    }

    let rows: Vec<SummaryRow> = summaries
        .iter()
        .map(|(partition, key, summary)| SummaryRow::new(partition, key, summary))
        .collect();

    let title = format!("{} summary", variant);
    format!(
        "{}\n{}\n{}",
        title,
        "=".repeat(title.len()),
        Table::new(rows)
    )
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    variant: &'a str,
    confidence_method: String,
    groups: Vec<SummaryEntry>,
}

/// Writes the summaries to `<cache-stem>_summary.json` inside `output_dir`.
///
/// # Returns
/// The path of the written file.
pub fn write_json_summary(
    settings: &AnalysisSettings,
    summaries: &Summaries,
    output_dir: &Path,
) -> Result<PathBuf, ReportError> {
    let path = output_dir.join(format!("{}_summary.json", settings.variant.output_stem()));
    let summary = JsonSummary {
        variant: settings.variant.name(),
        confidence_method: settings.confidence_method.to_string(),
        groups: summaries.entries(),
    };

    let writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(writer, &summary)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn split_summaries() -> Summaries {
        let schema = ExperimentVariant::Figure1.schema().unwrap();
        let groups = ingest(
            ["2,0.0,0,-80.0", "2,0.0,1,-75.0", "2,0.1,0,-78.0"],
            &schema,
        )
        .unwrap();
        summarize(&groups, ConfidenceMethod::StudentT, TrialCount::Observed).unwrap()
    }

    #[test]
    fn table_lists_every_group() {
        let table = format_summary_table(ExperimentVariant::Figure1, &split_summaries());

        assert!(table.starts_with("figure1 summary\n===============\n"));
        assert!(table.contains("Half-width"));
        assert!(table.contains("-80.0000"));
        assert!(table.contains("(2, 0.1)"));
        assert!(table.contains("[-80.0000, -80.0000]"));
    }

    #[test]
    fn empty_table() {
        let table = format_summary_table(ExperimentVariant::Figure1, &Summaries::default());
        assert_eq!(table, "No groups to summarize");
    }

    #[test]
    fn json_export_contains_groups() {
        let temp_dir = TempDir::new().unwrap();
        let settings = AnalysisSettings::new(ExperimentVariant::Figure1);

        let path = write_json_summary(&settings, &split_summaries(), temp_dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str(),
            Some("figure1_results_summary.json")
        );

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["variant"], "figure1");
        let groups = json["groups"].as_array().unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0]["partition"], "training");
        assert_eq!(groups[0]["mean"], -80.0);
    }
}
