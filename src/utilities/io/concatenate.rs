use crate::api::errors::AnalysisError;
use crate::api::traits::progress::Progress;
use derive_new::new;
use memchr::memchr_iter;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Outcome of concatenating a set of result files.
#[derive(new, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConcatenationReport {
    /// Number of source files read.
    pub files_read: usize,

    /// Number of source files with no content. A run which crashed leaves an empty file.
    pub empty_files: usize,

    /// Number of record lines written to the output.
    pub lines_written: usize,

    /// Size of the output in bytes.
    pub bytes_written: u64,
}

impl ConcatenationReport {
    /// Fraction of the expected runs which left no output.
    pub fn failure_rate(&self, expected_runs: u32) -> f64 {
        if expected_runs == 0 {
            return 0.0;
        }

        self.empty_files as f64 / expected_runs as f64
    }
}

/// Concatenates `files`, in order, into a single CSV at `output_path`.
///
/// The contents are copied verbatim, except that a newline is appended to any
/// file which does not end with one, so records of neighbouring files never merge.
/// An existing file at `output_path` is overwritten.
///
/// # Arguments
/// * `files` - Source files, typically from [`find_result_files`].
/// * `output_path` - Path of the cache CSV.
/// * `progress` - Receives the fraction of files processed after each file.
///
/// [`find_result_files`]: crate::utilities::io::file_finder::find_result_files
pub fn concatenate_files(
    files: &[PathBuf],
    output_path: &Path,
    progress: &impl Progress,
) -> Result<ConcatenationReport, AnalysisError> {
    let output = File::create(output_path)
        .map_err(|e| AnalysisError::file_access(output_path, e))?;
    let mut writer = BufWriter::new(output);
    let write_error = |e| AnalysisError::file_access(output_path, e);

    let mut report = ConcatenationReport::default();
    for (index, file) in files.iter().enumerate() {
        let data = fs::read(file).map_err(|e| AnalysisError::file_access(file, e))?;
        report.files_read += 1;

        if data.is_empty() {
            report.empty_files += 1;
        } else {
            writer.write_all(&data).map_err(write_error)?;
            report.bytes_written += data.len() as u64;
            report.lines_written += memchr_iter(b'\n', &data).count();

            if data.last() != Some(&b'\n') {
                writer.write_all(b"\n").map_err(write_error)?;
                report.bytes_written += 1;
                report.lines_written += 1;
            }
        }

        progress.report_progress((index + 1) as f64 / files.len() as f64);
    }

    writer.flush().map_err(write_error)?;
    Ok(report)
}
