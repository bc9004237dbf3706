use crate::api::errors::AnalysisError;
use crate::api::traits::record_source::RecordSource;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Reads record lines from a concatenated cache CSV.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvFileSource {
    fn lines(
        &mut self,
    ) -> Result<Box<dyn Iterator<Item = Result<String, AnalysisError>> + '_>, AnalysisError> {
        let file = File::open(&self.path).map_err(|e| AnalysisError::file_access(&self.path, e))?;
        let path = &self.path;

        Ok(Box::new(BufReader::new(file).lines().map(move |line| {
            line.map_err(|e| AnalysisError::file_access(path, e))
        })))
    }
}
