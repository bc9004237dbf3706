use crate::api::errors::AnalysisError;
use std::fs::read_dir;
use std::path::{Path, PathBuf};

/// Finds every regular file directly inside `directory_path` whose file name
/// contains `filter`.
///
/// Subdirectories are not searched. The result is sorted by file name so that
/// the concatenated output is stable between runs.
///
/// # Arguments
///
/// * `directory_path` - The full path to the directory to search
/// * `filter` - Substring the file name must contain, e.g. `run_figure1.o`
///
/// # Errors
///
/// Returns [`AnalysisError::FileAccess`] if the directory or one of its entries
/// cannot be read.
pub fn find_result_files<P>(directory_path: P, filter: &str) -> Result<Vec<PathBuf>, AnalysisError>
where
    P: AsRef<Path>,
{
    let directory_path = directory_path.as_ref();
    let access_error = |e| AnalysisError::file_access(directory_path, e);

    let mut files = Vec::new();
    for entry in read_dir(directory_path).map_err(access_error)? {
        let entry = entry.map_err(access_error)?;
        let file_type = entry.file_type().map_err(access_error)?;
        if !file_type.is_file() {
            continue;
        }

        if entry.file_name().to_string_lossy().contains(filter) {
            files.push(entry.path());
        }
    }

    files.sort_unstable_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, content: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        write!(file, "{}", content).unwrap();
    }

    #[test]
    fn selects_matching_files_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path();
        touch(base_path, "run_figure1.o1002", "2,0.1,0,1.0\n");
        touch(base_path, "run_figure1.o1001", "2,0.1,1,1.0\n");
        touch(base_path, "run_figure3.o1001", "5,0.1,1.0\n");
        touch(base_path, "notes.txt", "");

        let files = find_result_files(base_path, "run_figure1.o").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["run_figure1.o1001", "run_figure1.o1002"]);
    }

    #[test]
    fn similar_prefixes_are_not_confused() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path();
        touch(base_path, "run_figure3.o17", "");
        touch(base_path, "run_figure3_eps.o17", "");
        touch(base_path, "run_figure3_beta.o17", "");

        assert_eq!(find_result_files(base_path, "run_figure3.o").unwrap().len(), 1);
        assert_eq!(find_result_files(base_path, "run_figure3_eps.o").unwrap().len(), 1);
    }

    #[test]
    fn skips_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path();
        create_dir(base_path.join("run_figure1.o_dir")).unwrap();

        let files = find_result_files(base_path, "run_figure1.o").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn handles_invalid_directory() {
        let result = find_result_files("nonexistent_directory", "run_figure1.o");
        assert!(matches!(result, Err(AnalysisError::FileAccess { .. })));
    }
}
