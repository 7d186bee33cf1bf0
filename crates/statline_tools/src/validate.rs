//! Data validation utilities.

use std::path::{Path, PathBuf};

use statline_core::convert::classify;
use tracing::{debug, warn};

use crate::batch::{load_record, record_files};
use crate::error::Result;

/// Problems found in one record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// File checked.
    pub file: PathBuf,
    /// Problems found; empty when the file is valid.
    pub problems: Vec<String>,
}

impl FileReport {
    /// Whether the file has no problems.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Check one record file: it must parse, be internally consistent and
/// belong to a convertible category.
pub fn validate_file(path: &Path) -> FileReport {
    let problems = match load_record(path) {
        Ok(record) => {
            let mut problems = record.validate();
            if let Err(e) = classify(&record) {
                problems.push(e.to_string());
            }
            problems
        }
        Err(e) => vec![e.to_string()],
    };
    for problem in &problems {
        warn!(file = %path.display(), "{problem}");
    }
    FileReport {
        file: path.to_path_buf(),
        problems,
    }
}

/// Validate all RON record files in a directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed. Problems inside
/// individual files are reported, not returned as errors.
pub fn validate_data_directory(path: &Path) -> Result<Vec<FileReport>> {
    let reports: Vec<FileReport> = record_files(path)?
        .iter()
        .map(|file| validate_file(file))
        .collect();
    debug!(
        path = %path.display(),
        files = reports.len(),
        invalid = reports.iter().filter(|r| !r.is_valid()).count(),
        "Validated data directory"
    );
    Ok(reports)
}
