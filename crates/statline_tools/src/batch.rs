//! Loading and converting record files.
//!
//! A directory is converted file by file on the rayon pool. Each file's
//! outcome is kept separately so one bad record never stops the batch.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use statline_core::convert::{ConversionOptions, Converter};
use statline_core::element::ConvertedElement;
use statline_core::error::ConversionError;
use statline_core::record::{CleanCopy, SnapshotSource, UnitRecord};
use tracing::{debug, info, warn};

use crate::error::{Result, ToolError};

/// Read and parse one RON record file.
pub fn load_record(path: &Path) -> Result<UnitRecord> {
    let text = fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
    Ok(UnitRecord::from_ron(&text, &path.display().to_string())?)
}

/// Read conversion options from a RON file.
pub fn load_options(path: &Path) -> Result<ConversionOptions> {
    let text = fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
    ron::from_str(&text).map_err(|e| ToolError::Options {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Every `.ron` file directly inside `dir`, sorted by path.
pub fn record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| ToolError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ToolError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Snapshot source that re-reads `<dir>/<chassis> <model>.ron` from disk.
///
/// The pristine definition on disk wins over whatever state the live
/// record carries.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Resolve records inside `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File that holds the definition of `record`.
    #[must_use]
    pub fn path_for(&self, record: &UnitRecord) -> PathBuf {
        self.dir.join(format!("{}.ron", record.display_name()))
    }
}

impl SnapshotSource for DirectorySource {
    fn undamaged(&self, live: &UnitRecord) -> statline_core::error::Result<UnitRecord> {
        let path = self.path_for(live);
        let unavailable = |reason: String| ConversionError::SnapshotUnavailable {
            unit: live.display_name(),
            reason,
        };
        let text = fs::read_to_string(&path)
            .map_err(|e| unavailable(format!("cannot read '{}': {e}", path.display())))?;
        let mut record = UnitRecord::from_ron(&text, &path.display().to_string())?;
        record.damage = None;
        debug!(unit = %live.display_name(), path = %path.display(), "Loaded snapshot from disk");
        Ok(record)
    }
}

/// Outcome of converting one file.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    /// Source file.
    pub file: PathBuf,
    /// Converted element, when conversion succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<ConvertedElement>,
    /// Error message, when it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    fn new(file: PathBuf, outcome: Result<ConvertedElement>) -> Self {
        match outcome {
            Ok(element) => Self {
                file,
                element: Some(element),
                error: None,
            },
            Err(e) => {
                warn!(file = %file.display(), "Conversion failed: {e}");
                Self {
                    file,
                    element: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Whether the file converted.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.element.is_some()
    }
}

/// Convert each file with `converter`, in parallel, keeping input order.
pub fn convert_files<S>(files: &[PathBuf], converter: &Converter<S>) -> Vec<BatchEntry>
where
    S: SnapshotSource + Sync,
{
    files
        .par_iter()
        .map(|file| {
            let outcome = load_record(file)
                .and_then(|record| converter.convert(&record).map_err(ToolError::from));
            BatchEntry::new(file.clone(), outcome)
        })
        .collect()
}

/// Convert a single record file or every record file in a directory.
///
/// Directories use [`DirectorySource`] so each unit is converted from its
/// definition on disk; a single file is snapshotted with [`CleanCopy`].
pub fn convert_path(path: &Path, options: ConversionOptions) -> Result<Vec<BatchEntry>> {
    let entries = if path.is_dir() {
        let files = record_files(path)?;
        let converter = Converter::with_source(DirectorySource::new(path), options);
        convert_files(&files, &converter)
    } else {
        let converter = Converter::with_source(CleanCopy, options);
        convert_files(&[path.to_path_buf()], &converter)
    };

    let failed = entries.iter().filter(|entry| !entry.is_ok()).count();
    info!(
        path = %path.display(),
        files = entries.len(),
        failed,
        "Batch conversion finished"
    );
    Ok(entries)
}
