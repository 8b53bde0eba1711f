//! Folder-level runs of the extraction and propagation engines.
//!
//! Both runs list the folder once up front (regular files only, sorted by
//! name), process every file independently, log one outcome line per file
//! and fold the outcomes into a tally.

pub mod clones;
pub mod extract;

pub use clones::{run_propagation, PropagationRun};
pub use extract::{
    process_bezel, run_extraction, ExtractionOptions, ExtractionOutcome, ExtractionReport,
    ExtractionRun, ExtractionTally, RecordFormat,
};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to list {path}: {source}")]
    ListFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Regular files directly inside `folder`, sorted by file name.
pub fn list_files(folder: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let list_err = |source| BatchError::ListFolder {
        path: folder.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(folder).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        if entry.file_type().map_err(list_err)?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// File name shortened to `width` characters for aligned progress lines.
pub(crate) fn short_name(path: &Path, width: usize) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.chars().count() <= width {
        format!("{name:<width$}")
    } else {
        let head: String = name.chars().take(width.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
