//! JSON tool configs.
//!
//! Every field has a default, so a config file only lists what it changes
//! and the command-line tools work without one. Command-line flags are
//! applied on top of the loaded config, then `validate` runs before any
//! file is touched.

pub mod clones;
pub mod extract;

pub use clones::CloneToolConfig;
pub use extract::{ExtractToolConfig, RegionConfig};

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("path {0} does not exist")]
    MissingFolder(PathBuf),
    #[error("catalog file {0} not found")]
    MissingCatalog(PathBuf),
    #[error("opacity {0} outside (0, 1]")]
    Opacity(f32),
    #[error("region minimums must be positive, got {0}x{1}")]
    RegionMinimum(usize, usize),
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve `path` as given, else relative to the working directory.
pub(crate) fn existing_path(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }
    let joined = std::env::current_dir().ok()?.join(path);
    joined.exists().then_some(joined)
}
