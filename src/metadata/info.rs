//! `.info` records: one JSON object of border metrics per bezel.
use super::{BorderMetrics, MetadataError};
use std::fs;
use std::path::Path;

pub const INFO_EXTENSION: &str = "info";

/// Render metrics as the on-disk record text.
pub fn to_info_string(metrics: &BorderMetrics) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(metrics)
}

/// Write `metrics` to `path`, replacing any existing record.
pub fn write_info(path: &Path, metrics: &BorderMetrics) -> Result<(), MetadataError> {
    let text = to_info_string(metrics).map_err(|source| MetadataError::Record {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_info(path: &Path) -> Result<BorderMetrics, MetadataError> {
    let data = fs::read_to_string(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| MetadataError::Record {
        path: path.to_path_buf(),
        source,
    })
}
