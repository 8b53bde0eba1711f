use super::{existing_path, read_json, ConfigError};
use crate::batch::{ExtractionOptions, RecordFormat};
use crate::region::{RegionOptions, ThresholdMethod};
use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config for the `create_infos` and `create_mame_art` tools.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ExtractToolConfig {
    /// Folder holding the bezel PNGs.
    pub folder: PathBuf,
    pub skip_existing: bool,
    /// Save masks of failed bezels to `<folder>/Debug`.
    pub debug: bool,
    pub opacity: f32,
    pub region: RegionConfig,
    pub parallel: bool,
}

/// Region options as read from a config file.
///
/// `threshold` stays unset unless the file or a flag names one; each record
/// format then picks its own default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub min_width: usize,
    pub min_height: usize,
    pub threshold: Option<ThresholdMethod>,
}

impl Default for RegionConfig {
    fn default() -> Self {
        let defaults = RegionOptions::default();
        Self {
            min_width: defaults.min_width,
            min_height: defaults.min_height,
            threshold: None,
        }
    }
}

impl RegionConfig {
    pub fn to_options(self, format: RecordFormat) -> RegionOptions {
        RegionOptions {
            min_width: self.min_width,
            min_height: self.min_height,
            threshold: self.threshold.unwrap_or(format.default_threshold()),
        }
    }
}

impl Default for ExtractToolConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("bezels"),
            skip_existing: false,
            debug: false,
            opacity: 1.0,
            region: RegionConfig::default(),
            parallel: false,
        }
    }
}

impl ExtractToolConfig {
    /// Check paths and numeric ranges; resolves `folder` in place.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.folder =
            existing_path(&self.folder).ok_or_else(|| ConfigError::MissingFolder(self.folder.clone()))?;
        if !(self.opacity > 0.0 && self.opacity <= 1.0) {
            return Err(ConfigError::Opacity(self.opacity));
        }
        if self.region.min_width == 0 || self.region.min_height == 0 {
            return Err(ConfigError::RegionMinimum(
                self.region.min_width,
                self.region.min_height,
            ));
        }
        Ok(())
    }

    pub fn debug_dir(&self) -> PathBuf {
        self.folder.join("Debug")
    }

    pub fn to_options(&self, format: RecordFormat) -> ExtractionOptions {
        if !format.writes_opacity() && self.opacity != 1.0 {
            warn!(
                "opacity {} is ignored: layout output has no opacity setting",
                self.opacity
            );
        }
        ExtractionOptions {
            region: self.region.to_options(format),
            opacity: self.opacity,
            format,
            skip_existing: self.skip_existing,
            debug_dir: self.debug.then(|| self.debug_dir()),
            parallel: self.parallel,
        }
    }
}

pub fn load_config(path: &Path) -> Result<ExtractToolConfig, ConfigError> {
    read_json(path)
}
