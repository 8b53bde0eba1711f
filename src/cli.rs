//! Command-line flags of the bundled tools.
//!
//! Flags are layered over the optional `--config` JSON file: a set flag
//! always wins, an absent one leaves the config value alone.
use crate::config::{clones, extract, CloneToolConfig, ConfigError, ExtractToolConfig};
use crate::propagate::UnmatchedPolicy;
use crate::region::ThresholdMethod;
use clap::Args;
use std::path::PathBuf;

/// Flags shared by `create_infos` and `create_mame_art`.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Show additional logging information while running
    #[arg(short, long)]
    pub verbose: bool,
    /// Skip bezels whose output already exists
    #[arg(short, long)]
    pub skip: bool,
    /// Save alpha masks of failed bezels to a Debug folder
    #[arg(short, long)]
    pub debug: bool,
    /// Opacity written to .info records, in (0, 1]; layouts ignore it
    #[arg(short, long, value_name = "OPACITY")]
    pub opacity: Option<f32>,
    /// Folder of bezels to process (default: ./bezels)
    #[arg(short, long, value_name = "FOLDER")]
    pub path: Option<PathBuf>,
    /// Automatic threshold method: otsu (.info default) or triangle (layout default)
    #[arg(long, value_name = "METHOD")]
    pub threshold: Option<ThresholdMethod>,
    /// Process images in parallel
    #[arg(short = 'j', long)]
    pub parallel: bool,
    /// JSON config file; flags override its values
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

impl ExtractArgs {
    /// Load the config file (if any), apply flags and validate.
    pub fn into_config(self) -> Result<ExtractToolConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => extract::load_config(path)?,
            None => ExtractToolConfig::default(),
        };
        config.skip_existing |= self.skip;
        config.debug |= self.debug;
        config.parallel |= self.parallel;
        if let Some(opacity) = self.opacity {
            config.opacity = opacity;
        }
        if let Some(path) = self.path {
            config.folder = path;
        }
        if let Some(method) = self.threshold {
            config.region.threshold = Some(method);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Flags of `clone_bezels`.
#[derive(Debug, Args)]
pub struct CloneArgs {
    /// Show additional logging information while running
    #[arg(short, long)]
    pub verbose: bool,
    /// Move unmatched files into an Unknown folder under the path
    #[arg(short, long, conflicts_with = "delete")]
    pub r#move: bool,
    /// Delete unmatched files
    #[arg(short, long)]
    pub delete: bool,
    /// Folder of artwork to process (default: ./bezels)
    #[arg(short, long, value_name = "FOLDER")]
    pub path: Option<PathBuf>,
    /// MAME XML catalog; full path, or a file in the current or artwork folder
    #[arg(short = 'x', long = "xml", value_name = "FILE")]
    pub catalog: Option<PathBuf>,
    /// Process files in parallel
    #[arg(short = 'j', long)]
    pub parallel: bool,
    /// JSON config file; flags override its values
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

impl CloneArgs {
    pub fn policy(&self) -> Option<UnmatchedPolicy> {
        if self.r#move {
            Some(UnmatchedPolicy::Move)
        } else if self.delete {
            Some(UnmatchedPolicy::Delete)
        } else {
            None
        }
    }

    /// Load the config file (if any), apply flags and validate.
    pub fn into_config(self) -> Result<CloneToolConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => clones::load_config(path)?,
            None => CloneToolConfig::default(),
        };
        if let Some(policy) = self.policy() {
            config.unmatched = policy;
        }
        config.parallel |= self.parallel;
        if let Some(path) = self.path {
            config.folder = path;
        }
        if let Some(catalog) = self.catalog {
            config.catalog = catalog;
        }
        config.validate()?;
        Ok(config)
    }
}
