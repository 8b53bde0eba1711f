use super::{existing_path, read_json, ConfigError};
use crate::propagate::{PropagationOptions, UnmatchedPolicy, DEFAULT_QUARANTINE_DIR};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config for the `clone_bezels` tool.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CloneToolConfig {
    /// Folder holding the artwork to propagate.
    pub folder: PathBuf,
    /// MAME `-listxml` output.
    pub catalog: PathBuf,
    pub unmatched: UnmatchedPolicy,
    /// Defaults to `<folder>/Unknown`.
    pub quarantine_dir: Option<PathBuf>,
    pub parallel: bool,
}

impl Default for CloneToolConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("bezels"),
            catalog: PathBuf::from("mame.xml"),
            unmatched: UnmatchedPolicy::Ignore,
            quarantine_dir: None,
            parallel: false,
        }
    }
}

impl CloneToolConfig {
    /// Resolve the folder and catalog paths in place.
    ///
    /// The catalog is looked up as given, relative to the working directory,
    /// then relative to the artwork folder.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.folder =
            existing_path(&self.folder).ok_or_else(|| ConfigError::MissingFolder(self.folder.clone()))?;
        self.catalog = existing_path(&self.catalog)
            .or_else(|| {
                let in_folder = self.folder.join(&self.catalog);
                in_folder.exists().then_some(in_folder)
            })
            .ok_or_else(|| ConfigError::MissingCatalog(self.catalog.clone()))?;
        Ok(())
    }

    pub fn to_options(&self) -> PropagationOptions {
        let quarantine = self
            .quarantine_dir
            .clone()
            .unwrap_or_else(|| self.folder.join(DEFAULT_QUARANTINE_DIR));
        PropagationOptions::new(self.unmatched, quarantine)
    }
}

pub fn load_config(path: &Path) -> Result<CloneToolConfig, ConfigError> {
    read_json(path)
}
