use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File types that travel with a ROM set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Png,
    Info,
    Lay,
    Zip,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [Self::Png, Self::Info, Self::Lay, Self::Zip];

    /// Exact (lowercase) extension match.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.extension() == ext)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Info => "info",
            Self::Lay => "lay",
            Self::Zip => "zip",
        }
    }
}

/// A per-set artwork file: `<set name>.<kind>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactFile {
    pub path: PathBuf,
    pub set_name: String,
    pub kind: ArtifactKind,
}

impl ArtifactFile {
    /// Recognise `path` as an artifact; `None` for other files.
    pub fn from_path(path: &Path) -> Option<Self> {
        let kind = ArtifactKind::from_extension(path.extension()?.to_str()?)?;
        let set_name = path.file_stem()?.to_str()?.to_owned();
        if set_name.is_empty() {
            return None;
        }
        Some(Self {
            path: path.to_path_buf(),
            set_name,
            kind,
        })
    }

    /// Same-kind artifact path for another set, next to this file.
    pub fn sibling(&self, set_name: &str) -> PathBuf {
        let file_name = format!("{set_name}.{}", self.kind.extension());
        match self.path.parent() {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
