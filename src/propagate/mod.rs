//! Parent/clone artwork propagation.
//!
//! Each artifact file (`<set>.png|info|lay|zip`) is classified against the
//! clone graph by its file stem, then:
//!
//! - lone parent: nothing to do;
//! - parent with clones: copy to every clone that lacks the same kind of
//!   artifact;
//! - clone: claim the parent slot if it is free, otherwise copy to sibling
//!   clones that lack the artifact (never both);
//! - unmatched: ignore, delete, or move to the quarantine folder.
//!
//! All copies are fill-gap only: an existing target is never overwritten, so
//! re-running over the same folder makes no further copies.
//!
//! Order dependency: when several clones of a parent have art and the parent
//! has none, whichever clone is processed first becomes the parent's art, and
//! later clones then seed the remaining siblings from themselves. Folder runs
//! process files in sorted name order to keep this deterministic.

mod actions;
mod artifact;
mod classify;
mod report;

pub use actions::{delete, fill_gap, quarantine, Quarantine};
pub use artifact::{ArtifactFile, ArtifactKind};
pub use classify::{classify, SetClass};
pub use report::{Action, FileReport, PropagationTally};

use crate::catalog::CloneGraph;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_QUARANTINE_DIR: &str = "Unknown";

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to delete {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What to do with artifacts the catalog does not know.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedPolicy {
    #[default]
    Ignore,
    Delete,
    Move,
}

#[derive(Clone, Debug)]
pub struct PropagationOptions {
    pub unmatched: UnmatchedPolicy,
    /// Destination of `UnmatchedPolicy::Move`.
    pub quarantine_dir: PathBuf,
}

impl PropagationOptions {
    pub fn new(unmatched: UnmatchedPolicy, quarantine_dir: impl Into<PathBuf>) -> Self {
        Self {
            unmatched,
            quarantine_dir: quarantine_dir.into(),
        }
    }
}

/// Classify one artifact and perform its copy/move/delete actions.
///
/// Filesystem failures are collected in the report; they never stop the
/// remaining targets of the same file.
pub fn propagate_file(
    file: &ArtifactFile,
    graph: &CloneGraph,
    options: &PropagationOptions,
) -> FileReport {
    let class = classify(&file.set_name, graph);
    let mut report = FileReport::new(file.path.clone(), Some(class));
    debug!("{} classified as {:?}", file.set_name, class);

    match class {
        SetClass::LoneParent => {}
        SetClass::ParentWithClones => {
            let targets = graph.clones_of(&file.set_name);
            let copies = fill_targets(file, targets.iter().map(String::as_str), &mut report);
            report.action = copied(copies);
        }
        SetClass::Clone => {
            let mut copies = 0;
            for parent in graph.parents_of(&file.set_name) {
                match fill_gap(&file.path, &file.sibling(parent)) {
                    Ok(true) => copies += 1,
                    Ok(false) => {
                        debug!(
                            "{parent} already has a {}, filling siblings of {}",
                            file.kind.extension(),
                            file.set_name
                        );
                        let siblings = graph
                            .clones_of(parent)
                            .iter()
                            .map(String::as_str)
                            .filter(|s| *s != file.set_name);
                        copies += fill_targets(file, siblings, &mut report);
                    }
                    Err(err) => report.failures.push(err),
                }
            }
            report.action = copied(copies);
        }
        SetClass::Unmatched => {
            report.action = handle_unmatched(file, options, &mut report.failures);
        }
    }
    report
}

fn fill_targets<'a>(
    file: &ArtifactFile,
    targets: impl Iterator<Item = &'a str>,
    report: &mut FileReport,
) -> usize {
    let mut copies = 0;
    for target in targets {
        match fill_gap(&file.path, &file.sibling(target)) {
            Ok(true) => copies += 1,
            Ok(false) => {}
            Err(err) => report.failures.push(err),
        }
    }
    copies
}

fn copied(copies: usize) -> Action {
    if copies == 0 {
        Action::NoOp
    } else {
        Action::Copied(copies)
    }
}

fn handle_unmatched(
    file: &ArtifactFile,
    options: &PropagationOptions,
    failures: &mut Vec<PropagationError>,
) -> Action {
    let result = match options.unmatched {
        UnmatchedPolicy::Ignore => Ok(Action::NoOp),
        UnmatchedPolicy::Delete => delete(&file.path).map(|_| Action::Deleted),
        UnmatchedPolicy::Move => {
            quarantine(&file.path, &options.quarantine_dir).map(|q| match q {
                Quarantine::Moved => Action::Moved,
                Quarantine::AlreadyThere => Action::SkippedExists,
            })
        }
    };
    result.unwrap_or_else(|err| {
        failures.push(err);
        Action::NoOp
    })
}

#[cfg(test)]
mod tests;
