use super::{PropagationError, SetClass};
use serde::Serialize;
use std::path::PathBuf;

/// Terminal state of one file's propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Action {
    NoOp,
    /// Number of missing artifacts created from this file.
    Copied(usize),
    Deleted,
    Moved,
    /// Quarantine already held a file of the same name.
    SkippedExists,
    /// Not an artifact type; only produced by folder runs.
    NotArtifact,
}

/// Everything that happened to one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub class: Option<SetClass>,
    pub action: Action,
    /// Per-target failures; the remaining targets were still attempted.
    pub failures: Vec<PropagationError>,
}

impl FileReport {
    pub(crate) fn new(path: PathBuf, class: Option<SetClass>) -> Self {
        Self {
            path,
            class,
            action: Action::NoOp,
            failures: Vec::new(),
        }
    }

    /// One-line outcome text for run logs.
    pub fn describe(&self) -> String {
        let base = match self.action {
            Action::Copied(n) => format!("Done! {n} copy/copies made."),
            Action::Moved => "Done! No match, moved to Unknown folder.".to_string(),
            Action::Deleted => "Done! No match, deleted.".to_string(),
            Action::SkippedExists => {
                "Done! No match, already exists in Unknown, no actions taken.".to_string()
            }
            Action::NotArtifact => "Skipped - not a decoration.".to_string(),
            Action::NoOp if self.failures.is_empty() => "Done! No actions taken.".to_string(),
            Action::NoOp => "Failed!".to_string(),
        };
        if self.failures.is_empty() {
            base
        } else {
            format!("{base} ({} error(s))", self.failures.len())
        }
    }
}

/// Run-wide counters folded from `FileReport`s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PropagationTally {
    /// Artifact files that were classified and acted upon.
    pub processed: usize,
    pub copies: usize,
    pub moved: usize,
    pub deleted: usize,
    pub skipped_existing: usize,
    pub not_artifact: usize,
    /// Individual filesystem operations that failed.
    pub failures: usize,
}

impl PropagationTally {
    pub fn record(mut self, report: &FileReport) -> Self {
        match report.action {
            Action::Copied(n) => {
                self.processed += 1;
                self.copies += n;
            }
            Action::Moved => {
                self.processed += 1;
                self.moved += 1;
            }
            Action::Deleted => {
                self.processed += 1;
                self.deleted += 1;
            }
            Action::NoOp => self.processed += 1,
            Action::SkippedExists => self.skipped_existing += 1,
            Action::NotArtifact => self.not_artifact += 1,
        }
        self.failures += report.failures.len();
        self
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            processed: self.processed + other.processed,
            copies: self.copies + other.copies,
            moved: self.moved + other.moved,
            deleted: self.deleted + other.deleted,
            skipped_existing: self.skipped_existing + other.skipped_existing,
            not_artifact: self.not_artifact + other.not_artifact,
            failures: self.failures + other.failures,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_existing + self.not_artifact
    }
}

impl std::fmt::Display for PropagationTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files processed, {} copies made, {} files moved, {} files deleted, {} files skipped, {} errors.",
            self.processed,
            self.copies,
            self.moved,
            self.deleted,
            self.skipped(),
            self.failures
        )
    }
}
