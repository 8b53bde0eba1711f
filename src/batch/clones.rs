use super::{list_files, short_name, BatchError};
use crate::catalog::CloneGraph;
use crate::propagate::{
    propagate_file, Action, ArtifactFile, FileReport, PropagationOptions, PropagationTally,
};
use log::{info, warn};
use rayon::prelude::*;
use std::path::Path;

/// Result of one propagation pass over a folder.
#[derive(Debug)]
pub struct PropagationRun {
    pub reports: Vec<FileReport>,
    pub tally: PropagationTally,
}

/// Propagate every artifact in `folder` against a fully built `graph`.
///
/// The file list is taken before any action runs, so files created or moved
/// during the pass are not revisited. With `parallel`, files are processed
/// on the rayon pool; target creation stays race-free (see
/// `propagate::fill_gap`) but which clone claims a free parent slot then
/// depends on scheduling.
pub fn run_propagation(
    folder: &Path,
    graph: &CloneGraph,
    options: &PropagationOptions,
    parallel: bool,
) -> Result<PropagationRun, BatchError> {
    let files = list_files(folder)?;
    let total = files.len();
    info!("Checking {total} files in {}", folder.display());

    let reports: Vec<FileReport> = if parallel {
        let reports: Vec<FileReport> = files
            .par_iter()
            .map(|path| process_path(path, graph, options))
            .collect();
        for (i, report) in reports.iter().enumerate() {
            log_report(i, total, report);
        }
        reports
    } else {
        files
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let report = process_path(path, graph, options);
                log_report(i, total, &report);
                report
            })
            .collect()
    };

    let tally = reports
        .iter()
        .fold(PropagationTally::default(), PropagationTally::record);
    info!("Processing completed!");
    info!("{tally}");
    Ok(PropagationRun { reports, tally })
}

fn process_path(path: &Path, graph: &CloneGraph, options: &PropagationOptions) -> FileReport {
    match ArtifactFile::from_path(path) {
        Some(file) => propagate_file(&file, graph, options),
        None => {
            let mut report = FileReport::new(path.to_path_buf(), None);
            report.action = Action::NotArtifact;
            report
        }
    }
}

fn log_report(index: usize, total: usize, report: &FileReport) {
    let line = format!(
        "Checking {} (File {:04}/{:04})... {}",
        short_name(&report.path, 30),
        index + 1,
        total,
        report.describe()
    );
    if report.failures.is_empty() {
        info!("{line}");
    } else {
        warn!("{line}");
        for failure in &report.failures {
            warn!("  {failure}");
        }
    }
}
