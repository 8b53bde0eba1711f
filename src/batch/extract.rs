use super::{list_files, short_name, BatchError};
use crate::image::io::{load_alpha_image, save_mask_png};
use crate::image::BinaryMask;
use crate::metadata::archive::{write_bundle, ARCHIVE_EXTENSION};
use crate::metadata::info::{write_info, INFO_EXTENSION};
use crate::metadata::layout::{render_layout, write_layout, LAYOUT_EXTENSION};
use crate::metadata::{build_border_metrics, MetadataError};
use crate::region::{analyze_alpha, RegionOptions, ScreenMatch, ThresholdMethod};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which record a bezel gets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// `<stem>.info` border metrics.
    #[default]
    Info,
    /// `<stem>.lay` layout plus a `<stem>.zip` bundle of image and layout.
    Layout,
}

impl RecordFormat {
    /// Otsu for `.info` records, Triangle for layouts.
    pub fn default_threshold(self) -> ThresholdMethod {
        match self {
            Self::Info => ThresholdMethod::Otsu,
            Self::Layout => ThresholdMethod::Triangle,
        }
    }

    /// Only `.info` records carry an opacity.
    pub fn writes_opacity(self) -> bool {
        matches!(self, Self::Info)
    }

    pub fn record_path(self, png: &Path) -> PathBuf {
        match self {
            Self::Info => png.with_extension(INFO_EXTENSION),
            Self::Layout => png.with_extension(LAYOUT_EXTENSION),
        }
    }

    /// True when a previous run already produced output for `png`.
    fn has_output(self, png: &Path) -> bool {
        match self {
            Self::Info => png.with_extension(INFO_EXTENSION).exists(),
            Self::Layout => {
                png.with_extension(LAYOUT_EXTENSION).exists()
                    || png.with_extension(ARCHIVE_EXTENSION).exists()
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExtractionOptions {
    pub region: RegionOptions,
    /// Opacity written to `.info` records, in (0, 1].
    pub opacity: f32,
    pub format: RecordFormat,
    /// Leave bezels that already have output untouched.
    pub skip_existing: bool,
    /// Where masks of failed or conflicting bezels are saved, one per source.
    pub debug_dir: Option<PathBuf>,
    pub parallel: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            region: RegionOptions::default(),
            opacity: 1.0,
            format: RecordFormat::Info,
            skip_existing: false,
            debug_dir: None,
            parallel: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Created,
    /// Record written from the first region; more regions qualified.
    CreatedWithConflict,
    Skipped,
    NoRegion,
    DecodeFailed(String),
    WriteFailed(String),
}

#[derive(Clone, Debug)]
pub struct ExtractionReport {
    pub path: PathBuf,
    pub outcome: ExtractionOutcome,
    pub record: Option<PathBuf>,
    pub debug_mask: Option<PathBuf>,
}

impl ExtractionReport {
    fn new(path: &Path, outcome: ExtractionOutcome) -> Self {
        Self {
            path: path.to_path_buf(),
            outcome,
            record: None,
            debug_mask: None,
        }
    }

    pub fn describe(&self) -> String {
        let saved = if self.debug_mask.is_some() {
            " Alpha mask saved."
        } else {
            ""
        };
        match &self.outcome {
            ExtractionOutcome::Created => "Done! Created record.".to_string(),
            ExtractionOutcome::CreatedWithConflict => format!(
                "Done with Errors! Record created, but multiple transparent areas found.{saved}"
            ),
            ExtractionOutcome::Skipped => "Skipped! Record already exists.".to_string(),
            ExtractionOutcome::NoRegion => {
                format!("Error! No record created, no transparent area detected.{saved}")
            }
            ExtractionOutcome::DecodeFailed(err) => format!("Error! Could not read image: {err}"),
            ExtractionOutcome::WriteFailed(err) => format!("Error! Could not write record: {err}"),
        }
    }

    fn is_failure(&self) -> bool {
        !matches!(
            self.outcome,
            ExtractionOutcome::Created | ExtractionOutcome::Skipped
        )
    }
}

/// Run-wide counters folded from `ExtractionReport`s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionTally {
    pub png_found: usize,
    /// Records written, conflicts included.
    pub written: usize,
    pub conflicts: usize,
    pub skipped: usize,
    pub no_region: usize,
    pub decode_failed: usize,
    pub write_failed: usize,
}

impl ExtractionTally {
    pub fn record(mut self, report: &ExtractionReport) -> Self {
        self.png_found += 1;
        match report.outcome {
            ExtractionOutcome::Created => self.written += 1,
            ExtractionOutcome::CreatedWithConflict => {
                self.written += 1;
                self.conflicts += 1;
            }
            ExtractionOutcome::Skipped => self.skipped += 1,
            ExtractionOutcome::NoRegion => self.no_region += 1,
            ExtractionOutcome::DecodeFailed(_) => self.decode_failed += 1,
            ExtractionOutcome::WriteFailed(_) => self.write_failed += 1,
        }
        self
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            png_found: self.png_found + other.png_found,
            written: self.written + other.written,
            conflicts: self.conflicts + other.conflicts,
            skipped: self.skipped + other.skipped,
            no_region: self.no_region + other.no_region,
            decode_failed: self.decode_failed + other.decode_failed,
            write_failed: self.write_failed + other.write_failed,
        }
    }
}

impl std::fmt::Display for ExtractionTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} png files found, {} records written ({} with multiple areas), {} skipped, {} without transparent area, {} unreadable, {} write errors.",
            self.png_found,
            self.written,
            self.conflicts,
            self.skipped,
            self.no_region,
            self.decode_failed,
            self.write_failed
        )
    }
}

/// Detect the screen of one bezel and write its record.
pub fn process_bezel(png: &Path, options: &ExtractionOptions) -> ExtractionReport {
    if options.skip_existing && options.format.has_output(png) {
        return ExtractionReport::new(png, ExtractionOutcome::Skipped);
    }

    let alpha = match load_alpha_image(png) {
        Ok(alpha) => alpha,
        Err(err) => {
            return ExtractionReport::new(png, ExtractionOutcome::DecodeFailed(err.to_string()))
        }
    };
    let (width, height) = (alpha.width(), alpha.height());
    let analysis = analyze_alpha(&alpha.as_view(), &options.region);

    let mut report = match analysis.select_screen(&options.region) {
        Err(err) => {
            debug!("{}: {err}", png.display());
            ExtractionReport::new(png, ExtractionOutcome::NoRegion)
        }
        Ok(found) => {
            debug!(
                "{}: transparent area at +{}+{} size {}x{}",
                png.display(),
                found.region.left,
                found.region.top,
                found.region.width,
                found.region.height
            );
            match write_record(png, width, height, &found, options) {
                Ok(record) => {
                    let outcome = if found.conflict {
                        ExtractionOutcome::CreatedWithConflict
                    } else {
                        ExtractionOutcome::Created
                    };
                    let mut report = ExtractionReport::new(png, outcome);
                    report.record = Some(record);
                    report
                }
                Err(err) => ExtractionReport::new(png, ExtractionOutcome::WriteFailed(err.to_string())),
            }
        }
    };

    if matches!(
        report.outcome,
        ExtractionOutcome::NoRegion | ExtractionOutcome::CreatedWithConflict
    ) {
        report.debug_mask = save_debug_mask(png, &analysis.mask, options);
    }
    report
}

fn write_record(
    png: &Path,
    width: usize,
    height: usize,
    found: &ScreenMatch,
    options: &ExtractionOptions,
) -> Result<PathBuf, MetadataError> {
    let record = options.format.record_path(png);
    match options.format {
        RecordFormat::Info => {
            let metrics = build_border_metrics(width, height, &found.region, options.opacity)?;
            write_info(&record, &metrics)?;
        }
        RecordFormat::Layout => {
            let image_file = file_name(png);
            let text = render_layout(&file_name(&record), &image_file, &found.region, width, height)?;
            write_layout(&record, &text)?;
            write_bundle(&png.with_extension(ARCHIVE_EXTENSION), &[png, record.as_path()])?;
        }
    }
    Ok(record)
}

/// Save `mask` as `<debug_dir>/<png file name>`; failures only warn.
fn save_debug_mask(png: &Path, mask: &BinaryMask, options: &ExtractionOptions) -> Option<PathBuf> {
    let dir = options.debug_dir.as_ref()?;
    let path = dir.join(file_name(png));
    match save_mask_png(mask, &path) {
        Ok(()) => {
            debug!("debug copy of alpha mask saved to {}", path.display());
            Some(path)
        }
        Err(err) => {
            warn!("could not save debug mask: {err}");
            None
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("png")
}

/// Result of one extraction pass over a folder.
#[derive(Debug)]
pub struct ExtractionRun {
    pub reports: Vec<ExtractionReport>,
    pub tally: ExtractionTally,
}

/// Process every `*.png` directly inside `folder`.
pub fn run_extraction(
    folder: &Path,
    options: &ExtractionOptions,
) -> Result<ExtractionRun, BatchError> {
    let files: Vec<PathBuf> = list_files(folder)?
        .into_iter()
        .filter(|p| is_png(p))
        .collect();
    let total = files.len();
    info!("Starting Process... {total} png files in {}", folder.display());

    let reports: Vec<ExtractionReport> = if options.parallel {
        let reports: Vec<ExtractionReport> = files
            .par_iter()
            .map(|png| process_bezel(png, options))
            .collect();
        for (i, report) in reports.iter().enumerate() {
            log_report(i, total, report);
        }
        reports
    } else {
        files
            .iter()
            .enumerate()
            .map(|(i, png)| {
                let report = process_bezel(png, options);
                log_report(i, total, &report);
                report
            })
            .collect()
    };

    let tally = reports
        .iter()
        .fold(ExtractionTally::default(), ExtractionTally::record);
    info!("Processing completed!");
    info!("{tally}");
    Ok(ExtractionRun { reports, tally })
}

fn log_report(index: usize, total: usize, report: &ExtractionReport) {
    let line = format!(
        "Processing {} (File {:04}/{:04})... {}",
        short_name(&report.path, 30),
        index + 1,
        total,
        report.describe()
    );
    if report.is_failure() {
        warn!("{line}");
    } else {
        info!("{line}");
    }
}
