//! Screen-cutout detection on a bezel's alpha channel.
//!
//! A bezel is an opaque frame with a fully transparent window where the game
//! picture shows through. Detection runs in three steps:
//!
//! - Binarization: the alpha channel is inverted and split at a threshold
//!   computed from that image's own histogram (`ThresholdMethod`), so the
//!   transparent window becomes mask foreground (255).
//! - Labeling: 8-connected components over both mask levels, numbered in
//!   raster order of each region's first pixel (see `labeling`).
//! - Selection: the first foreground region at least `min_width` ×
//!   `min_height` in label order is the screen. Every later qualifying region
//!   only raises the `conflict` flag.
//!
//! The engine never touches the filesystem. `analyze_alpha` hands the mask
//! back to the caller, who decides whether to keep it for inspection.
//!
//! Complexity
//! - Histogram, thresholding and labeling are each a single O(W·H) pass.

mod labeling;
mod options;
mod region;
mod threshold;

pub use labeling::label_regions;
pub use options::{RegionOptions, ThresholdMethod};
pub use region::{ConnectedRegion, RegionLabel, ScreenMatch};
pub use threshold::binarize_inverted;

use crate::image::{BinaryMask, ImageView};
use log::debug;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    #[error("no transparent area of at least {min_width}x{min_height} found")]
    NotFound { min_width: usize, min_height: usize },
}

/// Intermediate products of one detection pass.
#[derive(Clone, Debug)]
pub struct RegionAnalysis {
    pub mask: BinaryMask,
    /// Threshold applied to the inverted alpha.
    pub threshold: u8,
    /// All regions of both mask levels, in label order.
    pub regions: Vec<ConnectedRegion>,
}

impl RegionAnalysis {
    /// Pick the screen region out of the labeled regions.
    pub fn select_screen(&self, options: &RegionOptions) -> Result<ScreenMatch, RegionError> {
        select_screen(&self.regions, options)
    }
}

/// Binarize and label `alpha` without selecting anything.
pub fn analyze_alpha<I: ImageView<Pixel = u8>>(alpha: &I, options: &RegionOptions) -> RegionAnalysis {
    let (mask, threshold) = binarize_inverted(alpha, options.threshold);
    let regions = label_regions(&mask);
    debug!(
        "analyze_alpha {}x{} threshold={} regions={}",
        alpha.width(),
        alpha.height(),
        threshold,
        regions.len()
    );
    RegionAnalysis {
        mask,
        threshold,
        regions,
    }
}

/// First-wins selection over regions in label order.
pub fn select_screen(
    regions: &[ConnectedRegion],
    options: &RegionOptions,
) -> Result<ScreenMatch, RegionError> {
    let mut qualifying = regions.iter().filter(|r| {
        r.is_foreground() && r.width >= options.min_width && r.height >= options.min_height
    });
    let first = qualifying.next().ok_or(RegionError::NotFound {
        min_width: options.min_width,
        min_height: options.min_height,
    })?;
    let extra = qualifying.count();
    if extra > 0 {
        debug!(
            "select_screen keeping region {:?} at ({}, {}), ignoring {} more",
            first.label, first.left, first.top, extra
        );
    }
    Ok(ScreenMatch {
        region: first.clone(),
        conflict: extra > 0,
        candidates: extra + 1,
    })
}

/// Locate the screen cutout of a bezel from its alpha channel.
pub fn extract_screen_region<I: ImageView<Pixel = u8>>(
    alpha: &I,
    options: &RegionOptions,
) -> Result<ScreenMatch, RegionError> {
    analyze_alpha(alpha, options).select_screen(options)
}
