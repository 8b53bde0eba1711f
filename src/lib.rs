#![doc = include_str!("../README.md")]

// Engines
pub mod catalog;
pub mod metadata;
pub mod propagate;
pub mod region;

// Adapters and folder-level drivers
pub mod batch;
pub mod cli;
pub mod config;
pub mod image;
pub mod logging;

// --- High-level re-exports -------------------------------------------------

pub use crate::catalog::{build_clone_graph, CloneGraph, MachineRecord};
pub use crate::metadata::{build_border_metrics, BorderMetrics};
pub use crate::propagate::{propagate_file, Action, ArtifactFile, UnmatchedPolicy};
pub use crate::region::{extract_screen_region, RegionOptions, ScreenMatch};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for scripts and quick experiments.
///
/// ```
/// use bezel_tools::prelude::*;
///
/// let (w, h) = (640usize, 480usize);
/// let mut alpha = vec![255u8; w * h];
/// for y in 40..440 {
///     for x in 80..560 {
///         alpha[y * w + x] = 0;
///     }
/// }
/// let view = ImageU8::packed(w, h, &alpha);
/// let found = extract_screen_region(&view, &RegionOptions::default()).unwrap();
/// let metrics = build_border_metrics(w, h, &found.region, 1.0).unwrap();
/// assert_eq!(
///     (metrics.left, metrics.right, metrics.top, metrics.bottom),
///     (80, 80, 40, 40)
/// );
/// ```
pub mod prelude {
    pub use crate::image::{AlphaImage, ImageU8};
    pub use crate::{
        build_border_metrics, build_clone_graph, extract_screen_region, propagate_file,
        BorderMetrics, CloneGraph, MachineRecord, RegionOptions, ScreenMatch,
    };
}
