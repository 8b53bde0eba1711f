//! Border metrics derived from a detected screen region, and the files they
//! are persisted as.
//!
//! - `info`: flat key/value record (`<stem>.info`).
//! - `layout`: MAME layout descriptor (`<stem>.lay`).
//! - `archive`: `.zip` bundle of the bezel image and its layout.

pub mod archive;
pub mod info;
pub mod layout;

use crate::region::ConnectedRegion;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MESSAGE_X: f32 = 0.22;
pub const DEFAULT_MESSAGE_Y: f32 = 0.12;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(
        "region {region_width}x{region_height}+{left}+{top} exceeds bezel {bezel_width}x{bezel_height}"
    )]
    RegionOutOfBounds {
        bezel_width: usize,
        bezel_height: usize,
        left: usize,
        top: usize,
        region_width: usize,
        region_height: usize,
    },
    #[error("opacity {0} outside (0, 1]")]
    InvalidOpacity(f32),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record {path}: {source}")]
    Record {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write layout: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("failed to write archive {path}: {source}")]
    Archive {
        path: std::path::PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

/// Screen placement inside a bezel, as stored in `.info` records.
///
/// Field order is the on-disk key order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BorderMetrics {
    pub width: usize,
    pub height: usize,
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
    pub opacity: f32,
    #[serde(rename = "messagex")]
    pub message_x: f32,
    #[serde(rename = "messagey")]
    pub message_y: f32,
}

impl BorderMetrics {
    /// Width of the screen window the borders enclose.
    pub fn screen_width(&self) -> usize {
        self.width - self.left - self.right
    }

    pub fn screen_height(&self) -> usize {
        self.height - self.top - self.bottom
    }
}

/// Build border metrics with the default message position.
pub fn build_border_metrics(
    bezel_width: usize,
    bezel_height: usize,
    region: &ConnectedRegion,
    opacity: f32,
) -> Result<BorderMetrics, MetadataError> {
    build_border_metrics_with_message(
        bezel_width,
        bezel_height,
        region,
        opacity,
        DEFAULT_MESSAGE_X,
        DEFAULT_MESSAGE_Y,
    )
}

pub fn build_border_metrics_with_message(
    bezel_width: usize,
    bezel_height: usize,
    region: &ConnectedRegion,
    opacity: f32,
    message_x: f32,
    message_y: f32,
) -> Result<BorderMetrics, MetadataError> {
    if !(opacity > 0.0 && opacity <= 1.0) {
        return Err(MetadataError::InvalidOpacity(opacity));
    }
    if region.right_edge() > bezel_width || region.bottom_edge() > bezel_height {
        return Err(MetadataError::RegionOutOfBounds {
            bezel_width,
            bezel_height,
            left: region.left,
            top: region.top,
            region_width: region.width,
            region_height: region.height,
        });
    }
    Ok(BorderMetrics {
        width: bezel_width,
        height: bezel_height,
        top: region.top,
        left: region.left,
        bottom: bezel_height - region.bottom_edge(),
        right: bezel_width - region.right_edge(),
        opacity,
        message_x,
        message_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionLabel;

    fn region(left: usize, top: usize, width: usize, height: usize) -> ConnectedRegion {
        ConnectedRegion {
            label: RegionLabel(2),
            top,
            left,
            width,
            height,
            area: width * height,
            mean_intensity: 255.0,
        }
    }

    #[test]
    fn borders_add_back_up_to_bezel_size() {
        for (w, h, r) in [
            (1920, 1080, region(240, 0, 1440, 1080)),
            (1280, 1024, region(17, 33, 900, 700)),
            (320, 200, region(0, 0, 320, 200)),
        ] {
            let m = build_border_metrics(w, h, &r, 1.0).unwrap();
            assert_eq!(m.top + r.height + m.bottom, h);
            assert_eq!(m.left + r.width + m.right, w);
            assert_eq!((m.screen_width(), m.screen_height()), (r.width, r.height));
            assert_eq!((m.message_x, m.message_y), (0.22, 0.12));
        }
    }

    #[test]
    fn region_outside_bezel_is_an_invariant_violation() {
        let err = build_border_metrics(800, 600, &region(500, 0, 320, 200), 1.0).unwrap_err();
        assert!(matches!(err, MetadataError::RegionOutOfBounds { .. }));
    }

    #[test]
    fn opacity_must_be_in_unit_interval() {
        let r = region(0, 0, 320, 200);
        assert!(build_border_metrics(640, 480, &r, 0.0).is_err());
        assert!(build_border_metrics(640, 480, &r, 1.5).is_err());
        assert!(build_border_metrics(640, 480, &r, f32::NAN).is_err());
        assert_eq!(build_border_metrics(640, 480, &r, 0.7).unwrap().opacity, 0.7);
    }
}
