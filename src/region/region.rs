use serde::Serialize;

/// Identifier of a labeled region, 1-based in raster order of first pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RegionLabel(pub u32);

/// One maximal 8-connected blob of equal-valued mask pixels.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConnectedRegion {
    pub label: RegionLabel,
    pub top: usize,
    pub left: usize,
    pub width: usize,
    pub height: usize,
    /// Pixel count of the blob (not of its bounding box).
    pub area: usize,
    pub mean_intensity: f64,
}

impl ConnectedRegion {
    /// True when every pixel of the blob is mask foreground.
    pub fn is_foreground(&self) -> bool {
        self.mean_intensity >= 255.0
    }

    pub fn bottom_edge(&self) -> usize {
        self.top + self.height
    }

    pub fn right_edge(&self) -> usize {
        self.left + self.width
    }
}

/// The region accepted as the game screen.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScreenMatch {
    pub region: ConnectedRegion,
    /// Another qualifying region followed the accepted one.
    pub conflict: bool,
    /// Number of qualifying regions seen, including the accepted one.
    pub candidates: usize,
}
