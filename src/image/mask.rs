//! Owned two-level mask in row-major layout (stride == width).
//!
//! Every pixel is either `BinaryMask::BACKGROUND` (0) or
//! `BinaryMask::FOREGROUND` (255). Produced by thresholding an alpha channel
//! and consumed by connected-region labeling.
use super::traits::ImageView;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    /// Mask width in pixels
    pub w: usize,
    /// Mask height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<u8>,
}

impl BinaryMask {
    pub const BACKGROUND: u8 = 0;
    pub const FOREGROUND: u8 = 255;

    /// Construct an all-background mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![Self::BACKGROUND; w * h],
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Self::FOREGROUND
    }

    #[inline]
    /// Set (x, y) to foreground when `on`, background otherwise.
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        let i = self.idx(x, y);
        self.data[i] = if on {
            Self::FOREGROUND
        } else {
            Self::BACKGROUND
        };
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.data
            .iter()
            .filter(|&&v| v == Self::FOREGROUND)
            .count()
    }
}

impl ImageView for BinaryMask {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
