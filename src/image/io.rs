//! I/O helpers for alpha channels and debug masks.
//!
//! - `load_alpha_image`: decode a PNG and keep only its alpha channel.
//! - `save_mask_png`: write a `BinaryMask` as an 8-bit grayscale PNG.
use super::{BinaryMask, ImageU8, ImageView};
use image::{DynamicImage, GrayImage, Luma};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has zero width or height")]
    Empty { path: PathBuf },
    #[error("failed to save {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Owned alpha samples of a decoded raster, one byte per pixel.
///
/// 0 is fully transparent, 255 fully opaque. Images without an alpha channel
/// decode as fully opaque.
#[derive(Clone, Debug)]
pub struct AlphaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl AlphaImage {
    /// Extract the alpha channel of an already decoded image.
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        let data = if img.color().has_alpha() {
            img.to_rgba8().pixels().map(|p| p.0[3]).collect()
        } else {
            vec![u8::MAX; width * height]
        };
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8::packed(self.width, self.height, &self.data)
    }
}

/// Decode an image from disk and keep its alpha channel.
pub fn load_alpha_image(path: &Path) -> Result<AlphaImage, ImageIoError> {
    let img = image::open(path).map_err(|source| ImageIoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    if img.width() == 0 || img.height() == 0 {
        return Err(ImageIoError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(AlphaImage::from_dynamic(&img))
}

/// Save a mask to a grayscale PNG, creating parent directories.
pub fn save_mask_png(mask: &BinaryMask, path: &Path) -> Result<(), ImageIoError> {
    ensure_parent_dir(path)?;
    let encode_err = |source| ImageIoError::Encode {
        path: path.to_path_buf(),
        source,
    };
    let buffer = GrayImage::from_fn(mask.width() as u32, mask.height() as u32, |x, y| {
        Luma([mask.row(y as usize)[x as usize]])
    });
    DynamicImage::ImageLuma8(buffer)
        .save(path)
        .map_err(encode_err)
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), ImageIoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ImageIoError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
