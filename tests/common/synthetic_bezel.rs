use image::{Rgba, RgbaImage};
use std::path::Path;

/// Screen cutout as `(x, y, width, height)`.
pub type Hole = (u32, u32, u32, u32);

/// Opaque frame with fully transparent rectangular cutouts.
pub fn bezel_rgba(width: u32, height: u32, holes: &[Hole]) -> RgbaImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = RgbaImage::from_pixel(width, height, Rgba([40, 30, 20, 255]));
    for &(x0, y0, w, h) in holes {
        assert!(x0 + w <= width && y0 + h <= height, "hole outside image");
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                img.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
    }
    img
}

pub fn write_bezel(path: &Path, width: u32, height: u32, holes: &[Hole]) {
    bezel_rgba(width, height, holes).save(path).unwrap();
}
