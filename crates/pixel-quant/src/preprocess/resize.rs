//! Nearest-neighbor resizing.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Resize with nearest-neighbor sampling.
///
/// Returns a copy when the dimensions already match.
pub fn resize_nearest(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Nearest)
}
