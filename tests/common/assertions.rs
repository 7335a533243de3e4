//! Assertion helpers for tests.

use image::RgbImage;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::path::Path;

/// Load an output image as RGB
pub fn load_rgb(path: &Path) -> RgbImage {
    image::open(path)
        .unwrap_or_else(|e| panic!("failed to open {}: {e}", path.display()))
        .to_rgb8()
}

/// Assert an image file exists with the given dimensions
pub fn assert_image_size(path: &Path, width: u32, height: u32) {
    assert!(path.exists(), "Expected output {} to exist", path.display());
    assert_eq!(
        load_rgb(path).dimensions(),
        (width, height),
        "Unexpected size for {}",
        path.display()
    );
}

/// Number of distinct colors in an image
pub fn color_count(image: &RgbImage) -> usize {
    image.pixels().map(|p| p.0).collect::<HashSet<_>>().len()
}
