//! Contrast and saturation enhancement.

use image::{Rgb, RgbImage};

/// ITU-R 601-2 luma of an sRGB pixel, in 16.16 fixed point.
#[inline]
pub fn luma(pixel: Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Blend one channel from `degenerate` towards (and past) `original`.
#[inline]
fn blend(degenerate: u8, original: u8, factor: f32) -> u8 {
    let value = degenerate as f32 + factor * (original as f32 - degenerate as f32);
    // Truncation after clamping mirrors 8-bit blend implementations
    value.clamp(0.0, 255.0) as u8
}

/// Adjust image contrast in place.
///
/// `factor` 0 gives a solid gray at the image's mean luma, 1 leaves the
/// image unchanged, and larger values increase contrast.
pub fn contrast(image: &mut RgbImage, factor: f32) {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return;
    }

    let sum: u64 = image.pixels().map(|p| luma(*p) as u64).sum();
    let mean = (sum as f64 / count as f64 + 0.5) as u8;

    for pixel in image.pixels_mut() {
        for c in 0..3 {
            pixel.0[c] = blend(mean, pixel.0[c], factor);
        }
    }
}

/// Adjust color saturation in place.
///
/// `factor` 0 gives a grayscale image, 1 leaves the image unchanged, and
/// larger values boost saturation.
pub fn saturation(image: &mut RgbImage, factor: f32) {
    for pixel in image.pixels_mut() {
        let gray = luma(*pixel);
        for c in 0..3 {
            pixel.0[c] = blend(gray, pixel.0[c], factor);
        }
    }
}
