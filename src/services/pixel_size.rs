//! Pixel-art cell size detection.
//!
//! An upscaled pixel-art image is made of uniform `s x s` cells. For each
//! candidate size the detector counts the fraction of grid blocks that are
//! uniform and keeps the best size, with a small bonus for larger sizes so
//! that equal scores favor the coarser grid.

use image::RgbImage;

/// Per-size bonus added to the uniform-block ratio.
const SIZE_BONUS: f64 = 0.01;

/// Minimum uniform-block ratio for a size to be accepted.
const ACCEPT_RATIO: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSizeDetector {
    max_size: u32,
    tolerance: u8,
}

impl Default for PixelSizeDetector {
    fn default() -> Self {
        Self {
            max_size: 32,
            tolerance: 5,
        }
    }
}

impl PixelSizeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest cell size considered (default 32).
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Per-channel difference still counted as the same color (default 5).
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Return the detected cell size, or 1 if no size is convincing.
    pub fn detect(&self, image: &RgbImage) -> u32 {
        let (width, height) = image.dimensions();
        let largest = self.max_size.min(width / 2).min(height / 2);

        let mut best_size = 1;
        let mut best_score = 0.0;

        for size in (2..=largest).rev() {
            if width % size != 0 || height % size != 0 {
                continue;
            }
            let score = self.uniform_ratio(image, size) + size as f64 * SIZE_BONUS;
            if score > best_score {
                best_score = score;
                best_size = size;
            }
        }

        let raw = best_score - best_size as f64 * SIZE_BONUS;
        let detected = if best_size > 1 && raw > ACCEPT_RATIO {
            best_size
        } else {
            1
        };
        tracing::debug!(size = detected, score = raw, "Detected pixel size");
        detected
    }

    /// Fraction of full `size x size` blocks whose pixels all match the
    /// block's top-left pixel within tolerance.
    fn uniform_ratio(&self, image: &RgbImage, size: u32) -> f64 {
        let blocks_x = image.width() / size;
        let blocks_y = image.height() / size;
        let total = blocks_x * blocks_y;
        if total == 0 {
            return 0.0;
        }

        let mut uniform = 0u32;
        for by in 0..blocks_y {
            for bx in 0..blocks_x {
                if self.is_uniform(image, bx * size, by * size, size) {
                    uniform += 1;
                }
            }
        }
        uniform as f64 / total as f64
    }

    fn is_uniform(&self, image: &RgbImage, x0: u32, y0: u32, size: u32) -> bool {
        let reference = image.get_pixel(x0, y0).0;
        (y0..y0 + size).all(|y| {
            (x0..x0 + size).all(|x| {
                let pixel = image.get_pixel(x, y).0;
                (0..3).all(|c| pixel[c].abs_diff(reference[c]) <= self.tolerance)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn blocky(cells_x: u32, cells_y: u32, cell: u32, seed: u64) -> RgbImage {
        let mut rng = StdRng::seed_from_u64(seed);
        let colors: Vec<Rgb<u8>> = (0..cells_x * cells_y).map(|_| Rgb(rng.gen())).collect();
        RgbImage::from_fn(cells_x * cell, cells_y * cell, |x, y| {
            colors[((y / cell) * cells_x + x / cell) as usize]
        })
    }

    #[test]
    fn test_detects_block_size() {
        assert_eq!(PixelSizeDetector::new().detect(&blocky(16, 16, 4, 1)), 4);
        assert_eq!(PixelSizeDetector::new().detect(&blocky(10, 6, 3, 2)), 3);
    }

    #[test]
    fn test_noise_is_size_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let image = RgbImage::from_fn(64, 64, |_, _| Rgb(rng.gen()));
        assert_eq!(PixelSizeDetector::new().detect(&image), 1);
    }

    #[test]
    fn test_equal_scores_prefer_larger_size() {
        // 8x8 cells are also uniform at 4 and 2
        assert_eq!(PixelSizeDetector::new().detect(&blocky(8, 8, 8, 3)), 8);
    }

    #[test]
    fn test_tolerance() {
        let mut image = blocky(8, 8, 4, 4);
        // Nudge one pixel per block by less than the tolerance
        for by in 0..8 {
            for bx in 0..8 {
                let pixel = image.get_pixel_mut(bx * 4 + 3, by * 4 + 3);
                pixel.0[0] = pixel.0[0].saturating_add(3);
            }
        }
        assert_eq!(PixelSizeDetector::new().detect(&image), 4);
        // Exact matching only keeps the 2x2 blocks that miss the nudged pixel
        assert_eq!(PixelSizeDetector::new().with_tolerance(0).detect(&image), 2);
    }

    #[test]
    fn test_max_size_caps_candidates() {
        let image = blocky(4, 4, 16, 5);
        assert_eq!(PixelSizeDetector::new().detect(&image), 16);
        assert_eq!(PixelSizeDetector::new().with_max_size(8).detect(&image), 8);
    }

    #[test]
    fn test_small_and_uniform_images() {
        assert_eq!(PixelSizeDetector::new().detect(&RgbImage::new(1, 1)), 1);
        assert_eq!(PixelSizeDetector::new().detect(&RgbImage::new(3, 3)), 1);
        // A flat 8x8 image is one big cell; the largest candidate is 4
        let flat = RgbImage::from_pixel(8, 8, Rgb([7, 7, 7]));
        assert_eq!(PixelSizeDetector::new().detect(&flat), 4);
    }
}
