//! Palette remapping with optional error diffusion.
//!
//! [`remap`] turns an RGB image into palette indices. With
//! [`DitherMode::None`] every pixel takes its nearest palette color; with
//! [`DitherMode::FloydSteinberg`] the quantization error of each pixel is
//! spread onto its unprocessed neighbors.
//!
//! Scanning is plain left-to-right, top-to-bottom (no serpentine), and
//! error is accumulated in sRGB byte space.

mod kernel;

pub use kernel::{Kernel, FLOYD_STEINBERG};

use std::collections::HashMap;
use std::fmt;

use image::RgbImage;

use crate::palette::Palette;

/// Dithering applied while remapping to a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherMode {
    /// Nearest color only.
    #[default]
    None,
    /// Floyd-Steinberg error diffusion (100% propagation).
    FloydSteinberg,
}

impl DitherMode {
    /// The literal mode name, as used in output file names.
    pub fn name(self) -> &'static str {
        match self {
            DitherMode::None => "NONE",
            DitherMode::FloydSteinberg => "FLOYDSTEINBERG",
        }
    }
}

impl fmt::Display for DitherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map every pixel of `image` to an index into `palette`.
///
/// Returns one index per pixel in row-major order.
pub fn remap(image: &RgbImage, palette: &Palette, mode: DitherMode) -> Vec<u8> {
    match mode {
        DitherMode::None => remap_nearest(image, palette),
        DitherMode::FloydSteinberg => diffuse(image, palette, &FLOYD_STEINBERG),
    }
}

fn remap_nearest(image: &RgbImage, palette: &Palette) -> Vec<u8> {
    // Pixel-art inputs repeat a handful of colors, so memoize lookups
    let mut cache: HashMap<[u8; 3], u8> = HashMap::new();

    image
        .pixels()
        .map(|pixel| {
            *cache.entry(pixel.0).or_insert_with(|| {
                let [r, g, b] = pixel.0;
                palette.find_nearest([r as f32, g as f32, b as f32]) as u8
            })
        })
        .collect()
}

fn diffuse(image: &RgbImage, palette: &Palette, kernel: &Kernel) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let (width, height) = (width as usize, height as usize);
    let mut output = Vec::with_capacity(width * height);
    let divisor = f32::from(kernel.divisor);

    // Pending error for the rows the kernel reaches; row y lives in slot y % depth
    let depth = kernel.max_dy + 1;
    let mut pending = vec![[0.0f32; 3]; width * depth];

    for y in 0..height {
        let row = (y % depth) * width;
        for x in 0..width {
            let source = image.get_pixel(x as u32, y as u32).0;
            let carried = std::mem::take(&mut pending[row + x]);
            let pixel: [f32; 3] =
                std::array::from_fn(|c| (f32::from(source[c]) + carried[c]).clamp(0.0, 255.0));

            let nearest = palette.find_nearest(pixel);
            output.push(nearest as u8);

            let chosen = palette.color(nearest).0;
            let error: [f32; 3] = std::array::from_fn(|c| pixel[c] - f32::from(chosen[c]));

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i32 + dx;
                let ny = y + dy as usize;
                if nx < 0 || nx as usize >= width || ny >= height {
                    continue;
                }
                let share = f32::from(weight) / divisor;
                let target = &mut pending[(ny % depth) * width + nx as usize];
                for c in 0..3 {
                    target[c] += error[c] * share;
                }
            }
        }
    }

    output
}
