//! Palette selection from image content.
//!
//! - [`generate_palette`]: choose at most `max_colors` representative colors
//! - [`distinct_colors`]: list the colors an image uses, in scan order
//!
//! Adaptive palettes come from `quantette` (Wu's quantizer in sRGB space).
//! Images that already use few enough colors skip it and keep their colors
//! exactly.

use std::collections::HashSet;

use image::{Rgb, RgbImage};
use quantette::{ImagePipeline, PaletteSize};

use crate::api::QuantizeError;
use crate::dither::{remap, DitherMode};
use crate::palette::Palette;
use crate::MAX_COLORS;

/// Distinct colors of `image` in first-seen (row-major) order.
///
/// Palette swatch images store their entries left to right, so scan order
/// is the palette order.
pub fn distinct_colors(image: &RgbImage) -> Vec<Rgb<u8>> {
    let mut seen = HashSet::new();
    image.pixels().copied().filter(|p| seen.insert(p.0)).collect()
}

/// Choose a palette of at most `max_colors` colors for `image`.
///
/// # Errors
///
/// - [`QuantizeError::InvalidColorCount`] unless `1 <= max_colors <= 256`
/// - [`QuantizeError::EmptyImage`] for zero-sized input
///
/// ```
/// use image::{Rgb, RgbImage};
/// use pixel_quant::generate_palette;
///
/// let image = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 16) as u8, 90]));
/// let palette = generate_palette(&image, 8).unwrap();
///
/// assert!(palette.len() <= 8);
/// ```
pub fn generate_palette(image: &RgbImage, max_colors: usize) -> Result<Palette, QuantizeError> {
    check_input(image, max_colors)?;

    let exact = distinct_colors(image);
    if exact.len() <= max_colors {
        return Ok(Palette::new(&exact)?);
    }

    let pipeline = pipeline(image, max_colors)?;
    let colors: Vec<Rgb<u8>> = pipeline
        .palette()
        .into_iter()
        .map(|c| Rgb([c.red, c.green, c.blue]))
        .collect();
    Ok(Palette::from_colors_dedup(&colors)?)
}

/// Quantize `image` to an adaptive palette, returning the palette and one
/// index per pixel.
pub(crate) fn quantize_adaptive(
    image: &RgbImage,
    max_colors: usize,
    mode: DitherMode,
) -> Result<(Palette, Vec<u8>), QuantizeError> {
    check_input(image, max_colors)?;

    let exact = distinct_colors(image);
    if exact.len() <= max_colors {
        // Every pixel is a palette entry, so there is no error to diffuse
        let palette = Palette::new(&exact)?;
        let indices = remap(image, &palette, DitherMode::None);
        return Ok((palette, indices));
    }

    let mut pipeline = pipeline(image, max_colors)?;
    pipeline
        .dither(mode == DitherMode::FloydSteinberg)
        .dither_error_diffusion(1.0);
    let (colors, raw_indices) = pipeline.indexed_palette();

    // Wu centroids can round onto the same color; fold those entries together
    let colors: Vec<Rgb<u8>> = colors
        .into_iter()
        .map(|c| Rgb([c.red, c.green, c.blue]))
        .collect();
    let palette = Palette::from_colors_dedup(&colors)?;
    let folded: Vec<u8> = colors
        .iter()
        .map(|c| palette.find_nearest([c.0[0] as f32, c.0[1] as f32, c.0[2] as f32]) as u8)
        .collect();
    let indices = raw_indices
        .into_iter()
        .map(|i| folded[usize::from(i)])
        .collect();

    Ok((palette, indices))
}

fn check_input(image: &RgbImage, max_colors: usize) -> Result<(), QuantizeError> {
    if max_colors == 0 || max_colors > MAX_COLORS {
        return Err(QuantizeError::InvalidColorCount(max_colors));
    }
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(QuantizeError::EmptyImage);
    }
    Ok(())
}

fn pipeline(image: &RgbImage, max_colors: usize) -> Result<ImagePipeline<'_>, QuantizeError> {
    let mut pipeline =
        ImagePipeline::try_from(image).map_err(|_| QuantizeError::ImageTooLarge)?;
    pipeline.palette_size(PaletteSize::from_clamped(max_colors as u16));
    Ok(pipeline)
}
