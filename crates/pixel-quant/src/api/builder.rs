//! Quantizer builder, the primary entry point for the crate.

use image::RgbImage;

use super::error::QuantizeError;
use crate::dither::{remap, DitherMode};
use crate::output::IndexedImage;
use crate::palette::Palette;
use crate::quantize::quantize_adaptive;
use crate::MAX_COLORS;

/// Where the output colors come from.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantizeTarget {
    /// Derive at most `max_colors` colors from the image.
    Adaptive { max_colors: usize },
    /// Map onto a fixed palette.
    Fixed(Palette),
}

/// Reduce an image to an indexed image.
///
/// - Constructors fix the target ([`adaptive`](Self::adaptive) or
///   [`with_palette`](Self::with_palette))
/// - [`dither`](Self::dither) consumes and returns `self`
/// - [`quantize`](Self::quantize) takes `&self`, so one quantizer can be
///   applied to many images
///
/// # Example
///
/// ```
/// use image::{Rgb, RgbImage};
/// use pixel_quant::{DitherMode, Quantizer};
///
/// let image = RgbImage::from_fn(8, 8, |x, y| Rgb([(x * 32) as u8, (y * 32) as u8, 0]));
/// let indexed = Quantizer::adaptive(4)
///     .unwrap()
///     .dither(DitherMode::FloydSteinberg)
///     .quantize(&image)
///     .unwrap();
///
/// assert!(indexed.palette().len() <= 4);
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    target: QuantizeTarget,
    dither: DitherMode,
}

impl Quantizer {
    /// Quantize to an adaptive palette of at most `max_colors` colors.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::InvalidColorCount`] unless `1 <= max_colors <= 256`.
    pub fn adaptive(max_colors: usize) -> Result<Self, QuantizeError> {
        if max_colors == 0 || max_colors > MAX_COLORS {
            return Err(QuantizeError::InvalidColorCount(max_colors));
        }
        Ok(Self {
            target: QuantizeTarget::Adaptive { max_colors },
            dither: DitherMode::default(),
        })
    }

    /// Quantize onto a fixed palette.
    pub fn with_palette(palette: Palette) -> Self {
        Self {
            target: QuantizeTarget::Fixed(palette),
            dither: DitherMode::default(),
        }
    }

    /// Set the dithering mode (default: [`DitherMode::None`]).
    #[inline]
    pub fn dither(mut self, mode: DitherMode) -> Self {
        self.dither = mode;
        self
    }

    /// Quantize `image`.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::EmptyImage`] for zero-sized input.
    pub fn quantize(&self, image: &RgbImage) -> Result<IndexedImage, QuantizeError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(QuantizeError::EmptyImage);
        }

        let (palette, indices) = match &self.target {
            QuantizeTarget::Adaptive { max_colors } => {
                quantize_adaptive(image, *max_colors, self.dither)?
            }
            QuantizeTarget::Fixed(palette) => {
                (palette.clone(), remap(image, palette, self.dither))
            }
        };

        Ok(IndexedImage::new(indices, width, height, palette))
    }
}
