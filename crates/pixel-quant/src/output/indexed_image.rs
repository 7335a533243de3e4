//! IndexedImage: palette indices plus the palette they refer to.

use image::{ImageBuffer, RgbImage};

use crate::palette::Palette;

/// The canonical output of quantization.
///
/// Stores one `u8` palette index per pixel in row-major order, together
/// with the image dimensions and the palette used.
///
/// # Example
///
/// ```
/// use image::Rgb;
/// use pixel_quant::{IndexedImage, Palette};
///
/// let palette = Palette::new(&[Rgb([0, 0, 0]), Rgb([255, 255, 255])]).unwrap();
/// let image = IndexedImage::new(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.indices(), &[0, 1, 1, 0]);
/// assert_eq!(image.to_rgb_image().get_pixel(1, 0), &Rgb([255, 255, 255]));
/// ```
#[derive(Debug, Clone)]
pub struct IndexedImage {
    indices: Vec<u8>,
    width: u32,
    height: u32,
    palette: Palette,
}

impl IndexedImage {
    /// Create a new `IndexedImage`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: u32, height: u32, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width as usize * height as usize,
            "indices length ({}) must match {}x{}",
            indices.len(),
            width,
            height,
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Number of distinct palette entries actually referenced by pixels.
    pub fn used_colors(&self) -> usize {
        let mut used = [false; crate::MAX_COLORS];
        for &idx in &self.indices {
            used[idx as usize] = true;
        }
        used.iter().filter(|&&u| u).count()
    }

    /// Expand to a full-color RGB image by looking up each index.
    pub fn to_rgb_image(&self) -> RgbImage {
        let width = self.width as usize;
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let idx = self.indices[y as usize * width + x as usize];
            self.palette.color(idx as usize)
        })
    }
}
