//! Palette struct with nearest-color matching.
//!
//! A [`Palette`] is the fixed color set an image is quantized against. Its
//! entry order is significant: indexed pixels refer to colors by position,
//! and ties in nearest-color matching resolve to the lowest index.

use std::collections::HashSet;

use image::Rgb;

use super::error::PaletteError;
use super::hex::hex_to_rgb;
use crate::MAX_COLORS;

/// An ordered set of unique RGB colors.
///
/// # Example
///
/// ```
/// use image::Rgb;
/// use pixel_quant::Palette;
///
/// let palette = Palette::new(&[Rgb([0, 0, 0]), Rgb([255, 255, 255])]).unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.find_nearest([200.0, 190.0, 210.0]), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb<u8>>,
}

impl Palette {
    /// Create a palette from unique colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::TooManyColors`] if there are more than 256 colors
    /// - [`PaletteError::DuplicateColor`] if a color repeats
    pub fn new(colors: &[Rgb<u8>]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > MAX_COLORS {
            return Err(PaletteError::TooManyColors {
                count: colors.len(),
            });
        }

        let mut seen = HashSet::new();
        for (i, color) in colors.iter().enumerate() {
            if !seen.insert(color.0) {
                return Err(PaletteError::DuplicateColor { index: i });
            }
        }

        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Create a palette from colors that may repeat.
    ///
    /// Later duplicates are dropped; the first occurrence keeps its
    /// position. Console palettes routinely list black several times, so
    /// palette files go through this constructor.
    ///
    /// ```
    /// use image::Rgb;
    /// use pixel_quant::Palette;
    ///
    /// let black = Rgb([0, 0, 0]);
    /// let white = Rgb([255, 255, 255]);
    /// let palette = Palette::from_colors_dedup(&[black, white, black]).unwrap();
    ///
    /// assert_eq!(palette.colors(), &[black, white]);
    /// ```
    pub fn from_colors_dedup(colors: &[Rgb<u8>]) -> Result<Self, PaletteError> {
        let mut seen = HashSet::new();
        let unique: Vec<Rgb<u8>> = colors
            .iter()
            .copied()
            .filter(|c| seen.insert(c.0))
            .collect();
        Self::new(&unique)
    }

    /// Create a palette from hex color strings (duplicates are rejected).
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| hex_to_rgb(s).map_err(PaletteError::ParseColor))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed)
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get the color at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn color(&self, index: usize) -> Rgb<u8> {
        self.colors[index]
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb<u8>] {
        &self.colors
    }

    /// Find the index of the palette color closest to `pixel`.
    ///
    /// `pixel` is given in floating point so that error diffusion can pass
    /// values carrying accumulated error. Distance is squared Euclidean in
    /// sRGB space; the lowest index wins on ties.
    pub fn find_nearest(&self, pixel: [f32; 3]) -> usize {
        let mut best_index = 0;
        let mut best_distance = f32::INFINITY;

        for (i, color) in self.colors.iter().enumerate() {
            let dr = pixel[0] - color.0[0] as f32;
            let dg = pixel[1] - color.0[1] as f32;
            let db = pixel[2] - color.0[2] as f32;
            let distance = dr * dr + dg * dg + db * db;
            if distance < best_distance {
                best_distance = distance;
                best_index = i;
            }
        }

        best_index
    }
}
