//! Unified error type for the pixel-quant public API.

use std::fmt;

use crate::palette::PaletteError;

/// Error type returned by [`Quantizer`](crate::Quantizer).
///
/// # Example
///
/// ```
/// use pixel_quant::{QuantizeError, Quantizer};
///
/// assert!(matches!(
///     Quantizer::adaptive(0),
///     Err(QuantizeError::InvalidColorCount(0))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum QuantizeError {
    /// Palette construction failed
    Palette(PaletteError),
    /// Adaptive color count outside `1..=256`
    InvalidColorCount(usize),
    /// The input image has no pixels
    EmptyImage,
    /// The input image has more pixels than the quantizer can index
    ImageTooLarge,
}

impl fmt::Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeError::Palette(err) => write!(f, "palette error: {}", err),
            QuantizeError::InvalidColorCount(count) => write!(
                f,
                "color count must be between 1 and {}, got {}",
                crate::MAX_COLORS,
                count
            ),
            QuantizeError::EmptyImage => write!(f, "image has no pixels"),
            QuantizeError::ImageTooLarge => {
                write!(f, "image has more than {} pixels", quantette::MAX_PIXELS)
            }
        }
    }
}

impl std::error::Error for QuantizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuantizeError::Palette(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for QuantizeError {
    fn from(err: PaletteError) -> Self {
        QuantizeError::Palette(err)
    }
}
