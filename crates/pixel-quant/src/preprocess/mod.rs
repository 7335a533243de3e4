//! Image preprocessing: enhancement and resizing.
//!
//! Enhancement follows the classic "blend against a degenerate image"
//! model: a factor of 0 yields the degenerate image, 1 the original, and
//! values above 1 extrapolate away from the degenerate image.
//!
//! | Operation      | Degenerate image                    |
//! |----------------|-------------------------------------|
//! | [`contrast`]   | solid gray at the mean luma          |
//! | [`saturation`] | per-pixel grayscale (luma)           |
//!
//! Resizing is nearest-neighbor only; smoothing filters would blur the
//! hard pixel edges the pipeline exists to produce.

mod enhance;
mod resize;

pub use enhance::{contrast, luma, saturation};
pub use resize::resize_nearest;
