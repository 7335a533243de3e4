#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! pixel-quant: color quantization primitives for pixel-art rendering
//!
//! This library provides the image operations a pixel-art pipeline is built
//! from: palette matching, adaptive palette generation, error diffusion
//! dithering, blend-based enhancement and hard-edged resizing. It works on
//! [`image::RgbImage`] buffers and never touches the filesystem.
//!
//! # Quick Start
//!
//! The [`Quantizer`] builder is the primary entry point:
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use pixel_quant::{DitherMode, Palette, Quantizer};
//!
//! let palette = Palette::new(&[Rgb([0, 0, 0]), Rgb([255, 255, 255])]).unwrap();
//! let image = RgbImage::from_pixel(4, 4, Rgb([128, 128, 128]));
//!
//! let indexed = Quantizer::with_palette(palette)
//!     .dither(DitherMode::FloydSteinberg)
//!     .quantize(&image)
//!     .unwrap();
//!
//! assert_eq!(indexed.width(), 4);
//! assert_eq!(indexed.to_rgb_image().dimensions(), (4, 4));
//! ```
//!
//! # Quantization Targets
//!
//! - **Adaptive**: a palette of at most `max_colors` entries is chosen from
//!   the image itself by the `quantette` Wu quantizer ([`generate_palette`]).
//!   Images that already use few enough colors keep them exactly.
//! - **Fixed**: every pixel is mapped onto a caller supplied [`Palette`].
//!
//! Fixed-palette matching uses squared Euclidean distance in sRGB byte
//! space. Error diffusion also runs in sRGB space for both targets, which
//! is what classic pixel-art tools do; perceptual accuracy is not a goal of
//! this crate.
//!
//! # Pipeline Overview
//!
//! ```text
//! RgbImage
//!     |
//!     v
//! [contrast / saturation]   (blend against a degenerate image)
//!     |
//!     v
//! [palette selection]       (quantette Wu, or fixed palette)
//!     |
//!     v
//! [remap]                   (nearest color, optional Floyd-Steinberg)
//!     |
//!     v
//! IndexedImage --> RgbImage --> [resize_nearest]
//! ```

pub mod api;
pub mod dither;
pub mod output;
pub mod palette;
pub mod preprocess;
pub mod quantize;

pub use api::{QuantizeError, QuantizeTarget, Quantizer};
pub use dither::{remap, DitherMode};
pub use output::IndexedImage;
pub use palette::{hex_to_rgb, rgb_to_hex, Palette, PaletteError, ParseColorError};
pub use preprocess::{contrast, resize_nearest, saturation};
pub use quantize::{distinct_colors, generate_palette};

/// The maximum number of colors a palette may hold.
///
/// Indexed pixels are stored as `u8`, so palettes are capped at 256 entries.
pub const MAX_COLORS: usize = 256;
