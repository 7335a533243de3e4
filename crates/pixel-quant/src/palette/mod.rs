//! Palette types and utilities
//!
//! This module provides the [`Palette`] quantization target, hex color
//! helpers and the error types for parsing and validation.

mod error;
mod hex;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use hex::{hex_to_rgb, rgb_to_hex};
pub use palette::Palette;
