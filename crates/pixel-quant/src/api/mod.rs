//! Public API for the pixel-quant crate.
//!
//! This module provides the high-level API: the [`Quantizer`] builder and
//! the [`QuantizeError`] error type.

mod builder;
mod error;

pub use builder::{QuantizeTarget, Quantizer};
pub use error::QuantizeError;
