//! pixelart-colors
//!
//! Turns raster images into pixel art across grids of processing options.
//! This library exposes the pipeline modules for the CLI and for
//! integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod services;
