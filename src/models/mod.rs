pub mod palette;
pub mod params;

pub use palette::{PaletteCollection, PaletteImage, PaletteInfo, PaletteRecord, PaletteSource};
pub use params::{DitherSelector, ParameterAxes, Variant};
