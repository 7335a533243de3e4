pub mod batch;
pub mod driver;
pub mod naming;
pub mod palette_tools;
pub mod pixel_size;
pub mod transformer;

pub use batch::BatchExpander;
pub use driver::{BatchReport, PipelineDriver, PipelineOptions};
pub use palette_tools::{extract_palette, load_palette_image, palette_swatch, resolve_palettes};
pub use pixel_size::PixelSizeDetector;
pub use transformer::{VariantOutput, VariantTransformer};
