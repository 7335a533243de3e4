use crate::error::PipelineError;
use crate::models::ParameterAxes;
use crate::services::transformer::{VariantOutput, VariantTransformer};
use image::RgbImage;
use std::path::Path;

/// Runs every variant of the parameter product against one image
#[derive(Debug, Clone)]
pub struct BatchExpander<'a> {
    axes: &'a ParameterAxes,
    transformer: VariantTransformer,
}

impl<'a> BatchExpander<'a> {
    pub fn new(axes: &'a ParameterAxes, transformer: VariantTransformer) -> Self {
        Self { axes, transformer }
    }

    /// Transform a fresh copy of `base` once per variant.
    ///
    /// Returns one result per variant in product order. A failed variant
    /// does not stop or undo the others.
    pub fn expand(
        &self,
        base: &RgbImage,
        output_base: &Path,
        original_size: (u32, u32),
    ) -> Vec<Result<VariantOutput, PipelineError>> {
        self.axes
            .variants()
            .iter()
            .map(|variant| {
                let result =
                    self.transformer
                        .transform(base.clone(), output_base, original_size, variant);
                if let Err(ref e) = result {
                    tracing::warn!(%e, "Variant failed");
                }
                result
            })
            .collect()
    }
}
