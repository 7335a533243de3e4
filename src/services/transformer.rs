use crate::error::PipelineError;
use crate::models::Variant;
use crate::services::naming::{downscaled_path, named_color_count, variant_path};
use image::RgbImage;
use pixel_quant::{contrast, resize_nearest, saturation, DitherMode, Quantizer, MAX_COLORS};
use std::path::{Path, PathBuf};

/// Files written for one variant
#[derive(Debug, Clone, PartialEq)]
pub struct VariantOutput {
    pub variant: Variant,
    /// Full-size output
    pub path: PathBuf,
    /// Downscaled copy, when requested
    pub downscaled_path: Option<PathBuf>,
    /// Colors the variant was reduced to
    pub effective_colors: usize,
}

/// Applies one variant to a downscaled image and writes the result
#[derive(Debug, Clone, Copy, Default)]
pub struct VariantTransformer {
    save_downscaled: bool,
}

impl VariantTransformer {
    pub fn new(save_downscaled: bool) -> Self {
        Self { save_downscaled }
    }

    /// Process `image` (an independent copy of the downscaled base) and
    /// save it at `(original_width, original_height)`.
    pub fn transform(
        &self,
        image: RgbImage,
        output_base: &Path,
        original_size: (u32, u32),
        variant: &Variant,
    ) -> Result<VariantOutput, PipelineError> {
        let path = variant_path(output_base, variant);
        self.apply(image, &path, original_size, variant)
            .map_err(|e| e.for_output(&path))
    }

    fn apply(
        &self,
        mut image: RgbImage,
        path: &Path,
        (original_width, original_height): (u32, u32),
        variant: &Variant,
    ) -> Result<VariantOutput, PipelineError> {
        if variant.contrast != 1.0 {
            contrast(&mut image, variant.contrast);
        }
        if variant.saturation != 1.0 {
            saturation(&mut image, variant.saturation);
        }

        let quantizer = match &variant.palette {
            Some(palette) => Quantizer::with_palette(palette.palette.clone()),
            None => Quantizer::adaptive(MAX_COLORS)?,
        };
        let indexed = quantizer.dither(variant.dither).quantize(&image)?;
        let mut processed = indexed.to_rgb_image();

        // A palette with no count keeps its mapping; only an explicit count
        // triggers the second, undithered pass
        if variant.color_count > 0 {
            processed = Quantizer::adaptive(variant.color_count)?
                .dither(DitherMode::None)
                .quantize(&processed)?
                .to_rgb_image();
        }
        let effective_colors =
            named_color_count(variant).unwrap_or_else(|| indexed.palette().len());

        let downscaled = if self.save_downscaled {
            let small_path = downscaled_path(path);
            processed.save(&small_path)?;
            Some(small_path)
        } else {
            None
        };

        let full = resize_nearest(&processed, original_width, original_height);
        full.save(path)?;

        tracing::debug!(
            path = %path.display(),
            colors = effective_colors,
            "Wrote variant"
        );

        Ok(VariantOutput {
            variant: variant.clone(),
            path: path.to_path_buf(),
            downscaled_path: downscaled,
            effective_colors,
        })
    }
}
