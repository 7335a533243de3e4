//! Palette resolution, extraction and swatch rendering.

use crate::error::PipelineError;
use crate::models::{PaletteImage, PaletteSource};
use image::{Rgb, RgbImage};
use pixel_quant::{distinct_colors, generate_palette, resize_nearest, Palette, MAX_COLORS};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Swatch cell edge in pixels.
pub const SWATCH_CELL: u32 = 32;

/// Resolve palette identifiers into quantization targets.
///
/// Each identifier is tried as a stored palette name (case insensitive),
/// then as a palette image file, then as a directory searched recursively
/// for `.png` palette images. Resolution is eager: any unknown identifier
/// fails the whole call.
pub fn resolve_palettes(
    ids: &[String],
    source: &dyn PaletteSource,
) -> Result<Vec<PaletteImage>, PipelineError> {
    let names = source.list_names();
    let mut resolved = Vec::with_capacity(ids.len());

    for id in ids {
        if names.contains(&id.to_lowercase()) {
            let palette = source.get_image(id)?;
            tracing::debug!(palette = %palette.name, colors = palette.color_count(), "Loaded built-in palette");
            resolved.push(palette);
            continue;
        }

        let path = Path::new(id);
        if path.is_dir() {
            let files = palette_images_in(path)?;
            if files.is_empty() {
                tracing::warn!(dir = %path.display(), "No palette images in directory");
            }
            for file in files {
                resolved.push(load_palette_image(&file)?);
            }
        } else if path.is_file() {
            resolved.push(load_palette_image(path)?);
        } else {
            return Err(PipelineError::PaletteNotFound(id.clone()));
        }
    }

    Ok(resolved)
}

/// `.png` files anywhere below `dir`, in file-name order per directory.
fn palette_images_in(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| PipelineError::Io(e.into()))?;
        if entry.file_type().is_file() && has_extension(entry.path(), &["png"]) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Load a palette image, named after its file stem.
///
/// The palette is the image's distinct colors in scan order; images with
/// more than 256 colors are reduced to 256 by the adaptive quantizer.
pub fn load_palette_image(path: &Path) -> Result<PaletteImage, PipelineError> {
    let image = image::open(path)?.to_rgb8();
    let colors = distinct_colors(&image);
    let palette = if colors.len() > MAX_COLORS {
        tracing::debug!(
            path = %path.display(),
            colors = colors.len(),
            "Palette image has too many colors, reducing"
        );
        generate_palette(&image, MAX_COLORS)?
    } else {
        Palette::new(&colors).map_err(|e| PipelineError::Quantize(e.into()))?
    };

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    tracing::debug!(palette = %name, colors = palette.len(), "Loaded custom palette");
    Ok(PaletteImage::new(name, palette))
}

/// Choose `count` representative colors of an image.
pub fn extract_palette(image: &RgbImage, count: usize) -> Result<Palette, PipelineError> {
    if count == 0 || count > MAX_COLORS {
        return Err(PipelineError::InvalidParameter(format!(
            "color count must be between 1 and {MAX_COLORS}, got {count}"
        )));
    }
    Ok(generate_palette(image, count)?)
}

/// A strip of `SWATCH_CELL`-sized squares, one per color.
pub fn palette_swatch(colors: &[Rgb<u8>]) -> RgbImage {
    let strip = RgbImage::from_fn(colors.len() as u32, 1, |x, _| colors[x as usize]);
    resize_nearest(&strip, colors.len() as u32 * SWATCH_CELL, SWATCH_CELL)
}

/// Case-insensitive extension check.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaletteCollection;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn save_strip(path: &Path, colors: &[[u8; 3]]) {
        RgbImage::from_fn(colors.len() as u32, 2, |x, _| Rgb(colors[x as usize]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_resolve_builtin_names() {
        let collection = PaletteCollection::fallback();
        let resolved =
            resolve_palettes(&["GameBoy".to_string(), "pico8".to_string()], &collection).unwrap();
        let names: Vec<_> = resolved.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["gameboy", "pico8"]);
    }

    #[test]
    fn test_resolve_image_and_directory() {
        let dir = TempDir::new().unwrap();
        let single = dir.path().join("warm.png");
        save_strip(&single, &[[200, 50, 0], [250, 200, 0], [200, 50, 0]]);

        let set = dir.path().join("set");
        fs::create_dir_all(set.join("retro")).unwrap();
        save_strip(&set.join("b.png"), &[[0, 0, 0]]);
        save_strip(&set.join("a.PNG"), &[[1, 1, 1], [2, 2, 2]]);
        save_strip(&set.join("retro").join("c.png"), &[[7, 7, 7], [8, 8, 8], [9, 9, 9]]);
        fs::write(set.join("notes.txt"), "x").unwrap();

        let collection = PaletteCollection::fallback();
        let ids = vec![
            single.display().to_string(),
            set.display().to_string(),
        ];
        let resolved = resolve_palettes(&ids, &collection).unwrap();

        let summary: Vec<_> = resolved
            .iter()
            .map(|p| (p.name.as_str(), p.color_count()))
            .collect();
        // Subdirectories are searched too
        assert_eq!(summary, vec![("warm", 2), ("a", 2), ("b", 1), ("c", 3)]);
        assert_eq!(
            resolved[0].palette.colors(),
            &[Rgb([200, 50, 0]), Rgb([250, 200, 0])]
        );
    }

    #[test]
    fn test_resolve_unknown() {
        let collection = PaletteCollection::fallback();
        let err = resolve_palettes(&["no-such-palette".to_string()], &collection).unwrap_err();
        assert!(matches!(err, PipelineError::PaletteNotFound(id) if id == "no-such-palette"));
    }

    #[test]
    fn test_large_palette_image_is_reduced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rainbow.png");
        RgbImage::from_fn(32, 32, |x, y| Rgb([(x * 8) as u8, (y * 8) as u8, 128]))
            .save(&path)
            .unwrap();

        let palette = load_palette_image(&path).unwrap();
        assert_eq!(palette.name, "rainbow");
        assert!(palette.color_count() > 128 && palette.color_count() <= 256);
    }

    #[test]
    fn test_extract_palette() {
        let image = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 16) as u8, 0]));
        let extracted = extract_palette(&image, 8).unwrap();
        assert!(extracted.len() > 4 && extracted.len() <= 8);
        assert!(matches!(
            extract_palette(&RgbImage::new(0, 0), 8),
            Err(PipelineError::Quantize(pixel_quant::QuantizeError::EmptyImage))
        ));
        assert!(matches!(
            extract_palette(&image, 0),
            Err(PipelineError::InvalidParameter(_))
        ));
        assert!(matches!(
            extract_palette(&image, 300),
            Err(PipelineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_palette_swatch() {
        let swatch = palette_swatch(&[Rgb([1, 2, 3]), Rgb([4, 5, 6])]);
        assert_eq!(swatch.dimensions(), (64, 32));
        assert_eq!(swatch.get_pixel(31, 31), &Rgb([1, 2, 3]));
        assert_eq!(swatch.get_pixel(32, 0), &Rgb([4, 5, 6]));
    }
}
