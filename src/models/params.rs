use crate::error::PipelineError;
use crate::models::PaletteImage;
use pixel_quant::{DitherMode, MAX_COLORS};
use std::fmt;
use std::str::FromStr;

/// Which dither modes a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherSelector {
    /// 0: nearest color only
    #[default]
    None,
    /// 1: Floyd-Steinberg only
    Floyd,
    /// 2: Floyd-Steinberg, then none
    Both,
}

impl DitherSelector {
    /// The dither axis, in product order.
    pub fn modes(self) -> Vec<DitherMode> {
        match self {
            DitherSelector::None => vec![DitherMode::None],
            DitherSelector::Floyd => vec![DitherMode::FloydSteinberg],
            DitherSelector::Both => vec![DitherMode::FloydSteinberg, DitherMode::None],
        }
    }
}

impl TryFrom<u8> for DitherSelector {
    type Error = PipelineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DitherSelector::None),
            1 => Ok(DitherSelector::Floyd),
            2 => Ok(DitherSelector::Both),
            other => Err(PipelineError::InvalidParameter(format!(
                "dither selector must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

impl FromStr for DitherSelector {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "0" => Ok(DitherSelector::None),
            "floyd" | "floyd-steinberg" | "floydsteinberg" | "1" => Ok(DitherSelector::Floyd),
            "both" | "2" => Ok(DitherSelector::Both),
            _ => Err(PipelineError::InvalidParameter(format!(
                "unknown dither selector '{s}' (expected none, floyd, both, 0, 1 or 2)"
            ))),
        }
    }
}

impl fmt::Display for DitherSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DitherSelector::None => "none",
            DitherSelector::Floyd => "floyd",
            DitherSelector::Both => "both",
        })
    }
}

/// One tuple of the parameter product.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub contrast: f32,
    pub saturation: f32,
    pub dither: DitherMode,
    /// 0 means no forced color count
    pub color_count: usize,
    pub palette: Option<PaletteImage>,
}

impl Default for Variant {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            saturation: 1.0,
            dither: DitherMode::None,
            color_count: 0,
            palette: None,
        }
    }
}

/// The per-axis option lists of a run.
///
/// Empty lists are replaced by their single default value at construction,
/// so every axis holds at least one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterAxes {
    contrasts: Vec<f32>,
    saturations: Vec<f32>,
    dithers: Vec<DitherMode>,
    color_counts: Vec<usize>,
    palettes: Vec<Option<PaletteImage>>,
}

impl Default for ParameterAxes {
    fn default() -> Self {
        Self {
            contrasts: vec![1.0],
            saturations: vec![1.0],
            dithers: DitherSelector::default().modes(),
            color_counts: vec![0],
            palettes: vec![None],
        }
    }
}

impl ParameterAxes {
    /// Build and validate the axes.
    ///
    /// Factors must be finite and non-negative; color counts at most 256.
    /// Values that would give two variants the same output name are
    /// rejected: repeated entries, palettes sharing a name, and a palette
    /// whose size is also requested as a color count alongside 0 (a
    /// palette variant with count 0 is named after the palette's size).
    pub fn new(
        contrasts: Vec<f32>,
        saturations: Vec<f32>,
        dither: DitherSelector,
        color_counts: Vec<usize>,
        palettes: Vec<PaletteImage>,
    ) -> Result<Self, PipelineError> {
        validate_factors("contrast", &contrasts)?;
        validate_factors("saturation", &saturations)?;
        if let Some(&count) = color_counts.iter().find(|&&c| c > MAX_COLORS) {
            return Err(PipelineError::InvalidParameter(format!(
                "color count must be at most {MAX_COLORS}, got {count}"
            )));
        }
        reject_repeats("contrast factor", &contrasts)?;
        reject_repeats("saturation factor", &saturations)?;
        reject_repeats("color count", &color_counts)?;
        let names: Vec<&str> = palettes.iter().map(|p| p.name.as_str()).collect();
        reject_repeats("palette name", &names)?;
        if color_counts.contains(&0) {
            if let Some(palette) = palettes
                .iter()
                .find(|p| color_counts.contains(&p.color_count()))
            {
                return Err(PipelineError::InvalidParameter(format!(
                    "palette '{}' has {} colors, so color counts 0 and {} name the same output",
                    palette.name,
                    palette.color_count(),
                    palette.color_count()
                )));
            }
        }

        let defaults = Self::default();
        Ok(Self {
            contrasts: non_empty(contrasts, defaults.contrasts),
            saturations: non_empty(saturations, defaults.saturations),
            dithers: dither.modes(),
            color_counts: non_empty(color_counts, defaults.color_counts),
            palettes: non_empty(palettes.into_iter().map(Some).collect(), defaults.palettes),
        })
    }

    pub fn contrasts(&self) -> &[f32] {
        &self.contrasts
    }

    pub fn saturations(&self) -> &[f32] {
        &self.saturations
    }

    pub fn dithers(&self) -> &[DitherMode] {
        &self.dithers
    }

    pub fn color_counts(&self) -> &[usize] {
        &self.color_counts
    }

    pub fn palettes(&self) -> &[Option<PaletteImage>] {
        &self.palettes
    }

    /// Number of variants in the product.
    pub fn product_len(&self) -> usize {
        self.contrasts.len()
            * self.saturations.len()
            * self.dithers.len()
            * self.color_counts.len()
            * self.palettes.len()
    }

    /// All variants in lexicographic order over
    /// (contrast, saturation, dither, color count, palette).
    pub fn variants(&self) -> Vec<Variant> {
        let mut variants = Vec::with_capacity(self.product_len());
        for &contrast in &self.contrasts {
            for &saturation in &self.saturations {
                for &dither in &self.dithers {
                    for &color_count in &self.color_counts {
                        for palette in &self.palettes {
                            variants.push(Variant {
                                contrast,
                                saturation,
                                dither,
                                color_count,
                                palette: palette.clone(),
                            });
                        }
                    }
                }
            }
        }
        variants
    }
}

fn non_empty<T>(values: Vec<T>, default: Vec<T>) -> Vec<T> {
    if values.is_empty() {
        default
    } else {
        values
    }
}

fn reject_repeats<T: PartialEq + std::fmt::Display>(
    what: &str,
    values: &[T],
) -> Result<(), PipelineError> {
    for (i, value) in values.iter().enumerate() {
        if values[..i].contains(value) {
            return Err(PipelineError::InvalidParameter(format!(
                "{what} {value} given more than once"
            )));
        }
    }
    Ok(())
}

fn validate_factors(axis: &str, factors: &[f32]) -> Result<(), PipelineError> {
    match factors.iter().find(|f| !f.is_finite() || **f < 0.0) {
        Some(bad) => Err(PipelineError::InvalidParameter(format!(
            "{axis} factor must be a non-negative number, got {bad}"
        ))),
        None => Ok(()),
    }
}
