use crate::assets::PaletteAssets;
use crate::error::{PaletteStoreError, PipelineError};
use image::Rgb;
use pixel_quant::{hex_to_rgb, Palette};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A color as written in a palette file: `[r, g, b]` or `"#rrggbb"`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorValue {
    Rgb([u8; 3]),
    Hex(String),
}

impl ColorValue {
    fn to_rgb(&self) -> Result<Rgb<u8>, pixel_quant::ParseColorError> {
        match self {
            ColorValue::Rgb(rgb) => Ok(Rgb(*rgb)),
            ColorValue::Hex(hex) => hex_to_rgb(hex),
        }
    }
}

/// One palette file
#[derive(Debug, Deserialize, Clone)]
pub struct PaletteRecord {
    /// Palette name (defaults to the file stem)
    #[serde(default)]
    pub name: Option<String>,

    /// Ordered colors; repeats are allowed
    #[serde(default)]
    pub colors: Vec<ColorValue>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub notes: Vec<String>,
}

/// A stored palette, as listed by the `palettes` and `show-palette` commands
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteInfo {
    pub name: String,
    pub colors: Vec<Rgb<u8>>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub notes: Vec<String>,
}

impl PaletteInfo {
    /// Number of distinct colors.
    pub fn color_count(&self) -> usize {
        let mut unique: Vec<[u8; 3]> = self.colors.iter().map(|c| c.0).collect();
        unique.sort_unstable();
        unique.dedup();
        unique.len()
    }
}

/// A named quantization target
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteImage {
    pub name: String,
    pub palette: Palette,
}

impl PaletteImage {
    pub fn new(name: impl Into<String>, palette: Palette) -> Self {
        Self {
            name: name.into(),
            palette,
        }
    }

    /// Distinct colors in the palette.
    pub fn color_count(&self) -> usize {
        self.palette.len()
    }
}

/// Palette lookup used by the pipeline.
pub trait PaletteSource {
    /// All palette names, sorted.
    fn list_names(&self) -> Vec<String>;

    /// Ordered colors of a palette, duplicates included.
    fn get_colors(&self, name: &str) -> Option<Vec<Rgb<u8>>>;

    fn get_description(&self, name: &str) -> Option<String>;

    /// Build the quantization target for a palette.
    fn get_image(&self, name: &str) -> Result<PaletteImage, PipelineError> {
        let key = name.to_lowercase();
        let colors = self
            .get_colors(&key)
            .ok_or_else(|| PipelineError::PaletteNotFound(name.to_string()))?;
        let palette =
            Palette::from_colors_dedup(&colors).map_err(|source| PaletteStoreError::Color {
                palette: key.clone(),
                source,
            })?;
        Ok(PaletteImage::new(key, palette))
    }
}

/// Palettes keyed by lowercase name
#[derive(Debug, Clone, Default)]
pub struct PaletteCollection {
    palettes: BTreeMap<String, PaletteInfo>,
}

impl PaletteCollection {
    /// Load every palette file from the asset loader.
    ///
    /// Unparseable files are skipped with a warning. If nothing loads, the
    /// hardcoded fallback set is used.
    pub fn load_from_assets(assets: &PaletteAssets) -> Self {
        let mut collection = Self::default();

        for (file, data) in assets.read_all() {
            let content = String::from_utf8_lossy(&data);
            match Self::parse_record(&file, &content) {
                Ok(info) => {
                    // External files come first and win on name clashes
                    if collection.palettes.contains_key(&info.name) {
                        tracing::debug!(palette = %info.name, %file, "Palette already loaded, skipping");
                        continue;
                    }
                    collection.palettes.insert(info.name.clone(), info);
                }
                Err(e) => {
                    tracing::warn!(%e, %file, "Could not load palette");
                }
            }
        }

        if collection.palettes.is_empty() {
            tracing::warn!("No palettes loaded, using built-in fallback set");
            return Self::fallback();
        }

        tracing::debug!(count = collection.palettes.len(), "Loaded palettes");
        collection
    }

    /// Parse one palette file.
    pub fn parse_record(file: &str, content: &str) -> Result<PaletteInfo, PaletteStoreError> {
        let record: PaletteRecord =
            serde_yaml::from_str(content).map_err(|source| PaletteStoreError::Parse {
                file: file.to_string(),
                source,
            })?;

        let name = record
            .name
            .unwrap_or_else(|| {
                Path::new(file)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file.to_string())
            })
            .to_lowercase();

        if record.colors.is_empty() {
            return Err(PaletteStoreError::Empty(name));
        }

        let colors = record
            .colors
            .iter()
            .map(ColorValue::to_rgb)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PaletteStoreError::Color {
                palette: name.clone(),
                source: e.into(),
            })?;

        Ok(PaletteInfo {
            name,
            colors,
            description: record.description,
            source: record.source,
            notes: record.notes,
        })
    }

    /// The hardcoded palettes used when no palette file loads.
    pub fn fallback() -> Self {
        let mut palettes = BTreeMap::new();
        for (name, colors) in [
            ("nes", NES_COLORS.as_slice()),
            ("gameboy", GAMEBOY_COLORS.as_slice()),
            ("pico8", PICO8_COLORS.as_slice()),
        ] {
            palettes.insert(
                name.to_string(),
                PaletteInfo {
                    name: name.to_string(),
                    colors: colors.iter().map(|&c| Rgb(c)).collect(),
                    description: None,
                    source: None,
                    notes: Vec::new(),
                },
            );
        }
        Self { palettes }
    }

    pub fn get_info(&self, name: &str) -> Option<&PaletteInfo> {
        self.palettes.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_info(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

impl PaletteSource for PaletteCollection {
    fn list_names(&self) -> Vec<String> {
        self.palettes.keys().cloned().collect()
    }

    fn get_colors(&self, name: &str) -> Option<Vec<Rgb<u8>>> {
        self.get_info(name).map(|info| info.colors.clone())
    }

    fn get_description(&self, name: &str) -> Option<String> {
        let info = self.get_info(name)?;
        Some(
            info.description
                .clone()
                .unwrap_or_else(|| default_description(&info.name)),
        )
    }
}

/// Description for palettes whose file does not carry one.
fn default_description(name: &str) -> String {
    let description = match name {
        "nes" => "Nintendo Entertainment System 54-color palette",
        "gameboy" => "Original Game Boy 4-color green palette",
        "gameboy_pocket" => "Game Boy Pocket improved 4-color palette",
        "pico8" => "PICO-8 fantasy console 16-color palette",
        "commodore64" => "Commodore 64 16-color palette",
        "cga" => "IBM CGA 16-color palette",
        "msx" => "MSX computer 16-color palette",
        "apple2" => "Apple II 16-color palette",
        "zx_spectrum" => "ZX Spectrum 16-color palette",
        "atari2600" => "Atari 2600 16-color palette subset",
        "amiga" => "Amiga OCS/ECS 32-color palette",
        _ => return format!("Color palette: {name}"),
    };
    description.to_string()
}

/// NES PPU table: 64 slots, 54 distinct colors.
#[rustfmt::skip]
const NES_COLORS: [[u8; 3]; 64] = [
    [84, 84, 84], [0, 30, 116], [8, 16, 144], [48, 0, 136],
    [68, 0, 100], [92, 0, 48], [84, 4, 0], [60, 24, 0],
    [32, 42, 0], [8, 58, 0], [0, 64, 0], [0, 60, 0],
    [0, 50, 60], [0, 0, 0], [0, 0, 0], [0, 0, 0],
    [152, 150, 152], [8, 76, 196], [48, 50, 236], [92, 30, 228],
    [136, 20, 176], [160, 20, 100], [152, 34, 32], [120, 60, 0],
    [84, 90, 0], [40, 114, 0], [8, 124, 0], [0, 118, 40],
    [0, 102, 120], [0, 0, 0], [0, 0, 0], [0, 0, 0],
    [236, 238, 236], [76, 154, 236], [120, 124, 236], [176, 98, 236],
    [228, 84, 236], [236, 88, 180], [236, 106, 100], [212, 136, 32],
    [160, 170, 0], [116, 196, 0], [76, 208, 32], [56, 204, 108],
    [56, 180, 204], [60, 60, 60], [0, 0, 0], [0, 0, 0],
    [236, 238, 236], [168, 204, 236], [188, 188, 236], [212, 178, 236],
    [236, 174, 236], [236, 174, 212], [236, 180, 176], [228, 196, 144],
    [204, 210, 120], [180, 222, 120], [168, 226, 144], [152, 226, 180],
    [160, 214, 228], [160, 162, 160], [0, 0, 0], [0, 0, 0],
];

const GAMEBOY_COLORS: [[u8; 3]; 4] = [[15, 56, 15], [48, 98, 48], [139, 172, 15], [155, 188, 15]];

#[rustfmt::skip]
const PICO8_COLORS: [[u8; 3]; 16] = [
    [0, 0, 0], [29, 43, 83], [126, 37, 83], [0, 135, 81],
    [171, 82, 54], [95, 87, 79], [194, 195, 199], [255, 241, 232],
    [255, 0, 77], [255, 163, 0], [255, 236, 39], [0, 228, 54],
    [41, 173, 255], [131, 118, 156], [255, 119, 168], [255, 204, 170],
];
