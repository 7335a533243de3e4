//! Test fixtures: deterministic images and a temp workspace.

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Image built from `cell x cell` blocks of random colors.
pub fn blocky_image(cells_x: u32, cells_y: u32, cell: u32, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let colors: Vec<Rgb<u8>> = (0..cells_x * cells_y).map(|_| Rgb(rng.gen())).collect();
    RgbImage::from_fn(cells_x * cell, cells_y * cell, |x, y| {
        colors[((y / cell) * cells_x + x / cell) as usize]
    })
}

/// Per-pixel random noise.
pub fn noise_image(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb(rng.gen()))
}

/// Smooth two-channel gradient.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    })
}

/// Temporary directory with `input/` and `output/` helpers.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Save `image` as `relative` (PNG or JPEG by extension).
    pub fn write_image(&self, relative: &str, image: &RgbImage) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        image.save(&path).expect("save fixture image");
        path
    }
}

/// File names (not paths) in `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read output dir")
        .flatten()
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
