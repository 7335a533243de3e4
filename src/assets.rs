//! Palette file loading with embedded fallbacks
//!
//! Palette records ship embedded in the binary. When `PALETTES_DIR` is set,
//! YAML files found there are read first and override embedded files with
//! the same name; embedded files fill in the rest.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an external palette directory.
pub const PALETTES_DIR_ENV: &str = "PALETTES_DIR";

/// Embedded palette records
#[derive(RustEmbed)]
#[folder = "palettes/"]
#[include = "*.yaml"]
struct EmbeddedPalettes;

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Palette file loader with merge behavior and optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct PaletteAssets {
    /// External palettes directory (from PALETTES_DIR env var)
    palettes_dir: Option<PathBuf>,
}

impl PaletteAssets {
    /// Create a loader.
    ///
    /// `palettes_dir` should be `Some` only if an external directory was
    /// requested. If `None`, embedded files are used exclusively.
    pub fn new(palettes_dir: Option<PathBuf>) -> Self {
        Self { palettes_dir }
    }

    /// Create a loader configured from `PALETTES_DIR`.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os(PALETTES_DIR_ENV).map(PathBuf::from))
    }

    /// External directory, if one is configured.
    pub fn palettes_dir(&self) -> Option<&Path> {
        self.palettes_dir.as_deref()
    }

    /// All palette files as `(file name, contents)`, external first.
    ///
    /// Files are sorted by name within each source so that loading order
    /// does not depend on directory iteration order.
    pub fn read_all(&self) -> Vec<(String, Cow<'static, [u8]>)> {
        let mut files = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        if let Some(ref dir) = self.palettes_dir {
            let mut external: Vec<PathBuf> = fs::read_dir(dir)
                .map(|entries| {
                    entries
                        .flatten()
                        .map(|entry| entry.path())
                        .filter(|path| is_yaml(path))
                        .collect()
                })
                .unwrap_or_default();
            external.sort();

            for path in external {
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                match fs::read(&path) {
                    Ok(data) => {
                        tracing::trace!(path = %path.display(), "Loading palette from filesystem");
                        seen.insert(name.to_string());
                        files.push((name.to_string(), Cow::Owned(data)));
                    }
                    Err(e) => {
                        tracing::warn!(%e, path = %path.display(), "Failed to read palette file");
                    }
                }
            }
        }

        for name in Self::list_embedded() {
            if seen.contains(&name) {
                continue;
            }
            if let Some(file) = EmbeddedPalettes::get(&name) {
                tracing::trace!(file = %name, "Loading palette from embedded assets");
                files.push((name, file.data));
            }
        }

        files
    }

    /// Extract embedded palette files to the filesystem (init command).
    ///
    /// Writes into the configured directory, or `./palettes` if none.
    /// Existing files are skipped unless `force` is set.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        let dir = self
            .palettes_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("./palettes"));
        fs::create_dir_all(&dir)?;

        for name in Self::list_embedded() {
            let path = dir.join(&name);
            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(file) = EmbeddedPalettes::get(&name) {
                fs::write(&path, &*file.data)?;
                report.written.push(path.display().to_string());
            }
        }

        if !report.written.is_empty() {
            tracing::info!(
                dir = %dir.display(),
                count = report.written.len(),
                "Extracted embedded palettes"
            );
        }

        Ok(report)
    }

    /// Embedded palette file names, sorted.
    pub fn list_embedded() -> Vec<String> {
        let mut names: Vec<String> = EmbeddedPalettes::iter().map(|s| s.to_string()).collect();
        names.sort();
        names
    }
}

fn is_yaml(path: &Path) -> bool {
    path.is_file()
        && matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        )
}
