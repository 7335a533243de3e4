//! Output file naming.
//!
//! Every non-default option of a variant becomes a suffix token on the
//! output file stem, in a fixed order:
//!
//! ```text
//! <stem>[_C<contrast>][_S<saturation>]_D<DITHER>[_P<palette>][_<colors>][_downscaled]<ext>
//! ```
//!
//! `<colors>` is the requested color count, or the palette's size when a
//! palette is given without one.

use crate::models::Variant;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Render a factor the way the file names expect: `2.0`, `1.5`, `0.8`.
pub fn format_factor(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Suffix tokens for a variant, without separators.
pub fn suffix_tokens(variant: &Variant) -> Vec<String> {
    let mut tokens = Vec::with_capacity(4);
    if variant.contrast != 1.0 {
        tokens.push(format!("C{}", format_factor(variant.contrast)));
    }
    if variant.saturation != 1.0 {
        tokens.push(format!("S{}", format_factor(variant.saturation)));
    }
    tokens.push(format!("D{}", variant.dither.name()));
    if let Some(palette) = &variant.palette {
        tokens.push(format!("P{}", palette.name));
    }
    if let Some(count) = named_color_count(variant) {
        tokens.push(count.to_string());
    }
    tokens
}

/// The count that ends up in the file name, if any.
pub fn named_color_count(variant: &Variant) -> Option<usize> {
    match (&variant.palette, variant.color_count) {
        (_, count) if count > 0 => Some(count),
        (Some(palette), _) => Some(palette.color_count()),
        (None, _) => None,
    }
}

/// Append `_token` for each token to the stem of `base`, keeping its
/// directory and extension.
pub fn with_suffixes<S: AsRef<str>>(base: &Path, tokens: &[S]) -> PathBuf {
    let mut name = OsString::from(base.file_stem().unwrap_or_default());
    for token in tokens {
        name.push("_");
        name.push(token.as_ref());
    }
    if let Some(ext) = base.extension() {
        name.push(".");
        name.push(ext);
    }
    base.with_file_name(name)
}

/// Full output path of a variant.
pub fn variant_path(base: &Path, variant: &Variant) -> PathBuf {
    with_suffixes(base, &suffix_tokens(variant))
}

/// Sibling path for the downscaled copy of a variant output.
pub fn downscaled_path(variant_path: &Path) -> PathBuf {
    with_suffixes(variant_path, &["downscaled"])
}
