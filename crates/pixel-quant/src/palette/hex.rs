//! Hex color notation for palette files and terminal output.

use image::Rgb;

use super::error::ParseColorError;

/// Parse an RGB color from a hex string.
///
/// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
/// case-insensitive and surrounding whitespace is ignored.
///
/// ```
/// use image::Rgb;
/// use pixel_quant::hex_to_rgb;
///
/// assert_eq!(hex_to_rgb("#FF8000").unwrap(), Rgb([255, 128, 0]));
/// assert_eq!(hex_to_rgb("f00").unwrap(), Rgb([255, 0, 0]));
/// ```
pub fn hex_to_rgb(s: &str) -> Result<Rgb<u8>, ParseColorError> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(ParseColorError::InvalidLength);
    }

    match s.len() {
        3 => {
            // Shorthand: 0xF -> 0xFF
            let r = u8::from_str_radix(&s[0..1], 16)? * 17;
            let g = u8::from_str_radix(&s[1..2], 16)? * 17;
            let b = u8::from_str_radix(&s[2..3], 16)? * 17;
            Ok(Rgb([r, g, b]))
        }
        6 => {
            let r = u8::from_str_radix(&s[0..2], 16)?;
            let g = u8::from_str_radix(&s[2..4], 16)?;
            let b = u8::from_str_radix(&s[4..6], 16)?;
            Ok(Rgb([r, g, b]))
        }
        _ => Err(ParseColorError::InvalidLength),
    }
}

/// Format a color as lowercase `#rrggbb`.
pub fn rgb_to_hex(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{r:02x}{g:02x}{b:02x}")
}
