//! RGB5A3 packed-color decoding.
//!
//! Each 16-bit big-endian value selects one of two layouts on its top bit:
//! set means 5/5/5 R/G/B with no stored alpha, clear means 3/4/4/4
//! A/R/G/B.

use crate::error::{FormatError, FormatErrorKind, Result};

/// One decoded pixel: red, green, blue, alpha, each 0-255.
pub type Rgba = [u8; 4];

pub const PALETTE_BYTES: usize = 512;
pub const PALETTE_ENTRIES: usize = 256;

/// 5-bit to 8-bit channel expansion, `(x << 3) | (x >> 2)`.
const EXPAND_5TO8: [u8; 32] = [
    0, 8, 16, 24, 33, 41, 49, 57, 66, 74, 82, 90, 99, 107, 115, 123, 132, 140, 148, 156, 165,
    173, 181, 189, 198, 206, 214, 222, 231, 239, 247, 255,
];

/// Alpha stored for opaque-mode pixels. An earlier revision of this decoder
/// wrote 0 here; opaque pixels now decode to full alpha.
const OPAQUE_ALPHA: u8 = 0xFF;

pub fn rgb5a3_to_rgba(color: u16) -> Rgba {
    if color & 0x8000 != 0 {
        let red = EXPAND_5TO8[usize::from((color >> 10) & 0x1F)];
        let green = EXPAND_5TO8[usize::from((color >> 5) & 0x1F)];
        let blue = EXPAND_5TO8[usize::from(color & 0x1F)];
        [red, green, blue, OPAQUE_ALPHA]
    } else {
        let alpha = ((color >> 12) & 0x07) as u8 * 0x20;
        let red = ((color >> 8) & 0x0F) as u8 * 0x11;
        let green = ((color >> 4) & 0x0F) as u8 * 0x11;
        let blue = (color & 0x0F) as u8 * 0x11;
        [red, green, blue, alpha]
    }
}

/// Decode a 256-entry palette of big-endian packed colors.
pub fn parse_palette(data: &[u8]) -> Result<Vec<Rgba>> {
    if data.len() != PALETTE_BYTES {
        return Err(FormatError::new(
            FormatErrorKind::PaletteSize,
            format!(
                "palette is {} bytes, expected {PALETTE_BYTES}",
                data.len()
            ),
        ));
    }
    Ok(data
        .chunks_exact(2)
        .map(|pair| rgb5a3_to_rgba(u16::from_be_bytes([pair[0], pair[1]])))
        .collect())
}
