pub mod color;
pub mod tiles;

pub use color::{Rgba, parse_palette, rgb5a3_to_rgba};
pub use tiles::{detile, retile};

use crate::error::{FormatError, FormatErrorKind, Result};

use color::PALETTE_BYTES;

// Tile shapes used by the two pixel formats.
const CI8_TILE: (usize, usize, usize) = (8, 4, 8); // width, height, bpp
const RGB5A3_TILE: (usize, usize, usize) = (4, 4, 16);

/// A fully decoded image: row-major RGBA quads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl DecodedImage {
    fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }
}

/// Decode CI8 image data: palette-indexed bytes in 8x4 tiles followed by a
/// trailing 512-byte palette.
pub fn decode_ci8(data: &[u8], width: usize) -> Result<DecodedImage> {
    if data.len() <= PALETTE_BYTES {
        return Err(FormatError::new(
            FormatErrorKind::Truncated,
            format!(
                "CI8 data is {} bytes, too short for pixels and a {PALETTE_BYTES}-byte palette",
                data.len()
            ),
        ));
    }
    let (index_bytes, palette_bytes) = data.split_at(data.len() - PALETTE_BYTES);

    let (tile_w, tile_h, bpp) = CI8_TILE;
    if width == 0 || index_bytes.len() % (width * tile_h) != 0 {
        return Err(FormatError::new(
            FormatErrorKind::TileGeometry,
            format!("invalid number of tiles for width {width}"),
        ));
    }
    let height = index_bytes.len() / width;

    let palette = parse_palette(palette_bytes)?;
    let linear = detile(index_bytes, tile_w, tile_h, width, bpp)?;
    let pixels = linear
        .iter()
        .map(|&index| palette[usize::from(index)])
        .collect();
    Ok(DecodedImage::new(width as u32, height as u32, pixels))
}

/// Decode RGB5A3 image data: 16-bit big-endian packed colors in 4x4 tiles.
pub fn decode_rgb5a3(data: &[u8], width: usize) -> Result<DecodedImage> {
    let (tile_w, tile_h, bpp) = RGB5A3_TILE;
    let pixel_count = data.len() / 2;
    if data.len() % 2 != 0 || width == 0 || pixel_count % (width * tile_h) != 0 {
        return Err(FormatError::new(
            FormatErrorKind::TileGeometry,
            format!("invalid number of tiles for width {width}"),
        ));
    }
    let height = pixel_count / width;

    let linear = detile(data, tile_w, tile_h, width, bpp)?;
    let pixels = linear
        .chunks_exact(2)
        .map(|pair| rgb5a3_to_rgba(u16::from_be_bytes([pair[0], pair[1]])))
        .collect();
    Ok(DecodedImage::new(width as u32, height as u32, pixels))
}
