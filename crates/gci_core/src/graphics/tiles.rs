//! Blocked-to-linear raster reordering.
//!
//! Console texture hardware stores images as rows of small fixed-size
//! tiles. `detile` rewrites such a buffer into plain row-major order;
//! `retile` is the inverse permutation. Neither creates, drops, or aliases
//! bytes.

use crate::error::{FormatError, FormatErrorKind, Result};

struct TileGeometry {
    /// Bytes of one pixel row within one tile.
    line_bytes: usize,
    /// Bytes of one whole tile.
    tile_bytes: usize,
    /// Bytes of one full-width band of tiles.
    band_bytes: usize,
}

fn geometry(
    data_len: usize,
    tile_width: usize,
    tile_height: usize,
    image_width: usize,
    bits_per_pixel: usize,
) -> Result<TileGeometry> {
    if tile_width == 0 || tile_height == 0 || image_width == 0 || bits_per_pixel == 0 {
        return Err(FormatError::new(
            FormatErrorKind::TileGeometry,
            "tile dimensions, image width, and bit depth must be nonzero",
        ));
    }
    if (tile_width * bits_per_pixel) % 8 != 0 {
        return Err(FormatError::new(
            FormatErrorKind::TileGeometry,
            format!(
                "{tile_width}-pixel tile row at {bits_per_pixel} bpp is not a whole number of bytes"
            ),
        ));
    }
    if image_width % tile_width != 0 {
        return Err(FormatError::new(
            FormatErrorKind::TileGeometry,
            format!("image width {image_width} is not a multiple of tile width {tile_width}"),
        ));
    }

    let line_bytes = tile_width * bits_per_pixel / 8;
    let tile_bytes = line_bytes * tile_height;
    let band_bytes = image_width / tile_width * tile_bytes;
    if data_len % band_bytes != 0 {
        return Err(FormatError::new(
            FormatErrorKind::TileGeometry,
            format!("data length {data_len} is not a whole number of {band_bytes}-byte tile rows"),
        ));
    }

    Ok(TileGeometry {
        line_bytes,
        tile_bytes,
        band_bytes,
    })
}

/// Reorder tile-major data into row-major raster order.
pub fn detile(
    data: &[u8],
    tile_width: usize,
    tile_height: usize,
    image_width: usize,
    bits_per_pixel: usize,
) -> Result<Vec<u8>> {
    let g = geometry(data.len(), tile_width, tile_height, image_width, bits_per_pixel)?;

    let mut out = Vec::with_capacity(data.len());
    for band in (0..data.len()).step_by(g.band_bytes) {
        for line in (0..g.tile_bytes).step_by(g.line_bytes) {
            for tile in (0..g.band_bytes).step_by(g.tile_bytes) {
                let start = band + line + tile;
                out.extend_from_slice(&data[start..start + g.line_bytes]);
            }
        }
    }
    Ok(out)
}

/// Reorder row-major raster data back into tile-major order.
pub fn retile(
    data: &[u8],
    tile_width: usize,
    tile_height: usize,
    image_width: usize,
    bits_per_pixel: usize,
) -> Result<Vec<u8>> {
    let g = geometry(data.len(), tile_width, tile_height, image_width, bits_per_pixel)?;

    let mut out = vec![0u8; data.len()];
    let mut src = 0;
    for band in (0..data.len()).step_by(g.band_bytes) {
        for line in (0..g.tile_bytes).step_by(g.line_bytes) {
            for tile in (0..g.band_bytes).step_by(g.tile_bytes) {
                let start = band + line + tile;
                out[start..start + g.line_bytes].copy_from_slice(&data[src..src + g.line_bytes]);
                src += g.line_bytes;
            }
        }
    }
    Ok(out)
}
