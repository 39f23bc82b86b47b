// GCI container constants
pub const HEADER_SIZE: usize = 64;
pub const BLOCK_SIZE: usize = 8192;

/// Seconds between the Unix epoch and the GameCube epoch
/// (2000-01-01T00:00:00Z), the zero point of the header's mod-time field.
pub const GC_EPOCH_UNIX_OFFSET: i64 = 946_684_800;

/// Width of each of the two comment strings in block 0.
pub const COMMENT_FIELD_SIZE: usize = 32;

// Banner geometry. Fixed by the titles this library targets, not a general
// property of the container.
pub const BANNER_WIDTH: usize = 96;
pub const BANNER_HEIGHT: usize = 32;

/// CI8 banner payload: 96x32 index bytes plus the trailing 512-byte palette.
pub const BANNER_CI8_BYTES: usize =
    BANNER_WIDTH * BANNER_HEIGHT + crate::graphics::color::PALETTE_BYTES;
