use gci_core::error::FormatErrorKind;
use gci_core::graphics::{decode_ci8, decode_rgb5a3, detile, parse_palette, retile, rgb5a3_to_rgba};

#[test]
fn opaque_mode_uses_reference_scaling_and_full_alpha() {
    // 0x8421: top bit set, each 5-bit channel holds 1.
    assert_eq!(rgb5a3_to_rgba(0x8421), [8, 8, 8, 255]);
}

#[test]
fn opaque_mode_extremes() {
    assert_eq!(rgb5a3_to_rgba(0xFFFF), [255, 255, 255, 255]);
    assert_eq!(rgb5a3_to_rgba(0x8000), [0, 0, 0, 255]);
}

#[test]
fn alpha_mode_scales_channels() {
    // Top bit clear: 3-bit alpha x32, 4-bit channels x17.
    assert_eq!(rgb5a3_to_rgba(0x7FFF), [255, 255, 255, 224]);
    assert_eq!(rgb5a3_to_rgba(0x0000), [0, 0, 0, 0]);
    assert_eq!(rgb5a3_to_rgba(0x1234), [0x22, 0x33, 0x44, 32]);
}

#[test]
fn palette_must_be_exactly_512_bytes() {
    assert_eq!(
        parse_palette(&[0u8; 511]).unwrap_err().kind,
        FormatErrorKind::PaletteSize
    );
    assert_eq!(
        parse_palette(&[0u8; 513]).unwrap_err().kind,
        FormatErrorKind::PaletteSize
    );

    let palette = parse_palette(&[0u8; 512]).expect("512 bytes should parse");
    assert_eq!(palette.len(), 256);
}

#[test]
fn ci8_rejects_pixel_data_that_does_not_divide_by_width() {
    // 100 index bytes cannot form whole 8x4 tile rows at width 96.
    let mut data = vec![0u8; 100];
    data.extend_from_slice(&[0u8; 512]);
    let err = decode_ci8(&data, 96).unwrap_err();
    assert_eq!(err.kind, FormatErrorKind::TileGeometry);
}

#[test]
fn ci8_height_is_pixels_over_width() {
    // Two full tile rows at width 96.
    let mut data = vec![0u8; 96 * 8];
    data.extend_from_slice(&[0u8; 512]);
    let image = decode_ci8(&data, 96).expect("geometry is valid");
    assert_eq!(image.width(), 96);
    assert_eq!(image.height(), 8);
    assert_eq!(image.pixels().len(), 96 * 8);
}

#[test]
fn ci8_looks_up_palette_entries() {
    // One tile row at width 8, all pixels pointing at entry 1 = 0x8421.
    let mut data = vec![1u8; 8 * 4];
    let mut palette = vec![0u8; 512];
    palette[2] = 0x84;
    palette[3] = 0x21;
    data.extend_from_slice(&palette);

    let image = decode_ci8(&data, 8).expect("geometry is valid");
    assert!(image.pixels().iter().all(|&px| px == [8, 8, 8, 255]));
}

#[test]
fn rgb5a3_decodes_one_tile() {
    // One 4x4 tile of 0x8421 pixels.
    let data: Vec<u8> = [0x84u8, 0x21].repeat(16);
    let image = decode_rgb5a3(&data, 4).expect("geometry is valid");
    assert_eq!(image.width(), 4);
    assert_eq!(image.height(), 4);
    assert!(image.pixels().iter().all(|&px| px == [8, 8, 8, 255]));
}

#[test]
fn rgb5a3_rejects_odd_geometry() {
    let err = decode_rgb5a3(&[0u8; 34], 4).unwrap_err();
    assert_eq!(err.kind, FormatErrorKind::TileGeometry);
}

#[test]
fn detile_then_retile_restores_input() {
    // Two bands of 8x4 tiles across a 16-pixel-wide image.
    let data: Vec<u8> = (0..=255).collect();
    let linear = detile(&data, 8, 4, 16, 8).expect("geometry is valid");
    let restored = retile(&linear, 8, 4, 16, 8).expect("geometry is valid");
    assert_eq!(restored, data);
}

#[test]
fn detile_permutes_without_creating_or_dropping_bytes() {
    let data: Vec<u8> = (0..=255).collect();
    let mut linear = detile(&data, 4, 4, 8, 16).expect("geometry is valid");
    assert_ne!(linear, data);
    linear.sort_unstable();
    assert_eq!(linear, data);
}
