use gci_core::gci::SaveFile;
use gci_core::gci::header::{AnimationSpeed, BannerFormat, IconFormat};

const BLOCK_SIZE: usize = 8192;

/// One-block save with a CI8 banner, comment strings at offset 0, and the
/// banner payload at offset 64 of block 0.
fn build_test_gci() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(64 + BLOCK_SIZE);
    bytes.extend_from_slice(b"GTEE"); // game code
    bytes.extend_from_slice(b"01"); // maker code
    bytes.push(0xFF); // reserved
    bytes.push(0x01); // banner flags: CI8
    let mut filename = [0u8; 32];
    filename[..12].copy_from_slice(b"testgame.dat");
    bytes.extend_from_slice(&filename);
    bytes.extend_from_slice(&86_400u32.to_be_bytes()); // mod time: one day in
    bytes.extend_from_slice(&64u32.to_be_bytes()); // image offset
    bytes.extend_from_slice(&0x0005u16.to_be_bytes()); // icon formats
    bytes.extend_from_slice(&0x0009u16.to_be_bytes()); // animation speeds
    bytes.push(0x04); // permissions: public
    bytes.push(2); // copy counter
    bytes.extend_from_slice(&5u16.to_be_bytes()); // first block
    bytes.extend_from_slice(&1u16.to_be_bytes()); // block count
    bytes.extend_from_slice(&[0xFF, 0xFF]); // reserved
    bytes.extend_from_slice(&0u32.to_be_bytes()); // comments offset

    let mut block = vec![0u8; BLOCK_SIZE];
    block[..9].copy_from_slice(b"Test Game");
    block[32..47].copy_from_slice(b"Test file info.");
    // Banner: every index byte selects palette entry 1, which holds the
    // opaque packed color 0x8421.
    let banner_pixels = 96 * 32;
    for byte in &mut block[64..64 + banner_pixels] {
        *byte = 1;
    }
    let palette = 64 + banner_pixels;
    block[palette + 2] = 0x84;
    block[palette + 3] = 0x21;
    bytes.extend_from_slice(&block);
    bytes
}

fn parse_fixture() -> SaveFile {
    SaveFile::parse(&build_test_gci()).expect("fixture should parse")
}

#[test]
fn parse_header_strings() {
    let save = parse_fixture();
    assert_eq!(save.header.game_code, "GTEE");
    assert_eq!(save.header.maker_code, "01");
    assert_eq!(save.header.filename, "testgame.dat");
}

#[test]
fn parse_header_scalars() {
    let save = parse_fixture();
    assert_eq!(save.header.mod_time, 86_400);
    assert_eq!(save.header.image_offset, 64);
    assert_eq!(save.header.copy_counter, 2);
    assert_eq!(save.header.first_block, 5);
    assert_eq!(save.header.block_count, 1);
    assert_eq!(save.header.comments_offset, 0);
    assert_eq!(save.blocks().len(), 1);
}

#[test]
fn mod_time_counts_from_gamecube_epoch() {
    let save = parse_fixture();
    assert_eq!(
        save.header.modified_at().to_rfc3339(),
        "2000-01-02T00:00:00+00:00"
    );
}

#[test]
fn banner_flags_decode_to_ci8() {
    let save = parse_fixture();
    assert_eq!(save.header.banner_format(), BannerFormat::Ci8);
}

#[test]
fn icon_fields_decode_per_slot() {
    let save = parse_fixture();

    // 0x0005: slots 0 and 1 hold code 1, the rest are empty.
    assert_eq!(save.header.icon_formats.get(0), IconFormat::Ci8Shared);
    assert_eq!(save.header.icon_formats.get(1), IconFormat::Ci8Shared);
    assert_eq!(save.header.icon_formats.get(2), IconFormat::None);

    // 0x0009: slot 0 code 1, slot 1 code 2.
    assert_eq!(save.header.animation_speeds.get(0), AnimationSpeed::Frames4);
    assert_eq!(save.header.animation_speeds.get(1), AnimationSpeed::Frames8);
    assert_eq!(save.header.animation_speeds.get(7), AnimationSpeed::None);
}

#[test]
fn permissions_decode_flags() {
    let save = parse_fixture();
    assert!(save.header.permissions.public());
    assert!(!save.header.permissions.no_copy());
    assert!(!save.header.permissions.no_move());
}

#[test]
fn strict_validation_accepts_fixture() {
    let save = parse_fixture();
    assert!(save.header.validate_strict().is_ok());
}

#[test]
fn strict_validation_rejects_cleared_reserved_byte() {
    let mut bytes = build_test_gci();
    bytes[6] = 0x00;
    let save = SaveFile::parse(&bytes).expect("permissive parse should still succeed");
    assert!(save.header.validate_strict().is_err());
}

#[test]
fn rejects_non_ascii_game_code() {
    let mut bytes = build_test_gci();
    bytes[0] = 0xC3;
    assert!(SaveFile::parse(&bytes).is_err());
}
