use gci_core::core_api::{Engine, Session};
use gci_render::{
    JsonStyle, TextStyle, banner_to_image, render_json_full, render_text_full, write_banner_png,
};

const BLOCK_SIZE: usize = 8192;

fn build_test_gci() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(64 + BLOCK_SIZE);
    bytes.extend_from_slice(b"GTEE");
    bytes.extend_from_slice(b"01");
    bytes.push(0xFF);
    bytes.push(0x01);
    let mut filename = [0u8; 32];
    filename[..12].copy_from_slice(b"testgame.dat");
    bytes.extend_from_slice(&filename);
    bytes.extend_from_slice(&86_400u32.to_be_bytes());
    bytes.extend_from_slice(&64u32.to_be_bytes());
    bytes.extend_from_slice(&0x0005u16.to_be_bytes());
    bytes.extend_from_slice(&0x0009u16.to_be_bytes());
    bytes.push(0x04);
    bytes.push(2);
    bytes.extend_from_slice(&5u16.to_be_bytes());
    bytes.extend_from_slice(&1u16.to_be_bytes());
    bytes.extend_from_slice(&[0xFF, 0xFF]);
    bytes.extend_from_slice(&0u32.to_be_bytes());

    let mut block = vec![0u8; BLOCK_SIZE];
    block[..9].copy_from_slice(b"Test Game");
    block[32..47].copy_from_slice(b"Test file info.");
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

fn fixture_session() -> Session {
    Engine::new()
        .open_bytes(build_test_gci())
        .expect("fixture should open")
}

#[test]
fn full_json_uses_canonical_top_level_order() {
    let session = fixture_session();
    let value = render_json_full(&session, JsonStyle::CanonicalV1);
    let keys: Vec<&str> = value
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(
        keys,
        vec![
            "game_code",
            "maker_code",
            "filename",
            "modified_at",
            "banner_format",
            "permissions",
            "copy_counter",
            "first_block",
            "block_count",
            "game_name",
            "file_info",
            "has_banner",
        ]
    );
}

#[test]
fn full_json_carries_extracted_values() {
    let session = fixture_session();
    let value = render_json_full(&session, JsonStyle::CanonicalV1);

    assert_eq!(value["game_name"], "Test Game");
    assert_eq!(value["file_info"], "Test file info.");
    assert_eq!(value["banner_format"], "CI8");
    assert_eq!(value["permissions"], serde_json::json!(["public"]));
    assert_eq!(value["modified_at"], "2000-01-02T00:00:00+00:00");
}

#[test]
fn text_sheet_lists_snapshot_fields() {
    let session = fixture_session();
    let text = render_text_full(&session, TextStyle::Plain);

    assert!(text.contains("Game code:"));
    assert!(text.contains("GTEE"));
    assert!(text.contains("Test file info."));
    assert!(text.contains("96x32"));
}

#[test]
fn banner_converts_to_rgba_image() {
    let session = fixture_session();
    let banner = session.banner().expect("fixture has a CI8 banner");
    let rgba = banner_to_image(banner);

    assert_eq!(rgba.dimensions(), (96, 32));
    assert_eq!(rgba.get_pixel(0, 0).0, [8, 8, 8, 255]);
}

#[test]
fn banner_png_written_when_present() {
    let session = fixture_session();
    let path = std::env::temp_dir().join("gci_render_banner_png_test.png");

    let written = write_banner_png(&session, &path).expect("png encode should succeed");
    assert!(written);
    assert!(path.exists());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn banner_png_skipped_when_absent() {
    let mut bytes = build_test_gci();
    bytes[7] = 0x00;
    let session = Engine::new().open_bytes(bytes).expect("fixture should open");
    let path = std::env::temp_dir().join("gci_render_no_banner_test.png");

    let written = write_banner_png(&session, &path).expect("skip should not error");
    assert!(!written);
}
