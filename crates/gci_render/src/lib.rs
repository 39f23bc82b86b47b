use std::fmt::Write as _;
use std::path::Path;

use gci_core::core_api::Session;
use gci_core::graphics::DecodedImage;
use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::{Map as JsonMap, Value as JsonValue};

const LABEL_WIDTH: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    #[default]
    Plain,
}

pub fn render_json_full(session: &Session, style: JsonStyle) -> JsonValue {
    let JsonStyle::CanonicalV1 = style;
    let snapshot = session.snapshot();

    let mut map = JsonMap::new();
    map.insert(
        "game_code".to_string(),
        JsonValue::String(snapshot.game_code.clone()),
    );
    map.insert(
        "maker_code".to_string(),
        JsonValue::String(snapshot.maker_code.clone()),
    );
    map.insert(
        "filename".to_string(),
        JsonValue::String(snapshot.filename.clone()),
    );
    map.insert(
        "modified_at".to_string(),
        JsonValue::String(snapshot.modified_at.to_rfc3339()),
    );
    map.insert(
        "banner_format".to_string(),
        JsonValue::String(snapshot.banner_format.to_string()),
    );
    map.insert(
        "permissions".to_string(),
        JsonValue::Array(
            snapshot
                .permissions
                .flag_names()
                .into_iter()
                .map(|name| JsonValue::String(name.to_string()))
                .collect(),
        ),
    );
    map.insert(
        "copy_counter".to_string(),
        JsonValue::from(snapshot.copy_counter),
    );
    map.insert(
        "first_block".to_string(),
        JsonValue::from(snapshot.first_block),
    );
    map.insert(
        "block_count".to_string(),
        JsonValue::from(snapshot.block_count),
    );
    map.insert(
        "game_name".to_string(),
        JsonValue::String(snapshot.game_name.clone()),
    );
    map.insert(
        "file_info".to_string(),
        JsonValue::String(snapshot.file_info.clone()),
    );
    map.insert("has_banner".to_string(), JsonValue::Bool(snapshot.has_banner));

    JsonValue::Object(map)
}

pub fn render_text_full(session: &Session, style: TextStyle) -> String {
    let TextStyle::Plain = style;
    let snapshot = session.snapshot();

    let mut out = String::new();
    push_line(&mut out, "Game code", &snapshot.game_code);
    push_line(&mut out, "Maker code", &snapshot.maker_code);
    push_line(&mut out, "File name", &snapshot.filename);
    push_line(
        &mut out,
        "Modified",
        &snapshot.modified_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    push_line(&mut out, "Banner format", &snapshot.banner_format.to_string());
    let flags = snapshot.permissions.flag_names();
    let flags_text = if flags.is_empty() {
        "(none)".to_string()
    } else {
        flags.join(", ")
    };
    push_line(&mut out, "Permissions", &flags_text);
    push_line(&mut out, "Copy counter", &snapshot.copy_counter.to_string());
    push_line(&mut out, "First block", &snapshot.first_block.to_string());
    push_line(&mut out, "Block count", &snapshot.block_count.to_string());
    push_line(&mut out, "Game name", &snapshot.game_name);
    push_line(&mut out, "File info", &snapshot.file_info);
    match session.banner() {
        Some(banner) => push_line(
            &mut out,
            "Banner",
            &format!("{}x{}", banner.width(), banner.height()),
        ),
        None => push_line(&mut out, "Banner", "(absent)"),
    }
    out
}

fn push_line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<width$} {value}", format!("{label}:"), width = LABEL_WIDTH);
}

/// Adapt a decoded banner to the image sink.
pub fn banner_to_image(banner: &DecodedImage) -> RgbaImage {
    let width = banner.width();
    let pixels = banner.pixels();
    RgbaImage::from_fn(width, banner.height(), |x, y| {
        Rgba(pixels[(y * width + x) as usize])
    })
}

/// Write the session's banner as PNG. Returns `Ok(false)` when the save
/// declares no supported banner; only I/O and encoding problems are errors.
pub fn write_banner_png<P: AsRef<Path>>(
    session: &Session,
    path: P,
) -> Result<bool, image::ImageError> {
    match session.banner() {
        Some(banner) => {
            banner_to_image(banner).save_with_format(path, ImageFormat::Png)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
