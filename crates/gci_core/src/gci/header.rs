use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{FieldSpec, Record, RecordSchema, Value, decode_ascii, encode_ascii};
use crate::error::{FormatError, FormatErrorKind, Result};

use super::types::GC_EPOCH_UNIX_OFFSET;

/// Pixel format of the banner image, from the low two bits of the
/// banner-flags byte. Unknown codes are carried, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerFormat {
    None,
    Ci8,
    Rgb5a3,
    Unknown(u8),
}

impl BannerFormat {
    pub const MASK: u8 = 0x03;

    pub fn from_flags(flags: u8) -> Self {
        match flags & Self::MASK {
            0 => Self::None,
            1 => Self::Ci8,
            2 => Self::Rgb5a3,
            other => Self::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::None => "none",
            Self::Ci8 => "CI8",
            Self::Rgb5a3 => "RGB5A3",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for BannerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Unknown(v) => write!(f, "unknown ({v})"),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// Pixel format of one animation icon slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconFormat {
    None,
    Ci8Shared,
    Rgb5a3,
    Ci8Unique,
}

impl IconFormat {
    pub fn from_raw(raw: u8) -> Self {
        match raw & 0x03 {
            0 => Self::None,
            1 => Self::Ci8Shared,
            2 => Self::Rgb5a3,
            _ => Self::Ci8Unique,
        }
    }

    pub fn raw(&self) -> u8 {
        match *self {
            Self::None => 0,
            Self::Ci8Shared => 1,
            Self::Rgb5a3 => 2,
            Self::Ci8Unique => 3,
        }
    }
}

/// Frame hold time of one animation icon slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationSpeed {
    None,
    Frames4,
    Frames8,
    Frames12,
}

impl AnimationSpeed {
    pub fn from_raw(raw: u8) -> Self {
        match raw & 0x03 {
            0 => Self::None,
            1 => Self::Frames4,
            2 => Self::Frames8,
            _ => Self::Frames12,
        }
    }

    pub fn raw(&self) -> u8 {
        match *self {
            Self::None => 0,
            Self::Frames4 => 1,
            Self::Frames8 => 2,
            Self::Frames12 => 3,
        }
    }
}

/// The 16-bit icon-format field: eight 2-bit codes, slot 0 in the low bits.
///
/// Decoding is mechanical; no slot is cross-checked against any other header
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconFormats(pub u16);

impl IconFormats {
    pub const SLOTS: usize = 8;

    pub fn get(&self, slot: usize) -> IconFormat {
        assert!(slot < Self::SLOTS);
        IconFormat::from_raw(((self.0 >> (2 * slot)) & 0x03) as u8)
    }

    pub fn to_array(&self) -> [IconFormat; Self::SLOTS] {
        std::array::from_fn(|slot| self.get(slot))
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

/// The 16-bit animation-speed field, packed like [`IconFormats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSpeeds(pub u16);

impl AnimationSpeeds {
    pub const SLOTS: usize = 8;

    pub fn get(&self, slot: usize) -> AnimationSpeed {
        assert!(slot < Self::SLOTS);
        AnimationSpeed::from_raw(((self.0 >> (2 * slot)) & 0x03) as u8)
    }

    pub fn to_array(&self) -> [AnimationSpeed; Self::SLOTS] {
        std::array::from_fn(|slot| self.get(slot))
    }

    pub fn raw(&self) -> u16 {
        self.0
    }
}

/// Permission byte. The raw value is preserved so files whose permission
/// byte carries bits outside the three known flags re-encode byte-for-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions(pub u8);

impl Permissions {
    pub const NO_MOVE: u8 = 0x10;
    pub const NO_COPY: u8 = 0x08;
    pub const PUBLIC: u8 = 0x04;

    pub fn from_flags(no_move: bool, no_copy: bool, public: bool) -> Self {
        let mut raw = 0;
        if no_move {
            raw |= Self::NO_MOVE;
        }
        if no_copy {
            raw |= Self::NO_COPY;
        }
        if public {
            raw |= Self::PUBLIC;
        }
        Self(raw)
    }

    pub fn no_move(&self) -> bool {
        self.0 & Self::NO_MOVE == Self::NO_MOVE
    }

    pub fn no_copy(&self) -> bool {
        self.0 & Self::NO_COPY == Self::NO_COPY
    }

    pub fn public(&self) -> bool {
        self.0 & Self::PUBLIC == Self::PUBLIC
    }

    pub fn flag_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.no_move() {
            names.push("no-move");
        }
        if self.no_copy() {
            names.push("no-copy");
        }
        if self.public() {
            names.push("public");
        }
        names
    }

    pub fn raw(&self) -> u8 {
        self.0
    }
}

/// The fixed 64-byte record at the start of every GCI file.
///
/// A header is never edited in place: producing a modified save file means
/// constructing a new value and re-serializing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub game_code: String,
    pub maker_code: String,
    /// Expected 0xFF; carried as found.
    pub reserved1: u8,
    pub banner_flags: u8,
    pub filename: String,
    /// Seconds since the GameCube epoch.
    pub mod_time: u32,
    /// Offset of the banner/icon data inside block 0.
    pub image_offset: u32,
    pub icon_formats: IconFormats,
    pub animation_speeds: AnimationSpeeds,
    pub permissions: Permissions,
    pub copy_counter: u8,
    pub first_block: u16,
    pub block_count: u16,
    /// Expected 0xFFFF; carried as found.
    pub reserved2: u16,
    /// Offset of the comment strings inside block 0.
    pub comments_offset: u32,
}

static HEADER_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::big_endian(vec![
        FieldSpec::bytes("game_code", 4)
            .with_decode(decode_ascii)
            .with_encode(encode_ascii),
        FieldSpec::bytes("maker_code", 2)
            .with_decode(decode_ascii)
            .with_encode(encode_ascii),
        FieldSpec::uint("reserved1", 1),
        FieldSpec::uint("banner_flags", 1),
        FieldSpec::bytes("filename", 32)
            .with_decode(decode_ascii)
            .with_encode(encode_ascii),
        FieldSpec::uint("mod_time", 4),
        FieldSpec::uint("image_offset", 4),
        FieldSpec::uint("icon_formats", 2),
        FieldSpec::uint("animation_speeds", 2),
        FieldSpec::uint("permissions", 1),
        FieldSpec::uint("copy_counter", 1),
        FieldSpec::uint("first_block", 2),
        FieldSpec::uint("block_count", 2),
        FieldSpec::uint("reserved2", 2),
        FieldSpec::uint("comments_offset", 4),
    ])
});

pub fn header_schema() -> &'static RecordSchema {
    &HEADER_SCHEMA
}

impl Header {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let record = header_schema().unpack(bytes)?;
        Self::from_record(&record)
    }

    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            game_code: record.string("game_code")?.to_string(),
            maker_code: record.string("maker_code")?.to_string(),
            reserved1: record.int("reserved1")? as u8,
            banner_flags: record.int("banner_flags")? as u8,
            filename: record.string("filename")?.to_string(),
            mod_time: record.int("mod_time")? as u32,
            image_offset: record.int("image_offset")? as u32,
            icon_formats: IconFormats(record.int("icon_formats")? as u16),
            animation_speeds: AnimationSpeeds(record.int("animation_speeds")? as u16),
            permissions: Permissions(record.int("permissions")? as u8),
            copy_counter: record.int("copy_counter")? as u8,
            first_block: record.int("first_block")? as u16,
            block_count: record.int("block_count")? as u16,
            reserved2: record.int("reserved2")? as u16,
            comments_offset: record.int("comments_offset")? as u32,
        })
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("game_code", Value::Str(self.game_code.clone()));
        record.insert("maker_code", Value::Str(self.maker_code.clone()));
        record.insert("reserved1", Value::Int(u64::from(self.reserved1)));
        record.insert("banner_flags", Value::Int(u64::from(self.banner_flags)));
        record.insert("filename", Value::Str(self.filename.clone()));
        record.insert("mod_time", Value::Int(u64::from(self.mod_time)));
        record.insert("image_offset", Value::Int(u64::from(self.image_offset)));
        record.insert(
            "icon_formats",
            Value::Int(u64::from(self.icon_formats.raw())),
        );
        record.insert(
            "animation_speeds",
            Value::Int(u64::from(self.animation_speeds.raw())),
        );
        record.insert("permissions", Value::Int(u64::from(self.permissions.raw())));
        record.insert("copy_counter", Value::Int(u64::from(self.copy_counter)));
        record.insert("first_block", Value::Int(u64::from(self.first_block)));
        record.insert("block_count", Value::Int(u64::from(self.block_count)));
        record.insert("reserved2", Value::Int(u64::from(self.reserved2)));
        record.insert(
            "comments_offset",
            Value::Int(u64::from(self.comments_offset)),
        );
        record
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        header_schema().pack(&self.to_record())
    }

    pub fn banner_format(&self) -> BannerFormat {
        BannerFormat::from_flags(self.banner_flags)
    }

    pub fn modified_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(GC_EPOCH_UNIX_OFFSET + i64::from(self.mod_time), 0)
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Opt-in checks beyond the bit layout. The default parse paths never
    /// call this; readers that want to reject files the console itself would
    /// not have written can.
    pub fn validate_strict(&self) -> Result<()> {
        if self.reserved1 != 0xFF {
            return Err(FormatError::new(
                FormatErrorKind::BadField,
                format!("reserved byte at 0x06 is 0x{:02X}, expected 0xFF", self.reserved1),
            ));
        }
        if self.reserved2 != 0xFFFF {
            return Err(FormatError::new(
                FormatErrorKind::BadField,
                format!(
                    "reserved bytes at 0x3A are 0x{:04X}, expected 0xFFFF",
                    self.reserved2
                ),
            ));
        }
        if let BannerFormat::Unknown(code) = self.banner_format() {
            return Err(FormatError::new(
                FormatErrorKind::BadField,
                format!("unknown banner format code {code}"),
            ));
        }
        Ok(())
    }
}
