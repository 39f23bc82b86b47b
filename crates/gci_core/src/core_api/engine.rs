use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::codec::{FieldSpec, RecordSchema, decode_ascii, encode_ascii};
use crate::error::{FormatError, FormatErrorKind, Result};
use crate::gci::header::BannerFormat;
use crate::gci::types::{BANNER_CI8_BYTES, BANNER_WIDTH, COMMENT_FIELD_SIZE};
use crate::gci::{Block, SaveFile};
use crate::graphics::{DecodedImage, decode_ci8};

use super::types::Snapshot;

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// An opened save file: the parsed container plus everything extracted
/// from it.
#[derive(Debug)]
pub struct Session {
    snapshot: Snapshot,
    banner: Option<DecodedImage>,
    save: SaveFile,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn open_bytes<B: AsRef<[u8]>>(&self, bytes: B) -> Result<Session> {
        Session::from_save(SaveFile::parse(bytes.as_ref())?)
    }

    pub fn open_path<P: AsRef<Path>>(&self, path: P) -> Result<Session> {
        self.open_bytes(fs::read(path)?)
    }
}

/// The two 32-byte comment strings stored back to back in block 0.
static COMMENTS_SCHEMA: LazyLock<RecordSchema> = LazyLock::new(|| {
    RecordSchema::big_endian(vec![
        FieldSpec::bytes("game_name", COMMENT_FIELD_SIZE)
            .with_decode(decode_ascii)
            .with_encode(encode_ascii),
        FieldSpec::bytes("file_info", COMMENT_FIELD_SIZE)
            .with_decode(decode_ascii)
            .with_encode(encode_ascii),
    ])
});

impl Session {
    fn from_save(save: SaveFile) -> Result<Self> {
        let (game_name, file_info) = read_comments(&save)?;
        let banner = extract_banner(&save)?;

        let header = &save.header;
        let snapshot = Snapshot {
            game_code: header.game_code.clone(),
            maker_code: header.maker_code.clone(),
            filename: header.filename.clone(),
            modified_at: header.modified_at(),
            banner_format: header.banner_format(),
            permissions: header.permissions,
            copy_counter: header.copy_counter,
            first_block: header.first_block,
            block_count: header.block_count,
            game_name,
            file_info,
            has_banner: banner.is_some(),
        };

        Ok(Self {
            snapshot,
            banner,
            save,
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn save(&self) -> &SaveFile {
        &self.save
    }

    pub fn game_name(&self) -> &str {
        &self.snapshot.game_name
    }

    pub fn file_info(&self) -> &str {
        &self.snapshot.file_info
    }

    /// Decoded banner image, present only when the header declares the CI8
    /// banner variant. Other formats are not an error; the banner is simply
    /// absent.
    pub fn banner(&self) -> Option<&DecodedImage> {
        self.banner.as_ref()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.save.to_bytes()
    }

    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

fn first_block(save: &SaveFile) -> Result<&Block> {
    save.blocks().first().ok_or_else(|| {
        FormatError::new(FormatErrorKind::OutOfRange, "save file has no blocks")
    })
}

fn read_comments(save: &SaveFile) -> Result<(String, String)> {
    let block = first_block(save)?;
    let offset = save.header.comments_offset as usize;
    let end = offset + 2 * COMMENT_FIELD_SIZE;
    if end > block.bytes().len() {
        return Err(FormatError::new(
            FormatErrorKind::OutOfRange,
            format!("comment strings at offset {offset} run past block 0"),
        ));
    }

    let record = COMMENTS_SCHEMA.unpack(&block.bytes()[offset..end])?;
    Ok((
        record.string("game_name")?.to_string(),
        record.string("file_info")?.to_string(),
    ))
}

fn extract_banner(save: &SaveFile) -> Result<Option<DecodedImage>> {
    if save.header.banner_format() != BannerFormat::Ci8 {
        return Ok(None);
    }

    let block = first_block(save)?;
    let offset = save.header.image_offset as usize;
    let end = offset + BANNER_CI8_BYTES;
    if end > block.bytes().len() {
        return Err(FormatError::new(
            FormatErrorKind::OutOfRange,
            format!("banner data at offset {offset} runs past block 0"),
        ));
    }

    decode_ci8(&block.bytes()[offset..end], BANNER_WIDTH).map(Some)
}
