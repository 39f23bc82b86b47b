//! The GCI container: a 64-byte header followed by `block_count` blocks of
//! 8192 bytes each.
//!
//! Parsing is two-phase. The header schema is fixed-width and decoded
//! first; the schema for the whole file depends on the header's block
//! count, so it is constructed per call once that value is known.

pub mod header;
pub mod types;

use std::io::Read;

use crate::codec::{FieldSpec, RecordSchema};
use crate::error::{FormatError, FormatErrorKind, Result};
use crate::layout::{ByteRange, FileLayout, SectionId, SectionLayout};

use header::Header;
use types::{BLOCK_SIZE, HEADER_SIZE};

/// One 8192-byte storage unit. Length is enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    bytes: Vec<u8>,
}

impl Block {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != BLOCK_SIZE {
            return Err(FormatError::new(
                FormatErrorKind::LengthMismatch,
                format!("block is {} bytes, expected {BLOCK_SIZE}", bytes.len()),
            ));
        }
        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Whole-file schema, parameterized by the block count decoded in phase one.
fn file_schema(block_count: u16) -> RecordSchema {
    RecordSchema::big_endian(vec![
        FieldSpec::bytes("header", HEADER_SIZE),
        FieldSpec::bytes("save_data", usize::from(block_count) * BLOCK_SIZE),
    ])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    pub header: Header,
    blocks: Vec<Block>,
}

impl SaveFile {
    /// Construct from parts, enforcing the block-count invariant.
    pub fn new(header: Header, blocks: Vec<Block>) -> Result<Self> {
        if blocks.len() != usize::from(header.block_count) {
            return Err(FormatError::new(
                FormatErrorKind::LengthMismatch,
                format!(
                    "header declares {} blocks, got {}",
                    header.block_count,
                    blocks.len()
                ),
            ));
        }
        Ok(Self { header, blocks })
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(FormatError::new(
                FormatErrorKind::Truncated,
                format!(
                    "file is {} bytes, shorter than the {HEADER_SIZE}-byte header",
                    bytes.len()
                ),
            ));
        }

        let header = Header::parse(&bytes[..HEADER_SIZE])?;
        let expected = HEADER_SIZE + usize::from(header.block_count) * BLOCK_SIZE;
        if bytes.len() != expected {
            return Err(FormatError::new(
                FormatErrorKind::LengthMismatch,
                format!(
                    "length mismatch: {} blocks need {expected} bytes, file has {}",
                    header.block_count,
                    bytes.len()
                ),
            ));
        }

        let record = file_schema(header.block_count).unpack(bytes)?;
        let blocks = record
            .bytes("save_data")?
            .chunks_exact(BLOCK_SIZE)
            .map(|chunk| Block {
                bytes: chunk.to_vec(),
            })
            .collect();

        let file = Self { header, blocks };
        file.layout().validate()?;
        Ok(file)
    }

    pub fn parse_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::parse(&bytes)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.blocks.len() != usize::from(self.header.block_count) {
            return Err(FormatError::new(
                FormatErrorKind::LengthMismatch,
                format!(
                    "header declares {} blocks, save holds {}",
                    self.header.block_count,
                    self.blocks.len()
                ),
            ));
        }
        let mut out = self.header.to_bytes()?;
        for block in &self.blocks {
            out.extend_from_slice(&block.bytes);
        }
        Ok(out)
    }

    pub fn layout(&self) -> FileLayout {
        let mut sections = vec![SectionLayout {
            id: SectionId::Header,
            range: ByteRange {
                start: 0,
                end: HEADER_SIZE,
            },
        }];
        for index in 0..self.blocks.len() {
            let start = HEADER_SIZE + index * BLOCK_SIZE;
            sections.push(SectionLayout {
                id: SectionId::Block(index),
                range: ByteRange {
                    start,
                    end: start + BLOCK_SIZE,
                },
            });
        }
        FileLayout {
            file_len: HEADER_SIZE + self.blocks.len() * BLOCK_SIZE,
            sections,
        }
    }
}
