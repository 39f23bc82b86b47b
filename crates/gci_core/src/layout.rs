use crate::error::{FormatError, FormatErrorKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Header,
    Block(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub id: SectionId,
    pub range: ByteRange,
}

/// Section table of one save file: the header followed by its blocks.
///
/// `validate` checks that the sections tile the file contiguously from byte
/// 0 to the declared length, with no gaps or overlaps.
#[derive(Debug, Clone)]
pub struct FileLayout {
    pub file_len: usize,
    pub sections: Vec<SectionLayout>,
}

impl FileLayout {
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.sections.first() else {
            return Err(FormatError::new(
                FormatErrorKind::LengthMismatch,
                "file layout must contain at least one section",
            ));
        };

        if first.range.start != 0 {
            return Err(FormatError::new(
                FormatErrorKind::LengthMismatch,
                "layout does not start at byte 0",
            ));
        }

        let mut expected = 0usize;
        for section in &self.sections {
            if section.range.start != expected {
                return Err(FormatError::new(
                    FormatErrorKind::LengthMismatch,
                    format!(
                        "layout gap/overlap around section {:?}: expected start {}, got {}",
                        section.id, expected, section.range.start
                    ),
                ));
            }
            if section.range.end < section.range.start {
                return Err(FormatError::new(
                    FormatErrorKind::LengthMismatch,
                    format!(
                        "invalid section range {:?}: {}..{}",
                        section.id, section.range.start, section.range.end
                    ),
                ));
            }
            expected = section.range.end;
        }

        if expected != self.file_len {
            return Err(FormatError::new(
                FormatErrorKind::LengthMismatch,
                format!(
                    "layout does not cover file: ended at {}, file length {}",
                    expected, self.file_len
                ),
            ));
        }

        Ok(())
    }
}
