use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// Input ends before the structure it should contain.
    Truncated,
    /// A declared size disagrees with the bytes actually present.
    LengthMismatch,
    /// An encoded value does not fit its declared field width.
    FieldOverflow,
    /// A record field is missing or holds a value of the wrong shape.
    BadField,
    /// A string field holds bytes outside the declared encoding.
    BadString,
    /// A palette buffer is not exactly 256 packed entries.
    PaletteSize,
    /// Pixel data does not divide into whole tiles for the given width.
    TileGeometry,
    /// An embedded offset points outside the data it indexes.
    OutOfRange,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub kind: FormatErrorKind,
    pub message: String,
}

impl FormatError {
    pub fn new(kind: FormatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for FormatError {}

impl From<io::Error> for FormatError {
    fn from(err: io::Error) -> Self {
        Self::new(FormatErrorKind::Io, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
