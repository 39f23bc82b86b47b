//! Declarative fixed-width record schemas.
//!
//! A [`RecordSchema`] is an ordered list of named fields with fixed byte
//! widths. `unpack` consumes a buffer of exactly the schema's width and
//! produces a [`Record`] mapping field names to values; `pack` is the
//! inverse. A field may carry `decode`/`encode` hooks that translate between
//! the raw wire value and a domain value; when the hooks are true inverses,
//! `pack(unpack(b)) == b` for any buffer of the schema's width.

use std::collections::HashMap;

use crate::error::{FormatError, FormatErrorKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

/// A value held by one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(u64),
    Bytes(Vec<u8>),
    Str(String),
}

impl Value {
    fn shape(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Bytes(_) => "bytes",
            Value::Str(_) => "string",
        }
    }
}

/// Per-field translation between wire values and domain values.
pub type Transform = fn(Value) -> Result<Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Unsigned integer stored in 1, 2, 4, or 8 bytes.
    UInt(usize),
    /// Fixed-width byte string, right-padded with NUL on pack.
    Bytes(usize),
}

impl FieldKind {
    pub fn width(&self) -> usize {
        match *self {
            FieldKind::UInt(w) | FieldKind::Bytes(w) => w,
        }
    }
}

#[derive(Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub decode: Option<Transform>,
    pub encode: Option<Transform>,
}

impl FieldSpec {
    pub fn uint(name: &'static str, width: usize) -> Self {
        debug_assert!(matches!(width, 1 | 2 | 4 | 8));
        Self {
            name,
            kind: FieldKind::UInt(width),
            decode: None,
            encode: None,
        }
    }

    pub fn bytes(name: &'static str, width: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Bytes(width),
            decode: None,
            encode: None,
        }
    }

    pub fn with_decode(mut self, decode: Transform) -> Self {
        self.decode = Some(decode);
        self
    }

    pub fn with_encode(mut self, encode: Transform) -> Self {
        self.encode = Some(encode);
        self
    }
}

/// Unpacked field values, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: HashMap<&'static str, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: Value) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn int(&self, name: &str) -> Result<u64> {
        match self.require(name)? {
            Value::Int(v) => Ok(*v),
            other => Err(shape_mismatch(name, "integer", other)),
        }
    }

    pub fn bytes(&self, name: &str) -> Result<&[u8]> {
        match self.require(name)? {
            Value::Bytes(b) => Ok(b),
            other => Err(shape_mismatch(name, "bytes", other)),
        }
    }

    pub fn string(&self, name: &str) -> Result<&str> {
        match self.require(name)? {
            Value::Str(s) => Ok(s),
            other => Err(shape_mismatch(name, "string", other)),
        }
    }

    fn require(&self, name: &str) -> Result<&Value> {
        self.values.get(name).ok_or_else(|| {
            FormatError::new(FormatErrorKind::BadField, format!("missing field {name}"))
        })
    }
}

fn shape_mismatch(name: &str, expected: &str, got: &Value) -> FormatError {
    FormatError::new(
        FormatErrorKind::BadField,
        format!("field {name} holds {}, expected {expected}", got.shape()),
    )
}

pub struct RecordSchema {
    byte_order: ByteOrder,
    fields: Vec<FieldSpec>,
}

impl RecordSchema {
    pub fn new(byte_order: ByteOrder, fields: Vec<FieldSpec>) -> Self {
        Self { byte_order, fields }
    }

    pub fn big_endian(fields: Vec<FieldSpec>) -> Self {
        Self::new(ByteOrder::Big, fields)
    }

    /// Total byte width of one record.
    pub fn width(&self) -> usize {
        self.fields.iter().map(|f| f.kind.width()).sum()
    }

    pub fn unpack(&self, bytes: &[u8]) -> Result<Record> {
        let width = self.width();
        if bytes.len() != width {
            return Err(FormatError::new(
                FormatErrorKind::LengthMismatch,
                format!("record is {} bytes, schema expects {width}", bytes.len()),
            ));
        }

        let mut record = Record::new();
        let mut offset = 0;
        for field in &self.fields {
            let chunk = &bytes[offset..offset + field.kind.width()];
            offset += field.kind.width();

            let raw = match field.kind {
                FieldKind::UInt(_) => Value::Int(read_uint(chunk, self.byte_order)),
                FieldKind::Bytes(_) => Value::Bytes(chunk.to_vec()),
            };
            let value = match field.decode {
                Some(decode) => decode(raw)?,
                None => raw,
            };
            record.insert(field.name, value);
        }
        Ok(record)
    }

    pub fn pack(&self, record: &Record) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.width());
        for field in &self.fields {
            let value = record
                .get(field.name)
                .ok_or_else(|| {
                    FormatError::new(
                        FormatErrorKind::BadField,
                        format!("missing field {}", field.name),
                    )
                })?
                .clone();
            let value = match field.encode {
                Some(encode) => encode(value)?,
                None => value,
            };

            match (field.kind, value) {
                (FieldKind::UInt(width), Value::Int(v)) => {
                    write_uint(&mut out, v, width, self.byte_order, field.name)?;
                }
                (FieldKind::Bytes(width), Value::Bytes(b)) => {
                    if b.len() > width {
                        return Err(FormatError::new(
                            FormatErrorKind::FieldOverflow,
                            format!(
                                "field {} is {} bytes, wider than its declared {width}",
                                field.name,
                                b.len()
                            ),
                        ));
                    }
                    out.extend_from_slice(&b);
                    out.resize(out.len() + width - b.len(), 0);
                }
                (_, other) => {
                    return Err(FormatError::new(
                        FormatErrorKind::BadField,
                        format!(
                            "field {} holds {} after encode, unusable for its declared kind",
                            field.name,
                            other.shape()
                        ),
                    ));
                }
            }
        }
        Ok(out)
    }
}

fn read_uint(chunk: &[u8], order: ByteOrder) -> u64 {
    let mut value = 0u64;
    match order {
        ByteOrder::Big => {
            for &byte in chunk {
                value = (value << 8) | u64::from(byte);
            }
        }
        ByteOrder::Little => {
            for &byte in chunk.iter().rev() {
                value = (value << 8) | u64::from(byte);
            }
        }
    }
    value
}

fn write_uint(
    out: &mut Vec<u8>,
    value: u64,
    width: usize,
    order: ByteOrder,
    name: &str,
) -> Result<()> {
    if width < 8 && value >> (8 * width) != 0 {
        return Err(FormatError::new(
            FormatErrorKind::FieldOverflow,
            format!("field {name} value {value} does not fit in {width} bytes"),
        ));
    }
    let be = value.to_be_bytes();
    match order {
        ByteOrder::Big => out.extend_from_slice(&be[8 - width..]),
        ByteOrder::Little => out.extend(be[8 - width..].iter().rev().copied()),
    }
    Ok(())
}

/// Strip trailing NUL padding from a fixed-width ASCII field.
///
/// Interior NULs are preserved so the field re-encodes byte-for-byte.
pub fn decode_ascii(value: Value) -> Result<Value> {
    let Value::Bytes(bytes) = value else {
        return Err(FormatError::new(
            FormatErrorKind::BadField,
            "ascii decode expects raw bytes",
        ));
    };
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let trimmed = &bytes[..end];
    if !trimmed.is_ascii() {
        return Err(FormatError::new(
            FormatErrorKind::BadString,
            "string field contains non-ASCII bytes",
        ));
    }
    Ok(Value::Str(
        String::from_utf8_lossy(trimmed).into_owned(),
    ))
}

/// Re-encode an ASCII string; `pack` restores the NUL padding.
pub fn encode_ascii(value: Value) -> Result<Value> {
    let Value::Str(s) = value else {
        return Err(FormatError::new(
            FormatErrorKind::BadField,
            "ascii encode expects a string",
        ));
    };
    if !s.is_ascii() {
        return Err(FormatError::new(
            FormatErrorKind::BadString,
            format!("cannot encode non-ASCII string {s:?}"),
        ));
    }
    Ok(Value::Bytes(s.into_bytes()))
}
