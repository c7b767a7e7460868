//! Typed key/value tuples

use heapless::{String, Vec};

use crate::text;

/// Maximum text value length in bytes (without terminator)
pub const MAX_TEXT_LEN: usize = 64;

/// Maximum byte-array value length
pub const MAX_BYTES_LEN: usize = 64;

/// Runtime type tag of a tuple value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TupleType {
    /// Raw bytes
    ByteArray,
    /// NUL-terminated text
    CString,
    /// Unsigned integer (1, 2 or 4 bytes)
    Uint,
    /// Signed integer (1, 2 or 4 bytes)
    Int,
}

// Wire format values
const TYPE_BYTE_ARRAY: u8 = 0;
const TYPE_CSTRING: u8 = 1;
const TYPE_UINT: u8 = 2;
const TYPE_INT: u8 = 3;

impl TupleType {
    /// Parse a type tag from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TYPE_BYTE_ARRAY => Some(TupleType::ByteArray),
            TYPE_CSTRING => Some(TupleType::CString),
            TYPE_UINT => Some(TupleType::Uint),
            TYPE_INT => Some(TupleType::Int),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            TupleType::ByteArray => TYPE_BYTE_ARRAY,
            TupleType::CString => TYPE_CSTRING,
            TupleType::Uint => TYPE_UINT,
            TupleType::Int => TYPE_INT,
        }
    }
}

/// A tuple value tagged with its runtime type
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TupleValue {
    Bytes(Vec<u8, MAX_BYTES_LEN>),
    Text(String<MAX_TEXT_LEN>),
    Uint(u32),
    Int(i32),
}

impl TupleValue {
    /// Text value, truncated to [`MAX_TEXT_LEN`]
    pub fn text(s: &str) -> Self {
        TupleValue::Text(text::bounded(s))
    }

    /// Byte-array value, truncated to [`MAX_BYTES_LEN`]
    pub fn bytes(data: &[u8]) -> Self {
        let len = data.len().min(MAX_BYTES_LEN);
        let mut vec = Vec::new();
        let _ = vec.extend_from_slice(&data[..len]);
        TupleValue::Bytes(vec)
    }

    /// Runtime type of this value
    pub fn tuple_type(&self) -> TupleType {
        match self {
            TupleValue::Bytes(_) => TupleType::ByteArray,
            TupleValue::Text(_) => TupleType::CString,
            TupleValue::Uint(_) => TupleType::Uint,
            TupleValue::Int(_) => TupleType::Int,
        }
    }

    /// Integer view: signed values, or unsigned values that fit in `i32`
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            TupleValue::Int(v) => Some(*v),
            TupleValue::Uint(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Text view
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TupleValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// One key/value pair of a message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tuple {
    pub key: u32,
    pub value: TupleValue,
}

impl Tuple {
    /// Signed integer tuple
    pub fn int(key: u32, value: i32) -> Self {
        Self {
            key,
            value: TupleValue::Int(value),
        }
    }

    /// Unsigned integer tuple
    pub fn uint(key: u32, value: u32) -> Self {
        Self {
            key,
            value: TupleValue::Uint(value),
        }
    }

    /// Text tuple
    pub fn text(key: u32, value: &str) -> Self {
        Self {
            key,
            value: TupleValue::text(value),
        }
    }
}
