//! Message dictionaries and the host's dictionary byte layout.
//!
//! Layout:
//! - COUNT (1 byte): number of tuples
//! - per tuple:
//!   - KEY (4 bytes, little endian)
//!   - TYPE (1 byte): see [`TupleType`]
//!   - LENGTH (2 bytes, little endian): value length in bytes
//!   - VALUE (LENGTH bytes); cstrings include their NUL terminator
//!
//! Decoding is lenient about text: invalid UTF-8 keeps the valid prefix and
//! oversized values are truncated to the tuple capacity. Tuples with an
//! unknown type tag or a bad integer width, and tuples past [`MAX_TUPLES`],
//! are skipped and counted; only data that ends early fails the message.

use heapless::Vec;

use crate::tuple::{Tuple, TupleType, TupleValue, MAX_TEXT_LEN};

/// Maximum tuples kept per message
pub const MAX_TUPLES: usize = 16;

/// Size of a tuple header (KEY + TYPE + LENGTH)
pub const TUPLE_HEADER_SIZE: usize = 4 + 1 + 2;

/// Maximum encoded dictionary size
pub const MAX_DICT_SIZE: usize = 1 + MAX_TUPLES * (TUPLE_HEADER_SIZE + MAX_TEXT_LEN + 1);

/// Errors that can occur during dictionary encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictError {
    /// More tuples than [`MAX_TUPLES`]
    TooManyTuples,
    /// Data ends before the announced tuples do
    Incomplete,
    /// Unknown type tag
    InvalidType,
    /// Integer value with a width other than 1, 2 or 4 bytes
    InvalidLength,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// An ordered set of tuples forming one message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dictionary {
    tuples: Vec<Tuple, MAX_TUPLES>,
    skipped: u8,
}

impl Dictionary {
    /// Create an empty dictionary (an outbound refresh request)
    pub fn new() -> Self {
        Self {
            tuples: Vec::new(),
            skipped: 0,
        }
    }

    /// Build a dictionary from tuples, in order
    pub fn from_tuples(tuples: &[Tuple]) -> Result<Self, DictError> {
        let mut dict = Self::new();
        for tuple in tuples {
            dict.push(tuple.clone())?;
        }
        Ok(dict)
    }

    /// Append a tuple
    pub fn push(&mut self, tuple: Tuple) -> Result<(), DictError> {
        self.tuples
            .push(tuple)
            .map_err(|_| DictError::TooManyTuples)
    }

    /// Iterate tuples in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &Tuple> {
        self.tuples.iter()
    }

    /// Find the first tuple with the given key
    pub fn find(&self, key: u32) -> Option<&Tuple> {
        self.tuples.iter().find(|t| t.key == key)
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Tuples dropped while decoding
    pub fn skipped(&self) -> u8 {
        self.skipped
    }

    /// Number of bytes [`Dictionary::encode`] will write
    pub fn encoded_len(&self) -> usize {
        1 + self
            .tuples
            .iter()
            .map(|t| TUPLE_HEADER_SIZE + value_len(&t.value))
            .sum::<usize>()
    }

    /// Encode this dictionary into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, DictError> {
        let total = self.encoded_len();
        if buffer.len() < total {
            return Err(DictError::BufferTooSmall);
        }

        buffer[0] = self.tuples.len() as u8;
        let mut pos = 1;
        for tuple in &self.tuples {
            let len = value_len(&tuple.value);
            buffer[pos..pos + 4].copy_from_slice(&tuple.key.to_le_bytes());
            buffer[pos + 4] = tuple.value.tuple_type().to_byte();
            buffer[pos + 5..pos + 7].copy_from_slice(&(len as u16).to_le_bytes());
            pos += TUPLE_HEADER_SIZE;

            let value = &mut buffer[pos..pos + len];
            match &tuple.value {
                TupleValue::Bytes(bytes) => value.copy_from_slice(bytes),
                TupleValue::Text(text) => {
                    value[..text.len()].copy_from_slice(text.as_bytes());
                    value[text.len()] = 0;
                }
                TupleValue::Uint(v) => value.copy_from_slice(&v.to_le_bytes()),
                TupleValue::Int(v) => value.copy_from_slice(&v.to_le_bytes()),
            }
            pos += len;
        }

        Ok(total)
    }

    /// Encode this dictionary into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_DICT_SIZE>, DictError> {
        let mut buffer = [0u8; MAX_DICT_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| DictError::BufferTooSmall)?;
        Ok(vec)
    }

    /// Decode a dictionary from the host's byte layout
    ///
    /// Every record announced by COUNT is walked. Records that cannot be
    /// kept are skipped so the rest of the message still arrives.
    pub fn decode(bytes: &[u8]) -> Result<Self, DictError> {
        let (&count, mut rest) = bytes.split_first().ok_or(DictError::Incomplete)?;

        let mut dict = Self::new();
        for _ in 0..count {
            if rest.len() < TUPLE_HEADER_SIZE {
                return Err(DictError::Incomplete);
            }
            let key = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
            let tag = rest[4];
            let len = u16::from_le_bytes([rest[5], rest[6]]) as usize;
            rest = &rest[TUPLE_HEADER_SIZE..];

            if rest.len() < len {
                return Err(DictError::Incomplete);
            }
            let (raw, tail) = rest.split_at(len);
            rest = tail;

            let kept = TupleType::from_byte(tag)
                .ok_or(DictError::InvalidType)
                .and_then(|tuple_type| decode_value(tuple_type, raw))
                .and_then(|value| dict.push(Tuple { key, value }));
            if kept.is_err() {
                dict.skipped = dict.skipped.saturating_add(1);
            }
        }

        Ok(dict)
    }
}

/// Encoded length of a value
fn value_len(value: &TupleValue) -> usize {
    match value {
        TupleValue::Bytes(bytes) => bytes.len(),
        TupleValue::Text(text) => text.len() + 1,
        TupleValue::Uint(_) | TupleValue::Int(_) => 4,
    }
}

fn decode_value(tuple_type: TupleType, raw: &[u8]) -> Result<TupleValue, DictError> {
    match tuple_type {
        TupleType::ByteArray => Ok(TupleValue::bytes(raw)),
        TupleType::CString => {
            // Stop at the terminator, if any
            let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
            let raw = &raw[..end];
            let text = match core::str::from_utf8(raw) {
                Ok(text) => text,
                Err(e) => core::str::from_utf8(&raw[..e.valid_up_to()]).unwrap_or(""),
            };
            Ok(TupleValue::text(text))
        }
        TupleType::Uint => match raw.len() {
            1 => Ok(TupleValue::Uint(raw[0] as u32)),
            2 => Ok(TupleValue::Uint(u16::from_le_bytes([raw[0], raw[1]]) as u32)),
            4 => Ok(TupleValue::Uint(u32::from_le_bytes([
                raw[0], raw[1], raw[2], raw[3],
            ]))),
            _ => Err(DictError::InvalidLength),
        },
        TupleType::Int => match raw.len() {
            1 => Ok(TupleValue::Int(raw[0] as i8 as i32)),
            2 => Ok(TupleValue::Int(i16::from_le_bytes([raw[0], raw[1]]) as i32)),
            4 => Ok(TupleValue::Int(i32::from_le_bytes([
                raw[0], raw[1], raw[2], raw[3],
            ]))),
            _ => Err(DictError::InvalidLength),
        },
    }
}
