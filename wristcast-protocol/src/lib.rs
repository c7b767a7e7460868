//! Phone companion message schema
//!
//! This crate defines the key/value messages exchanged between the watchface
//! and its phone companion over the host's messaging transport.
//!
//! # Message Overview
//!
//! A message is a dictionary of typed tuples. The host transport hands them
//! over in its dictionary layout:
//! ```text
//! ┌───────┬─────────┬──────┬─────────┬─────────────┐
//! │ COUNT │ KEY     │ TYPE │ LENGTH  │ VALUE       │ ... repeated COUNT times
//! │ 1B    │ 4B (LE) │ 1B   │ 2B (LE) │ LENGTH B    │
//! └───────┴─────────┴──────┴─────────┴─────────────┘
//! ```
//!
//! Inbound weather replies carry up to four keys (see [`MessageKey`]).
//! Outbound refresh requests are empty dictionaries; the companion owns what
//! happens next.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod dict;
pub mod keys;
pub mod result;
pub mod text;
pub mod tuple;

pub use dict::{DictError, Dictionary, MAX_DICT_SIZE, MAX_TUPLES};
pub use keys::MessageKey;
pub use result::AppMessageResult;
pub use tuple::{Tuple, TupleType, TupleValue, MAX_BYTES_LEN, MAX_TEXT_LEN};
