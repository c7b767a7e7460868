//! Persistent storage abstractions
//!
//! Provides traits for the host's durable key/value store. Values survive
//! application restarts and are addressed by small integer keys.

use heapless::String;
use wristcast_protocol::text;

/// Largest persisted string, including the host's terminator
pub const PERSIST_STRING_MAX: usize = 32;

/// Largest raw value the store accepts
pub const PERSIST_DATA_MAX: usize = 256;

/// Storage keys for persisted display strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum PersistKey {
    /// Composite weather line ("72°F, Cloudy")
    Weather = 1,
    /// Composite location line ("41.878, -87.62")
    LatLon = 2,
}

impl PersistKey {
    /// Get the key as its host id
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Create a key from its host id
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(PersistKey::Weather),
            2 => Some(PersistKey::LatLon),
            _ => None,
        }
    }
}

/// Errors from persistent storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Storage operation failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Value larger than [`PERSIST_DATA_MAX`]
    TooLarge,
    /// Stored data is not valid text
    Corrupted,
}

/// Persistent storage trait
///
/// The host store is synchronous: reads and writes complete before returning
/// and never suspend the event loop.
pub trait PersistStorage {
    /// Read a value by key into the provided buffer
    ///
    /// Returns the number of bytes read, or [`PersistError::NotFound`].
    fn read(&mut self, key: PersistKey, buffer: &mut [u8]) -> Result<usize, PersistError>;

    /// Write a value by key, replacing any previous value
    fn write(&mut self, key: PersistKey, data: &[u8]) -> Result<(), PersistError>;

    /// Check if a key exists in storage
    fn exists(&mut self, key: PersistKey) -> bool;

    /// Remove a key; removing a missing key is not an error
    fn delete(&mut self, key: PersistKey) -> Result<(), PersistError>;
}

/// String helpers on top of [`PersistStorage`]
pub trait PersistStorageExt: PersistStorage {
    /// Read a string value, truncated to `N` bytes
    ///
    /// Returns `Ok(None)` if the key has never been written.
    fn read_string<const N: usize>(
        &mut self,
        key: PersistKey,
    ) -> Result<Option<String<N>>, PersistError> {
        if !self.exists(key) {
            return Ok(None);
        }

        let mut buf = [0u8; PERSIST_DATA_MAX];
        let len = match self.read(key, &mut buf) {
            Ok(len) => len,
            Err(PersistError::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };

        // Stop at a terminator written by other tooling
        let data = &buf[..len];
        let end = data.iter().position(|&b| b == 0).unwrap_or(len);
        let s = core::str::from_utf8(&data[..end]).map_err(|_| PersistError::Corrupted)?;
        Ok(Some(text::bounded(s)))
    }

    /// Write a string value, truncated to fit [`PERSIST_STRING_MAX`]
    fn write_string(&mut self, key: PersistKey, value: &str) -> Result<(), PersistError> {
        let clipped = text::clip(value, PERSIST_STRING_MAX - 1);
        self.write(key, clipped.as_bytes())
    }
}

// Blanket implementation for all PersistStorage types
impl<T: PersistStorage> PersistStorageExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-slot store used by the tests
    #[derive(Default)]
    struct SlotStore {
        slots: [Option<heapless::Vec<u8, PERSIST_DATA_MAX>>; 2],
    }

    impl SlotStore {
        fn slot(key: PersistKey) -> usize {
            key.as_u32() as usize - 1
        }
    }

    impl PersistStorage for SlotStore {
        fn read(&mut self, key: PersistKey, buffer: &mut [u8]) -> Result<usize, PersistError> {
            let data = self.slots[Self::slot(key)]
                .as_ref()
                .ok_or(PersistError::NotFound)?;
            if buffer.len() < data.len() {
                return Err(PersistError::BufferTooSmall);
            }
            buffer[..data.len()].copy_from_slice(data);
            Ok(data.len())
        }

        fn write(&mut self, key: PersistKey, data: &[u8]) -> Result<(), PersistError> {
            let mut vec = heapless::Vec::new();
            vec.extend_from_slice(data)
                .map_err(|_| PersistError::TooLarge)?;
            self.slots[Self::slot(key)] = Some(vec);
            Ok(())
        }

        fn exists(&mut self, key: PersistKey) -> bool {
            self.slots[Self::slot(key)].is_some()
        }

        fn delete(&mut self, key: PersistKey) -> Result<(), PersistError> {
            self.slots[Self::slot(key)] = None;
            Ok(())
        }
    }

    #[test]
    fn test_key_ids() {
        assert_eq!(PersistKey::Weather.as_u32(), 1);
        assert_eq!(PersistKey::LatLon.as_u32(), 2);
        assert_eq!(PersistKey::from_u32(2), Some(PersistKey::LatLon));
        assert!(PersistKey::from_u32(0).is_none());
        assert!(PersistKey::from_u32(3).is_none());
    }

    #[test]
    fn test_missing_string_is_none() {
        let mut store = SlotStore::default();
        let value: Option<String<32>> = store.read_string(PersistKey::Weather).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_string_roundtrip() {
        let mut store = SlotStore::default();
        store.write_string(PersistKey::Weather, "72°F, Cloudy").unwrap();

        let value: String<32> = store.read_string(PersistKey::Weather).unwrap().unwrap();
        assert_eq!(value.as_str(), "72°F, Cloudy");
        assert!(!store.exists(PersistKey::LatLon));
    }

    #[test]
    fn test_write_string_clips_to_host_limit() {
        let mut store = SlotStore::default();
        store
            .write_string(PersistKey::LatLon, "0123456789012345678901234567890123456789")
            .unwrap();

        let value: String<64> = store.read_string(PersistKey::LatLon).unwrap().unwrap();
        assert_eq!(value.len(), PERSIST_STRING_MAX - 1);
    }

    #[test]
    fn test_terminated_value() {
        let mut store = SlotStore::default();
        store.write(PersistKey::Weather, b"Rain\0junk").unwrap();

        let value: String<32> = store.read_string(PersistKey::Weather).unwrap().unwrap();
        assert_eq!(value.as_str(), "Rain");
    }

    #[test]
    fn test_corrupted_value() {
        let mut store = SlotStore::default();
        store.write(PersistKey::Weather, &[0xC3, 0x28]).unwrap();

        let result: Result<Option<String<32>>, _> = store.read_string(PersistKey::Weather);
        assert_eq!(result, Err(PersistError::Corrupted));
    }
}
