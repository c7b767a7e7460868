//! Simulated persistent storage
//!
//! [`MemoryStore`] keeps values for the lifetime of the process.
//! [`FileStore`] mirrors it to a postcard-encoded file after every change so
//! values survive restarts of the simulator.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use wristcast_hal::persist::PERSIST_DATA_MAX;
use wristcast_hal::{PersistError, PersistKey, PersistStorage};

use crate::error::{Result, SimError};

/// In-memory key/value store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<PersistKey, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn entries(&self) -> Vec<(u32, Vec<u8>)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_u32(), value.clone()))
            .collect()
    }
}

impl PersistStorage for MemoryStore {
    fn read(&mut self, key: PersistKey, buffer: &mut [u8]) -> core::result::Result<usize, PersistError> {
        let data = self.values.get(&key).ok_or(PersistError::NotFound)?;
        if buffer.len() < data.len() {
            return Err(PersistError::BufferTooSmall);
        }
        buffer[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, key: PersistKey, data: &[u8]) -> core::result::Result<(), PersistError> {
        if data.len() > PERSIST_DATA_MAX {
            return Err(PersistError::TooLarge);
        }
        self.values.insert(key, data.to_vec());
        Ok(())
    }

    fn exists(&mut self, key: PersistKey) -> bool {
        self.values.contains_key(&key)
    }

    fn delete(&mut self, key: PersistKey) -> core::result::Result<(), PersistError> {
        self.values.remove(&key);
        Ok(())
    }
}

/// File-backed store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    memory: MemoryStore,
}

impl FileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut memory = MemoryStore::new();

        match std::fs::read(&path) {
            Ok(bytes) => {
                let entries: Vec<(u32, Vec<u8>)> =
                    postcard::from_bytes(&bytes).map_err(|source| SimError::StateFile {
                        path: path.clone(),
                        source,
                    })?;
                for (id, value) in entries {
                    match PersistKey::from_u32(id) {
                        Some(key) => {
                            memory.values.insert(key, value);
                        }
                        None => warn!("Ignoring unknown persisted key {}", id),
                    }
                }
                debug!("Loaded {} persisted values from {}", memory.len(), path.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No state file at {}, starting empty", path.display());
            }
            Err(source) => return Err(SimError::Io { path, source }),
        }

        Ok(Self { path, memory })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let bytes = postcard::to_allocvec(&self.memory.entries()).map_err(|source| {
            SimError::StateFile {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, bytes).map_err(|source| SimError::StateWrite {
            path: self.path.clone(),
            source,
        })
    }

    fn flush_or_log(&self) -> core::result::Result<(), PersistError> {
        self.flush().map_err(|e| {
            warn!("{}", e);
            PersistError::Storage
        })
    }
}

impl PersistStorage for FileStore {
    fn read(&mut self, key: PersistKey, buffer: &mut [u8]) -> core::result::Result<usize, PersistError> {
        self.memory.read(key, buffer)
    }

    fn write(&mut self, key: PersistKey, data: &[u8]) -> core::result::Result<(), PersistError> {
        self.memory.write(key, data)?;
        self.flush_or_log()
    }

    fn exists(&mut self, key: PersistKey) -> bool {
        self.memory.exists(key)
    }

    fn delete(&mut self, key: PersistKey) -> core::result::Result<(), PersistError> {
        self.memory.delete(key)?;
        self.flush_or_log()
    }
}

/// Either store, chosen at startup
#[derive(Debug)]
pub enum SimStore {
    Memory(MemoryStore),
    File(FileStore),
}

impl PersistStorage for SimStore {
    fn read(&mut self, key: PersistKey, buffer: &mut [u8]) -> core::result::Result<usize, PersistError> {
        match self {
            SimStore::Memory(s) => s.read(key, buffer),
            SimStore::File(s) => s.read(key, buffer),
        }
    }

    fn write(&mut self, key: PersistKey, data: &[u8]) -> core::result::Result<(), PersistError> {
        match self {
            SimStore::Memory(s) => s.write(key, data),
            SimStore::File(s) => s.write(key, data),
        }
    }

    fn exists(&mut self, key: PersistKey) -> bool {
        match self {
            SimStore::Memory(s) => s.exists(key),
            SimStore::File(s) => s.exists(key),
        }
    }

    fn delete(&mut self, key: PersistKey) -> core::result::Result<(), PersistError> {
        match self {
            SimStore::Memory(s) => s.delete(key),
            SimStore::File(s) => s.delete(key),
        }
    }
}
