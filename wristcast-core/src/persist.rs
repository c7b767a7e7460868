//! Persistence of the composed display lines
//!
//! The last weather and location lines are saved after every successful
//! decode and read back at startup, so the face is populated before the
//! phone answers.

use wristcast_hal::{PersistError, PersistKey, PersistStorage, PersistStorageExt};

use crate::weather::{Composite, Readings};

/// Display-line persistence on top of a host store
pub struct Persistence<S: PersistStorage> {
    storage: S,
}

impl<S: PersistStorage> Persistence<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load one composed line
    ///
    /// Returns `Ok(None)` if the key has never been written.
    pub fn load(&mut self, key: PersistKey) -> Result<Option<Composite>, PersistError> {
        self.storage.read_string(key)
    }

    /// Load both lines; missing keys come back empty
    ///
    /// Returns the readings together with the number of keys found.
    pub fn restore(&mut self) -> Result<(Readings, usize), PersistError> {
        let mut readings = Readings::default();
        let mut found = 0;

        if let Some(weather) = self.load(PersistKey::Weather)? {
            readings.weather = weather;
            found += 1;
        }
        if let Some(location) = self.load(PersistKey::LatLon)? {
            readings.location = location;
            found += 1;
        }

        Ok((readings, found))
    }

    /// Save both lines
    ///
    /// Both keys are always attempted; the first failure is returned.
    pub fn save(&mut self, readings: &Readings) -> Result<(), PersistError> {
        let weather = self.storage.write_string(PersistKey::Weather, &readings.weather);
        let location = self.storage.write_string(PersistKey::LatLon, &readings.location);
        weather.and(location)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
