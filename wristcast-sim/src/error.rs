//! Simulator errors

use std::path::PathBuf;

use thiserror::Error;
use wristcast_core::config::ConfigError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("configuration rejected: {0:?}")]
    Invalid(ConfigError),

    #[error("configuration error: {0}")]
    Setting(&'static str),

    #[error("bad start_time {0:?}, expected YYYY-MM-DDTHH:MM:SS")]
    StartTime(String),

    #[error("state file {} is corrupt: {source}", path.display())]
    StateFile {
        path: PathBuf,
        #[source]
        source: postcard::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    StateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        SimError::Invalid(e)
    }
}

pub type Result<T> = core::result::Result<T, SimError>;
