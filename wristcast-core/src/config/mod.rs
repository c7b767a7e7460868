//! Configuration types
//!
//! Host-agnostic watchface settings. Hosts load them from wherever they keep
//! configuration (a TOML file in the simulator) and call
//! [`WatchfaceConfig::validate`] before use.

pub mod types;

pub use types::*;
