//! Host-agnostic watchface logic
//!
//! This crate contains all watchface logic that does not depend on a
//! specific watch OS:
//!
//! - Clock formatting (12h/24h time, abbreviated date)
//! - Refresh scheduling (minute ticks, periodic weather requests)
//! - Decoding of companion weather replies into display strings
//! - Battery bar sizing
//! - Persistence of the last weather/location lines
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod battery;
pub mod clock;
pub mod config;
pub mod persist;
pub mod scheduler;
pub mod state;
pub mod weather;
