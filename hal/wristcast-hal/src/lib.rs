//! Wristcast host abstraction layer
//!
//! The watch operating system owns timers, persistence, battery sensing and
//! the messaging link to the phone. This crate defines those services as
//! traits so the watchface logic runs unchanged on a real watch or in the
//! host simulator.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Controller (wristcast-sim, etc.)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wristcast-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  watch OS     │       │  simulator    │
//! │  bindings     │       │  host         │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`persist::PersistStorage`] - Durable key/value blobs
//! - [`messaging::Outbox`] - Outbound messages to the phone companion
//! - [`battery::BatteryService`] - Battery charge state
//! - [`clock::WallClock`], [`clock::ClockSettings`] - Time and 12h/24h preference

#![no_std]
#![deny(unsafe_code)]

pub mod battery;
pub mod clock;
pub mod messaging;
pub mod persist;

// Re-export key traits at crate root for convenience
pub use battery::{BatteryChargeState, BatteryService};
pub use clock::{ClockSettings, WallClock};
pub use messaging::{Outbox, OutboxHandle};
pub use persist::{PersistError, PersistKey, PersistStorage, PersistStorageExt};
