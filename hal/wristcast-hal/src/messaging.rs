//! Messaging link to the phone companion
//!
//! Outbound sends are two-phase: [`Outbox::submit`] returns a handle at once,
//! and the host later reports completion or failure for that handle as a
//! separate event. Nothing blocks waiting for the phone.

use wristcast_protocol::{AppMessageResult, Dictionary};

/// Identifies one submitted outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutboxHandle(u32);

impl OutboxHandle {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }

    /// Handle following this one (wraps around)
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Outbound half of the host messaging transport
pub trait Outbox {
    /// Queue a message for the companion
    ///
    /// Returns the handle that the later sent/failed report will carry, or
    /// the host's reason code if the message could not even be queued
    /// (e.g. [`AppMessageResult::Busy`] while a send is in flight).
    fn submit(&mut self, message: &Dictionary) -> Result<OutboxHandle, AppMessageResult>;
}
