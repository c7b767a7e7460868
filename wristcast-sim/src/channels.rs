//! Inter-task communication channels
//!
//! Every host callback reaches the controller through [`EVENT_CHANNEL`], so
//! events are handled one at a time in arrival order.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use wristcast_core::state::Event;

use crate::host::CompanionRequest;

/// Channel capacity for watchface events
pub const EVENT_CHANNEL_SIZE: usize = 16;

/// Outbound messages the companion has not picked up yet
pub const COMPANION_CHANNEL_SIZE: usize = 4;

/// Events for the controller (ticks, messages, battery, lifecycle)
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Outbound messages from the watch to the simulated phone
pub static COMPANION_CHANNEL: Channel<
    CriticalSectionRawMutex,
    CompanionRequest,
    COMPANION_CHANNEL_SIZE,
> = Channel::new();

/// Raised before the final window unload is queued
pub static SHUTDOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();
