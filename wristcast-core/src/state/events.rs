//! Events delivered to the watchface controller

use chrono::NaiveDateTime;
use wristcast_hal::{BatteryChargeState, OutboxHandle};
use wristcast_protocol::{AppMessageResult, Dictionary};

/// Host callbacks, normalized into one queue
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Window lifecycle
    /// Main window pushed onto the window stack
    WindowLoad,
    /// Main window removed
    WindowUnload,

    /// Minute tick with the wall-clock time it fired for
    Tick(NaiveDateTime),

    // Messaging
    /// Message from the companion
    InboxReceived(Dictionary),
    /// Inbound message lost by the host
    InboxDropped(AppMessageResult),
    /// Outbound message delivered
    OutboxSent(OutboxHandle),
    /// Outbound message could not be delivered
    OutboxFailed(OutboxHandle, AppMessageResult),

    /// Battery state changed
    BatteryChanged(BatteryChargeState),
}

impl Event {
    /// Check if this event belongs to the window lifecycle
    pub fn is_lifecycle_event(&self) -> bool {
        matches!(self, Event::WindowLoad | Event::WindowUnload)
    }

    /// Check if this event comes from the messaging link
    pub fn is_messaging_event(&self) -> bool {
        matches!(
            self,
            Event::InboxReceived(_)
                | Event::InboxDropped(_)
                | Event::OutboxSent(_)
                | Event::OutboxFailed(..)
        )
    }

    /// Check if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::InboxDropped(_) | Event::OutboxFailed(..))
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Event::WindowLoad => "window_load",
            Event::WindowUnload => "window_unload",
            Event::Tick(_) => "tick",
            Event::InboxReceived(_) => "inbox_received",
            Event::InboxDropped(_) => "inbox_dropped",
            Event::OutboxSent(_) => "outbox_sent",
            Event::OutboxFailed(..) => "outbox_failed",
            Event::BatteryChanged(_) => "battery_changed",
        }
    }
}

// NaiveDateTime has no defmt support; log ticks by hour and minute
#[cfg(feature = "defmt")]
impl defmt::Format for Event {
    fn format(&self, f: defmt::Formatter) {
        use chrono::Timelike;
        match self {
            Event::Tick(now) => defmt::write!(f, "tick({=u32}:{=u32})", now.hour(), now.minute()),
            Event::InboxReceived(dict) => defmt::write!(f, "inbox_received({})", dict),
            Event::InboxDropped(reason) => defmt::write!(f, "inbox_dropped({})", reason),
            Event::OutboxSent(handle) => defmt::write!(f, "outbox_sent({})", handle),
            Event::OutboxFailed(handle, reason) => {
                defmt::write!(f, "outbox_failed({}, {})", handle, reason)
            }
            Event::BatteryChanged(state) => defmt::write!(f, "battery_changed({})", state),
            other => defmt::write!(f, "{=str}", other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_lifecycle_events() {
        assert!(Event::WindowLoad.is_lifecycle_event());
        assert!(Event::WindowUnload.is_lifecycle_event());
        assert!(!Event::Tick(noon()).is_lifecycle_event());
    }

    #[test]
    fn test_messaging_events() {
        assert!(Event::InboxReceived(Dictionary::new()).is_messaging_event());
        assert!(Event::OutboxSent(OutboxHandle::new(1)).is_messaging_event());
        assert!(!Event::BatteryChanged(BatteryChargeState::default()).is_messaging_event());
    }

    #[test]
    fn test_failure_events() {
        assert!(Event::InboxDropped(AppMessageResult::BufferOverflow).is_failure());
        assert!(
            Event::OutboxFailed(OutboxHandle::new(3), AppMessageResult::NotConnected).is_failure()
        );
        assert!(!Event::OutboxSent(OutboxHandle::new(3)).is_failure());
    }

    #[test]
    fn test_names() {
        assert_eq!(Event::Tick(noon()).name(), "tick");
        assert_eq!(Event::WindowUnload.name(), "window_unload");
    }
}
