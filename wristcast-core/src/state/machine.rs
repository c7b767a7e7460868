//! Window lifecycle machine

use super::events::Event;

/// Lifecycle of the main window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Process started, window not yet loaded
    #[default]
    Starting,
    /// Window loaded; layers exist and accept text
    Loaded,
    /// Window unloaded; layers released
    Unloaded,
}

impl Lifecycle {
    /// Check if display layers exist in this state
    pub fn has_layers(&self) -> bool {
        matches!(self, Lifecycle::Loaded)
    }

    /// Process an event and return the next state
    ///
    /// Non-lifecycle events never change the state. A load while already
    /// loaded is ignored so layers are never created twice.
    pub fn transition(self, event: &Event) -> Self {
        use Lifecycle::*;

        match (self, event) {
            (Starting | Unloaded, Event::WindowLoad) => Loaded,
            (Loaded, Event::WindowUnload) => Unloaded,
            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wristcast_hal::BatteryChargeState;

    #[test]
    fn test_load_unload_cycle() {
        let state = Lifecycle::default();
        assert!(!state.has_layers());

        let state = state.transition(&Event::WindowLoad);
        assert_eq!(state, Lifecycle::Loaded);
        assert!(state.has_layers());

        let state = state.transition(&Event::WindowUnload);
        assert_eq!(state, Lifecycle::Unloaded);

        let state = state.transition(&Event::WindowLoad);
        assert_eq!(state, Lifecycle::Loaded);
    }

    #[test]
    fn test_unload_before_load_ignored() {
        assert_eq!(
            Lifecycle::Starting.transition(&Event::WindowUnload),
            Lifecycle::Starting
        );
    }

    #[test]
    fn test_other_events_keep_state() {
        let battery = Event::BatteryChanged(BatteryChargeState::new(50, false));
        assert_eq!(Lifecycle::Loaded.transition(&battery), Lifecycle::Loaded);
        assert_eq!(Lifecycle::Loaded.transition(&Event::WindowLoad), Lifecycle::Loaded);
    }
}
