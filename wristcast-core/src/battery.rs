//! Battery bar sizing

use wristcast_hal::BatteryChargeState;

/// Default bar track width in pixels (full screen width)
pub const DEFAULT_TRACK_WIDTH: u16 = 144;

/// Width of the filled part of a `track_width` bar at `percent` charge
///
/// Computed as `track_width * percent / 100` with integer division; percent
/// values above 100 are clamped.
pub fn fill_width_for(track_width: u16, percent: u8) -> u16 {
    let percent = percent.min(100) as u32;
    (track_width as u32 * percent / 100) as u16
}

/// Battery indicator state
///
/// Holds the latest charge state and whether the bar needs a redraw.
#[derive(Debug, Clone)]
pub struct BatteryIndicator {
    track_width: u16,
    state: BatteryChargeState,
    dirty: bool,
}

impl Default for BatteryIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_TRACK_WIDTH)
    }
}

impl BatteryIndicator {
    pub fn new(track_width: u16) -> Self {
        Self {
            track_width,
            state: BatteryChargeState::default(),
            dirty: false,
        }
    }

    /// Record a new charge state and mark the bar for redraw
    pub fn update(&mut self, state: BatteryChargeState) {
        self.state = state;
        self.dirty = true;
    }

    pub fn state(&self) -> BatteryChargeState {
        self.state
    }

    pub fn track_width(&self) -> u16 {
        self.track_width
    }

    /// Filled width for the current state
    pub fn fill_width(&self) -> u16 {
        fill_width_for(self.track_width, self.state.percent())
    }

    pub fn is_charging(&self) -> bool {
        self.state.is_charging
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the redraw flag, returning its previous value
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fill_width_examples() {
        assert_eq!(fill_width_for(144, 37), 53);
        assert_eq!(fill_width_for(144, 100), 144);
        assert_eq!(fill_width_for(144, 0), 0);
        assert_eq!(fill_width_for(144, 250), 144);
    }

    #[test]
    fn test_update_marks_dirty() {
        let mut battery = BatteryIndicator::default();
        assert!(!battery.is_dirty());

        battery.update(BatteryChargeState::new(37, true));
        assert_eq!(battery.fill_width(), 53);
        assert!(battery.is_charging());
        assert!(battery.take_dirty());
        assert!(!battery.take_dirty());
    }

    #[test]
    fn test_custom_track() {
        let mut battery = BatteryIndicator::new(100);
        battery.update(BatteryChargeState::new(42, false));
        assert_eq!(battery.fill_width(), 42);
    }

    proptest! {
        #[test]
        fn test_fill_never_exceeds_track(track in 0u16..=u16::MAX, percent in any::<u8>()) {
            let fill = fill_width_for(track, percent);
            prop_assert!(fill <= track);
            prop_assert_eq!(fill as u32, track as u32 * percent.min(100) as u32 / 100);
        }
    }
}
