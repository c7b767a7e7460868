//! Simulated battery

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use wristcast_hal::{BatteryChargeState, BatteryService};

/// Battery state shared between the battery task and the controller
pub struct SimBattery {
    state: Mutex<CriticalSectionRawMutex, Cell<BatteryChargeState>>,
}

impl SimBattery {
    pub const fn new(state: BatteryChargeState) -> Self {
        Self {
            state: Mutex::new(Cell::new(state)),
        }
    }

    pub fn set(&self, state: BatteryChargeState) {
        self.state.lock(|cell| cell.set(state));
    }

    /// Drain one percent; plugs in at 5% and unplugs when full
    pub fn step(&self) -> BatteryChargeState {
        let current = self.peek();
        let next = if current.is_charging {
            let percent = (current.charge_percent + 5).min(100);
            BatteryChargeState::new(percent, percent < 100)
        } else if current.charge_percent <= 5 {
            BatteryChargeState::new(current.charge_percent, true)
        } else {
            BatteryChargeState::new(current.charge_percent - 1, false)
        };
        self.set(next);
        next
    }
}

impl BatteryService for SimBattery {
    fn peek(&self) -> BatteryChargeState {
        self.state.lock(|cell| cell.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discharge_then_charge() {
        let battery = SimBattery::new(BatteryChargeState::new(6, false));
        assert_eq!(battery.step(), BatteryChargeState::new(5, false));
        assert_eq!(battery.step(), BatteryChargeState::new(5, true));
        assert_eq!(battery.step(), BatteryChargeState::new(10, true));
        assert_eq!(battery.peek().charge_percent, 10);
    }

    #[test]
    fn test_unplug_when_full() {
        let battery = SimBattery::new(BatteryChargeState::new(98, true));
        assert_eq!(battery.step(), BatteryChargeState::new(100, false));
    }
}
