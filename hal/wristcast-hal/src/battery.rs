//! Battery service abstractions

/// Battery state as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryChargeState {
    /// Charge in percent (0-100)
    pub charge_percent: u8,
    /// Battery is currently charging
    pub is_charging: bool,
    /// Charger cable is connected
    pub is_plugged: bool,
}

impl BatteryChargeState {
    pub const fn new(charge_percent: u8, is_charging: bool) -> Self {
        Self {
            charge_percent,
            is_charging,
            is_plugged: is_charging,
        }
    }

    /// Charge clamped to 0-100
    pub fn percent(&self) -> u8 {
        self.charge_percent.min(100)
    }
}

/// Battery service trait
///
/// Change notifications are delivered as events; this trait only covers the
/// synchronous peek used at startup.
pub trait BatteryService {
    /// Read the current battery state
    fn peek(&self) -> BatteryChargeState;
}
