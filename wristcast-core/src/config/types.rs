//! Configuration type definitions

use crate::battery::DEFAULT_TRACK_WIDTH;
use crate::clock::ClockStyle;
use crate::scheduler::DEFAULT_REFRESH_INTERVAL_MIN;
use crate::weather::FragmentPolicy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest accepted refresh interval (once an hour)
pub const MAX_REFRESH_INTERVAL_MIN: u8 = 60;

/// Clock style preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockPreference {
    /// Follow the host's 12h/24h setting
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "system"))]
    System,
    #[cfg_attr(feature = "serde", serde(rename = "12h"))]
    TwelveHour,
    #[cfg_attr(feature = "serde", serde(rename = "24h"))]
    TwentyFourHour,
}

impl ClockPreference {
    /// Resolve against the host's 24h flag
    pub fn resolve(self, host_is_24h: bool) -> ClockStyle {
        match self {
            ClockPreference::System => ClockStyle::from_24h(host_is_24h),
            ClockPreference::TwelveHour => ClockStyle::TwelveHour,
            ClockPreference::TwentyFourHour => ClockStyle::TwentyFourHour,
        }
    }
}

/// Clock face settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClockConfig {
    pub style: ClockPreference,
    /// Create the date layer
    pub show_date: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            style: ClockPreference::System,
            show_date: true,
        }
    }
}

/// Weather refresh settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeatherConfig {
    /// Minutes between refresh requests (1-60)
    pub refresh_interval_min: u8,
    pub fragment_policy: FragmentPolicy,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            refresh_interval_min: DEFAULT_REFRESH_INTERVAL_MIN,
            fragment_policy: FragmentPolicy::CarryForward,
        }
    }
}

/// Battery bar settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BatteryConfig {
    /// Bar track width in pixels
    pub track_width: u16,
    /// Create the battery bar layer
    pub show_bar: bool,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            track_width: DEFAULT_TRACK_WIDTH,
            show_bar: true,
        }
    }
}

/// Complete watchface configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WatchfaceConfig {
    pub clock: ClockConfig,
    pub weather: WeatherConfig,
    pub battery: BatteryConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Refresh interval outside 1-60 minutes
    RefreshIntervalOutOfRange(u8),
    /// Battery track of zero width
    ZeroTrackWidth,
}

impl WatchfaceConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let interval = self.weather.refresh_interval_min;
        if !(1..=MAX_REFRESH_INTERVAL_MIN).contains(&interval) {
            return Err(ConfigError::RefreshIntervalOutOfRange(interval));
        }
        if self.battery.track_width == 0 {
            return Err(ConfigError::ZeroTrackWidth);
        }
        Ok(())
    }
}
