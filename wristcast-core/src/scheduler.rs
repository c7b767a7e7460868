//! Refresh scheduler
//!
//! Driven by the host's minute tick. Every tick refreshes the clock; ticks
//! whose minute is a multiple of the refresh interval also ask the phone
//! for fresh weather.

/// Default weather refresh interval in minutes
pub const DEFAULT_REFRESH_INTERVAL_MIN: u8 = 5;

/// What a tick asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Reformat time/date (always true)
    pub update_clock: bool,
    /// Send a weather refresh request to the companion
    pub request_weather: bool,
}

/// Minute-tick scheduler
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    interval_min: u8,
    ticks: u32,
    requests: u32,
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL_MIN)
    }
}

impl RefreshScheduler {
    /// Create a scheduler; an interval of 0 is treated as 1
    pub fn new(interval_min: u8) -> Self {
        Self {
            interval_min: interval_min.max(1),
            ticks: 0,
            requests: 0,
        }
    }

    /// Check whether a tick at `minute` triggers a weather request
    pub fn should_refresh(&self, minute: u32) -> bool {
        minute % self.interval_min as u32 == 0
    }

    /// Process a minute tick
    ///
    /// # Arguments
    /// - `minute`: minute of the hour (0-59) the tick was delivered for
    pub fn on_tick(&mut self, minute: u32) -> TickOutcome {
        self.ticks = self.ticks.wrapping_add(1);

        let request_weather = self.should_refresh(minute);
        if request_weather {
            self.requests = self.requests.wrapping_add(1);
        }

        TickOutcome {
            update_clock: true,
            request_weather,
        }
    }

    pub fn interval_min(&self) -> u8 {
        self.interval_min
    }

    /// Ticks processed so far
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Weather requests triggered so far
    pub fn requests(&self) -> u32 {
        self.requests
    }
}
