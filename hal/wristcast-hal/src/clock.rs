//! Wall clock and clock preferences

use chrono::NaiveDateTime;

/// Host wall clock (local time)
pub trait WallClock {
    fn now(&self) -> NaiveDateTime;
}

/// Read-only host settings affecting the clock face
pub trait ClockSettings {
    /// True if the user prefers a 24-hour clock
    fn is_24h_style(&self) -> bool;
}
