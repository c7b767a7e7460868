//! Simulated wall clock and clock settings

use core::cell::Cell;

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use wristcast_hal::{ClockSettings, WallClock};

/// Wall clock that either follows local time or advances one minute per tick
pub struct SimClock {
    simulated: Option<Cell<NaiveDateTime>>,
}

impl SimClock {
    /// Follow the host's local time
    pub fn realtime() -> Self {
        Self { simulated: None }
    }

    /// Start at `start` (seconds dropped) and advance only on [`SimClock::advance`]
    pub fn accelerated(start: NaiveDateTime) -> Self {
        let start = start.with_second(0).unwrap_or(start).with_nanosecond(0).unwrap_or(start);
        Self {
            simulated: Some(Cell::new(start)),
        }
    }

    pub fn is_accelerated(&self) -> bool {
        self.simulated.is_some()
    }

    /// Move simulated time forward one minute
    pub fn advance(&self) -> NaiveDateTime {
        match &self.simulated {
            Some(cell) => {
                let next = cell.get() + Duration::minutes(1);
                cell.set(next);
                next
            }
            None => self.now(),
        }
    }
}

impl WallClock for SimClock {
    fn now(&self) -> NaiveDateTime {
        match &self.simulated {
            Some(cell) => cell.get(),
            None => Local::now().naive_local(),
        }
    }
}

/// Fixed host preferences
#[derive(Debug, Clone, Copy)]
pub struct SimSettings {
    pub is_24h: bool,
}

impl ClockSettings for SimSettings {
    fn is_24h_style(&self) -> bool {
        self.is_24h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_accelerated_advances_by_minute() {
        let start = NaiveDate::from_ymd_opt(2015, 3, 7)
            .unwrap()
            .and_hms_opt(23, 59, 42)
            .unwrap();
        let clock = SimClock::accelerated(start);
        assert_eq!(clock.now().second(), 0);

        let next = clock.advance();
        assert_eq!(next.hour(), 0);
        assert_eq!(next.minute(), 0);
        assert_eq!(clock.now(), next);
    }
}
