//! Clock formatter
//!
//! Turns wall-clock time into the time and date strings shown on the face.
//! Buffers are fixed-capacity and overwritten in place on every tick.

use core::fmt::Write;

use chrono::{Datelike, NaiveDateTime, Timelike};
use heapless::String;

/// Capacity of the time buffer ("23:59")
pub const TIME_CAP: usize = 5;

/// Capacity of the date buffer ("Sep 30")
pub const DATE_CAP: usize = 6;

/// Text shown in the time layer before the first update
pub const TIME_PLACEHOLDER: &str = "00:00";

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Hour display style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStyle {
    /// "01:05" .. "12:59"
    TwelveHour,
    /// "00:05" .. "23:59"
    TwentyFourHour,
}

impl ClockStyle {
    /// Style matching the host's 24h preference flag
    pub fn from_24h(is_24h: bool) -> Self {
        if is_24h {
            ClockStyle::TwentyFourHour
        } else {
            ClockStyle::TwelveHour
        }
    }
}

/// Write `HH:MM` (24h) or `hh:MM` (12h) into `buf`
pub fn format_time<const N: usize>(buf: &mut String<N>, now: &NaiveDateTime, style: ClockStyle) {
    let hour = match style {
        ClockStyle::TwentyFourHour => now.hour(),
        ClockStyle::TwelveHour => now.hour12().1,
    };
    buf.clear();
    let _ = write!(buf, "{:02}:{:02}", hour, now.minute());
}

/// Write `Mon DD` into `buf`
pub fn format_date<const N: usize>(buf: &mut String<N>, now: &NaiveDateTime) {
    buf.clear();
    let month = MONTH_ABBREV[now.month0() as usize];
    let _ = write!(buf, "{} {:02}", month, now.day());
}

/// Time and date display buffers
#[derive(Debug, Clone)]
pub struct ClockFormatter {
    time: String<TIME_CAP>,
    date: String<DATE_CAP>,
    show_date: bool,
}

impl ClockFormatter {
    /// Create a formatter showing the placeholder time
    pub fn new(show_date: bool) -> Self {
        let mut time = String::new();
        let _ = time.push_str(TIME_PLACEHOLDER);
        Self {
            time,
            date: String::new(),
            show_date,
        }
    }

    /// Recompute both buffers from the current time
    pub fn update(&mut self, now: &NaiveDateTime, style: ClockStyle) {
        format_time(&mut self.time, now, style);
        if self.show_date {
            format_date(&mut self.date, now);
        }
    }

    pub fn time(&self) -> &str {
        self.time.as_str()
    }

    /// Date text, or `None` for faces without a date
    pub fn date(&self) -> Option<&str> {
        self.show_date.then_some(self.date.as_str())
    }
}
