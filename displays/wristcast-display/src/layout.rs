//! Watchface layout
//!
//! Frames and styles for the four text rows and the battery bar on a
//! 144x168 screen. Rows top to bottom: date, time, weather, location.

use wristcast_core::clock::TIME_PLACEHOLDER;

use crate::toolkit::{Color, FontRef, Rect, SystemFont, TextAlign, TextStyle};

pub const SCREEN_WIDTH: u16 = 144;
pub const SCREEN_HEIGHT: u16 = 168;

/// Bar along the top edge, above the date
pub const BATTERY_FRAME: Rect = Rect::new(0, 2, SCREEN_WIDTH, 4);

/// Bar fill color while discharging
pub const BATTERY_COLOR: Color = Color::Black;

/// Bar fill color while charging
pub const BATTERY_CHARGING_COLOR: Color = Color::Gray;

/// One text row of the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextRow {
    pub frame: Rect,
    pub style: TextStyle,
    /// Text shown until the first update
    pub placeholder: &'static str,
}

pub const DATE_ROW: TextRow = TextRow {
    frame: Rect::new(0, 8, SCREEN_WIDTH, 32),
    style: TextStyle {
        font: FontRef::System(SystemFont::Gothic28Bold),
        text_color: Color::Black,
        background: Color::Clear,
        align: TextAlign::Center,
    },
    placeholder: "",
};

pub const TIME_ROW: TextRow = TextRow {
    frame: Rect::new(0, 40, SCREEN_WIDTH, 55),
    style: TextStyle {
        font: FontRef::System(SystemFont::Bitham42Bold),
        text_color: Color::Black,
        background: Color::Clear,
        align: TextAlign::Center,
    },
    placeholder: TIME_PLACEHOLDER,
};

/// Inverted band
pub const WEATHER_ROW: TextRow = TextRow {
    frame: Rect::new(0, 95, SCREEN_WIDTH, 32),
    style: TextStyle {
        font: FontRef::System(SystemFont::Gothic24Bold),
        text_color: Color::White,
        background: Color::Black,
        align: TextAlign::Center,
    },
    placeholder: "",
};

pub const LOCATION_ROW: TextRow = TextRow {
    frame: Rect::new(0, 127, SCREEN_WIDTH, 32),
    style: TextStyle {
        font: FontRef::System(SystemFont::Gothic24Bold),
        text_color: Color::Black,
        background: Color::Clear,
        align: TextAlign::Center,
    },
    placeholder: "",
};

/// Fill color for the battery bar
pub fn battery_color(is_charging: bool) -> Color {
    if is_charging {
        BATTERY_CHARGING_COLOR
    } else {
        BATTERY_COLOR
    }
}
