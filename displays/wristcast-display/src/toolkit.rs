//! Host UI toolkit trait
//!
//! Defines the layer and font services the watch OS provides. Every
//! `create_*`/`load_*` call must be paired with the matching
//! `destroy_*`/`unload_*` call.

/// UI toolkit errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiError {
    /// Host heap exhausted
    OutOfMemory,
    /// Layer id not known to the toolkit
    InvalidLayer,
    /// Font key or resource not found
    FontUnavailable,
}

/// Handle to a layer owned by the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerId(pub u16);

/// Handle to a loaded font
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontId(pub u16);

/// Layer frame in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }
}

/// Colors available on a black and white screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Clear,
    Black,
    White,
    /// Dithered fill, used to tell the charging bar apart
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Built-in host fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemFont {
    Gothic24Bold,
    Gothic28Bold,
    Bitham42Bold,
}

impl SystemFont {
    /// Host lookup key
    pub fn key(self) -> &'static str {
        match self {
            SystemFont::Gothic24Bold => "FONT_KEY_GOTHIC_24_BOLD",
            SystemFont::Gothic28Bold => "FONT_KEY_GOTHIC_28_BOLD",
            SystemFont::Bitham42Bold => "FONT_KEY_BITHAM_42_BOLD",
        }
    }
}

/// A font by symbolic key or bundled resource id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontRef {
    System(SystemFont),
    Resource(u32),
}

/// How a text layer is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    pub font: FontRef,
    pub text_color: Color,
    pub background: Color,
    pub align: TextAlign,
}

/// Host UI toolkit trait
///
/// Provides the window's visual elements. Implementations own the layer
/// tree and do all drawing; the caller only holds ids.
pub trait UiToolkit {
    /// Load a font for use by text layers
    fn load_font(&mut self, font: FontRef) -> Result<FontId, UiError>;

    /// Release a font returned by [`UiToolkit::load_font`]
    fn unload_font(&mut self, font: FontId);

    /// Create a text layer and attach it to the window's root layer
    ///
    /// - `frame`: position and size in screen pixels
    /// - `font`: a font loaded with [`UiToolkit::load_font`]
    fn create_text_layer(
        &mut self,
        frame: Rect,
        style: &TextStyle,
        font: FontId,
    ) -> Result<LayerId, UiError>;

    /// Create a custom-drawn bar layer (filled from the left)
    fn create_bar_layer(&mut self, frame: Rect) -> Result<LayerId, UiError>;

    /// Detach and free a layer
    fn destroy_layer(&mut self, layer: LayerId);

    /// Replace the text shown by a text layer
    fn set_text(&mut self, layer: LayerId, text: &str) -> Result<(), UiError>;

    /// Set the filled width and fill color of a bar layer
    fn set_bar(&mut self, layer: LayerId, fill_width: u16, color: Color) -> Result<(), UiError>;

    /// Schedule a redraw of a layer
    fn mark_dirty(&mut self, layer: LayerId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_font_keys() {
        assert_eq!(SystemFont::Gothic24Bold.key(), "FONT_KEY_GOTHIC_24_BOLD");
        assert_eq!(SystemFont::Gothic28Bold.key(), "FONT_KEY_GOTHIC_28_BOLD");
        assert_eq!(SystemFont::Bitham42Bold.key(), "FONT_KEY_BITHAM_42_BOLD");
    }
}
