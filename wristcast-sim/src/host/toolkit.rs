//! Console UI toolkit
//!
//! Keeps the layer tree in memory and renders it as text lines, one per
//! layer, top to bottom.

use std::collections::BTreeMap;
use std::fmt::Write;

use log::trace;
use wristcast_display::{
    Color, FontId, FontRef, LayerId, Rect, TextAlign, TextStyle, UiError, UiToolkit,
};

/// Characters per rendered row
const RENDER_COLUMNS: usize = 24;

#[derive(Debug, Clone)]
enum Content {
    Text { text: String, style: TextStyle },
    Bar { fill_width: u16, color: Color },
}

#[derive(Debug, Clone)]
struct Layer {
    frame: Rect,
    content: Content,
}

/// Text-mode stand-in for the watch compositor
#[derive(Debug, Default)]
pub struct ConsoleToolkit {
    layers: BTreeMap<LayerId, Layer>,
    fonts: BTreeMap<FontId, FontRef>,
    changed: bool,
}

impl ConsoleToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowest id not held by a live layer or font
    fn allocate(&self) -> Result<u16, UiError> {
        (1..=u16::MAX)
            .find(|&id| {
                !self.layers.contains_key(&LayerId(id)) && !self.fonts.contains_key(&FontId(id))
            })
            .ok_or(UiError::OutOfMemory)
    }

    /// Layers currently alive
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Fonts currently loaded
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Clear the change flag, returning its previous value
    pub fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }

    /// Text of every text layer, top to bottom
    pub fn texts(&self) -> Vec<&str> {
        let mut layers: Vec<&Layer> = self.layers.values().collect();
        layers.sort_by_key(|l| l.frame.y);
        layers
            .into_iter()
            .filter_map(|l| match &l.content {
                Content::Text { text, .. } => Some(text.as_str()),
                Content::Bar { .. } => None,
            })
            .collect()
    }

    /// Render the face as text, one line per layer
    pub fn render(&self) -> String {
        let mut layers: Vec<&Layer> = self.layers.values().collect();
        layers.sort_by_key(|l| l.frame.y);

        let mut out = String::new();
        let _ = writeln!(out, "+{}+", "-".repeat(RENDER_COLUMNS));
        for layer in layers {
            let line = match &layer.content {
                Content::Text { text, style } => align(text, style.align),
                Content::Bar { fill_width, color } => bar(*fill_width, layer.frame.width, *color),
            };
            let _ = writeln!(out, "|{}|", line);
        }
        let _ = write!(out, "+{}+", "-".repeat(RENDER_COLUMNS));
        out
    }
}

fn align(text: &str, align: TextAlign) -> String {
    let shown: String = text.chars().take(RENDER_COLUMNS).collect();
    let width = RENDER_COLUMNS;
    match align {
        TextAlign::Left => format!("{:<width$}", shown),
        TextAlign::Center => format!("{:^width$}", shown),
        TextAlign::Right => format!("{:>width$}", shown),
    }
}

fn bar(fill_width: u16, track_width: u16, color: Color) -> String {
    let filled = if track_width == 0 {
        0
    } else {
        (fill_width as usize * RENDER_COLUMNS / track_width as usize).min(RENDER_COLUMNS)
    };
    let glyph = if color == Color::Gray { '+' } else { '#' };
    let mut line: String = std::iter::repeat(glyph).take(filled).collect();
    line.extend(std::iter::repeat(' ').take(RENDER_COLUMNS - filled));
    line
}

impl UiToolkit for ConsoleToolkit {
    fn load_font(&mut self, font: FontRef) -> Result<FontId, UiError> {
        let id = FontId(self.allocate()?);
        self.fonts.insert(id, font);
        match font {
            FontRef::System(system) => trace!("Loaded font {} as {:?}", system.key(), id),
            FontRef::Resource(resource) => trace!("Loaded resource font {} as {:?}", resource, id),
        }
        Ok(id)
    }

    fn unload_font(&mut self, font: FontId) {
        self.fonts.remove(&font);
    }

    fn create_text_layer(
        &mut self,
        frame: Rect,
        style: &TextStyle,
        font: FontId,
    ) -> Result<LayerId, UiError> {
        if !self.fonts.contains_key(&font) {
            return Err(UiError::FontUnavailable);
        }
        let id = LayerId(self.allocate()?);
        self.layers.insert(
            id,
            Layer {
                frame,
                content: Content::Text {
                    text: String::new(),
                    style: *style,
                },
            },
        );
        self.changed = true;
        Ok(id)
    }

    fn create_bar_layer(&mut self, frame: Rect) -> Result<LayerId, UiError> {
        let id = LayerId(self.allocate()?);
        self.layers.insert(
            id,
            Layer {
                frame,
                content: Content::Bar {
                    fill_width: 0,
                    color: Color::Black,
                },
            },
        );
        self.changed = true;
        Ok(id)
    }

    fn destroy_layer(&mut self, layer: LayerId) {
        if self.layers.remove(&layer).is_some() {
            self.changed = true;
        }
    }

    fn set_text(&mut self, layer: LayerId, new_text: &str) -> Result<(), UiError> {
        match self.layers.get_mut(&layer).map(|l| &mut l.content) {
            Some(Content::Text { text, .. }) => {
                if text.as_str() != new_text {
                    trace!("Layer {:?} text {:?}", layer, new_text);
                    *text = new_text.to_string();
                    self.changed = true;
                }
                Ok(())
            }
            _ => Err(UiError::InvalidLayer),
        }
    }

    fn set_bar(&mut self, layer: LayerId, width: u16, new_color: Color) -> Result<(), UiError> {
        match self.layers.get_mut(&layer).map(|l| &mut l.content) {
            Some(Content::Bar { fill_width, color }) => {
                *fill_width = width;
                *color = new_color;
                Ok(())
            }
            _ => Err(UiError::InvalidLayer),
        }
    }

    fn mark_dirty(&mut self, _layer: LayerId) {
        self.changed = true;
    }
}
