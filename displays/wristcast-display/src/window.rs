//! Main watchface window
//!
//! Owns every layer and font acquired on load and releases all of them on
//! unload. Setters are no-ops while the window is not loaded, so events that
//! arrive between unload and the next load do not touch freed layers.

use heapless::Vec;

use crate::layout::{
    battery_color, TextRow, BATTERY_FRAME, DATE_ROW, LOCATION_ROW, TIME_ROW, WEATHER_ROW,
};
use crate::toolkit::{FontId, FontRef, LayerId, UiError, UiToolkit};

/// Most distinct fonts the face uses
const MAX_FONTS: usize = 4;

/// Which optional elements the window creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowOptions {
    pub show_date: bool,
    pub show_battery: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            show_date: true,
            show_battery: true,
        }
    }
}

#[derive(Debug, Default)]
struct Layers {
    date: Option<LayerId>,
    time: Option<LayerId>,
    weather: Option<LayerId>,
    location: Option<LayerId>,
    battery: Option<LayerId>,
}

impl Layers {
    fn take_all(&mut self) -> [Option<LayerId>; 5] {
        [
            self.date.take(),
            self.time.take(),
            self.weather.take(),
            self.location.take(),
            self.battery.take(),
        ]
    }
}

/// The watchface's only window
#[derive(Debug, Default)]
pub struct MainWindow {
    options: WindowOptions,
    layers: Layers,
    fonts: Vec<(FontRef, FontId), MAX_FONTS>,
    loaded: bool,
}

impl MainWindow {
    pub fn new(options: WindowOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn options(&self) -> WindowOptions {
        self.options
    }

    /// Create all layers with their placeholder text
    ///
    /// Loading an already loaded window does nothing. If the toolkit fails
    /// part way, everything acquired so far is released before returning.
    pub fn load<T: UiToolkit>(&mut self, ui: &mut T) -> Result<(), UiError> {
        if self.loaded {
            return Ok(());
        }

        match self.create_layers(ui) {
            Ok(()) => {
                self.loaded = true;
                Ok(())
            }
            Err(e) => {
                self.release(ui);
                Err(e)
            }
        }
    }

    /// Destroy all layers and unload all fonts
    pub fn unload<T: UiToolkit>(&mut self, ui: &mut T) {
        self.release(ui);
        self.loaded = false;
    }

    fn create_layers<T: UiToolkit>(&mut self, ui: &mut T) -> Result<(), UiError> {
        if self.options.show_date {
            self.layers.date = Some(self.create_row(ui, &DATE_ROW)?);
        }
        self.layers.time = Some(self.create_row(ui, &TIME_ROW)?);
        self.layers.weather = Some(self.create_row(ui, &WEATHER_ROW)?);
        self.layers.location = Some(self.create_row(ui, &LOCATION_ROW)?);
        if self.options.show_battery {
            self.layers.battery = Some(ui.create_bar_layer(BATTERY_FRAME)?);
        }
        Ok(())
    }

    fn create_row<T: UiToolkit>(&mut self, ui: &mut T, row: &TextRow) -> Result<LayerId, UiError> {
        let font = self.font(ui, row.style.font)?;
        let layer = ui.create_text_layer(row.frame, &row.style, font)?;
        if let Err(e) = ui.set_text(layer, row.placeholder) {
            ui.destroy_layer(layer);
            return Err(e);
        }
        Ok(layer)
    }

    /// Load a font once per window lifetime
    fn font<T: UiToolkit>(&mut self, ui: &mut T, font: FontRef) -> Result<FontId, UiError> {
        if let Some((_, id)) = self.fonts.iter().find(|(r, _)| *r == font) {
            return Ok(*id);
        }
        let id = ui.load_font(font)?;
        if self.fonts.push((font, id)).is_err() {
            ui.unload_font(id);
            return Err(UiError::OutOfMemory);
        }
        Ok(id)
    }

    fn release<T: UiToolkit>(&mut self, ui: &mut T) {
        for layer in self.layers.take_all().into_iter().flatten() {
            ui.destroy_layer(layer);
        }
        while let Some((_, font)) = self.fonts.pop() {
            ui.unload_font(font);
        }
    }

    fn set<T: UiToolkit>(ui: &mut T, layer: Option<LayerId>, text: &str) -> Result<(), UiError> {
        match layer {
            Some(layer) => ui.set_text(layer, text),
            None => Ok(()),
        }
    }

    pub fn set_time<T: UiToolkit>(&self, ui: &mut T, text: &str) -> Result<(), UiError> {
        Self::set(ui, self.layers.time, text)
    }

    pub fn set_date<T: UiToolkit>(&self, ui: &mut T, text: &str) -> Result<(), UiError> {
        Self::set(ui, self.layers.date, text)
    }

    pub fn set_weather<T: UiToolkit>(&self, ui: &mut T, text: &str) -> Result<(), UiError> {
        Self::set(ui, self.layers.weather, text)
    }

    pub fn set_location<T: UiToolkit>(&self, ui: &mut T, text: &str) -> Result<(), UiError> {
        Self::set(ui, self.layers.location, text)
    }

    /// Resize the battery bar and schedule its redraw
    pub fn set_battery<T: UiToolkit>(
        &self,
        ui: &mut T,
        fill_width: u16,
        is_charging: bool,
    ) -> Result<(), UiError> {
        if let Some(layer) = self.layers.battery {
            ui.set_bar(layer, fill_width, battery_color(is_charging))?;
            ui.mark_dirty(layer);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::{Color, Rect, TextStyle};
    use std::collections::BTreeMap;
    use std::string::{String, ToString};

    /// Toolkit that tracks live resources
    #[derive(Default)]
    struct CountingToolkit {
        next_id: u16,
        layers: BTreeMap<LayerId, String>,
        bars: BTreeMap<LayerId, (u16, Color)>,
        fonts: BTreeMap<FontId, FontRef>,
        font_loads: usize,
        dirty: usize,
        /// Fail layer creation once this many layers are live
        layer_limit: Option<usize>,
    }

    impl CountingToolkit {
        fn id(&mut self) -> u16 {
            self.next_id += 1;
            self.next_id
        }

        fn live(&self) -> usize {
            self.layers.len() + self.bars.len() + self.fonts.len()
        }

        fn check_limit(&self) -> Result<(), UiError> {
            match self.layer_limit {
                Some(limit) if self.layers.len() + self.bars.len() >= limit => {
                    Err(UiError::OutOfMemory)
                }
                _ => Ok(()),
            }
        }

        fn texts(&self) -> std::vec::Vec<&str> {
            self.layers.values().map(|s| s.as_str()).collect()
        }
    }

    impl UiToolkit for CountingToolkit {
        fn load_font(&mut self, font: FontRef) -> Result<FontId, UiError> {
            let id = FontId(self.id());
            self.fonts.insert(id, font);
            self.font_loads += 1;
            Ok(id)
        }

        fn unload_font(&mut self, font: FontId) {
            assert!(self.fonts.remove(&font).is_some(), "double font unload");
        }

        fn create_text_layer(
            &mut self,
            _frame: Rect,
            _style: &TextStyle,
            font: FontId,
        ) -> Result<LayerId, UiError> {
            assert!(self.fonts.contains_key(&font));
            self.check_limit()?;
            let id = LayerId(self.id());
            self.layers.insert(id, String::new());
            Ok(id)
        }

        fn create_bar_layer(&mut self, _frame: Rect) -> Result<LayerId, UiError> {
            self.check_limit()?;
            let id = LayerId(self.id());
            self.bars.insert(id, (0, Color::Black));
            Ok(id)
        }

        fn destroy_layer(&mut self, layer: LayerId) {
            let removed = self.layers.remove(&layer).is_some() || self.bars.remove(&layer).is_some();
            assert!(removed, "double layer destroy");
        }

        fn set_text(&mut self, layer: LayerId, text: &str) -> Result<(), UiError> {
            let slot = self.layers.get_mut(&layer).ok_or(UiError::InvalidLayer)?;
            *slot = text.to_string();
            Ok(())
        }

        fn set_bar(&mut self, layer: LayerId, fill_width: u16, color: Color) -> Result<(), UiError> {
            let slot = self.bars.get_mut(&layer).ok_or(UiError::InvalidLayer)?;
            *slot = (fill_width, color);
            Ok(())
        }

        fn mark_dirty(&mut self, _layer: LayerId) {
            self.dirty += 1;
        }
    }

    #[test]
    fn test_load_creates_placeholders() {
        let mut ui = CountingToolkit::default();
        let mut window = MainWindow::new(WindowOptions::default());
        window.load(&mut ui).unwrap();

        assert!(window.is_loaded());
        assert_eq!(ui.layers.len(), 4);
        assert_eq!(ui.bars.len(), 1);
        // Gothic 24 is shared by weather and location
        assert_eq!(ui.fonts.len(), 3);
        assert_eq!(ui.texts().iter().filter(|t| **t == "00:00").count(), 1);
    }

    #[test]
    fn test_no_leaks_across_cycles() {
        let mut ui = CountingToolkit::default();
        let mut window = MainWindow::new(WindowOptions::default());

        for _ in 0..10 {
            window.load(&mut ui).unwrap();
            window.set_time(&mut ui, "12:34").unwrap();
            window.set_battery(&mut ui, 53, false).unwrap();
            window.unload(&mut ui);
            assert_eq!(ui.live(), 0);
        }
        assert_eq!(ui.font_loads, 30);
    }

    #[test]
    fn test_double_load_is_ignored() {
        let mut ui = CountingToolkit::default();
        let mut window = MainWindow::new(WindowOptions::default());
        window.load(&mut ui).unwrap();
        let live = ui.live();
        window.load(&mut ui).unwrap();
        assert_eq!(ui.live(), live);
        window.unload(&mut ui);
        window.unload(&mut ui);
        assert_eq!(ui.live(), 0);
    }

    #[test]
    fn test_failed_load_releases_everything() {
        let mut ui = CountingToolkit {
            layer_limit: Some(2),
            ..CountingToolkit::default()
        };
        let mut window = MainWindow::new(WindowOptions::default());

        assert_eq!(window.load(&mut ui), Err(UiError::OutOfMemory));
        assert!(!window.is_loaded());
        assert_eq!(ui.live(), 0);
    }

    #[test]
    fn test_optional_elements() {
        let mut ui = CountingToolkit::default();
        let mut window = MainWindow::new(WindowOptions {
            show_date: false,
            show_battery: false,
        });
        window.load(&mut ui).unwrap();
        assert_eq!(ui.layers.len(), 3);
        assert!(ui.bars.is_empty());

        // Setters for missing elements are no-ops
        window.set_date(&mut ui, "Jan 01").unwrap();
        window.set_battery(&mut ui, 10, true).unwrap();
        assert_eq!(ui.dirty, 0);
    }

    #[test]
    fn test_setters_after_unload_are_noops() {
        let mut ui = CountingToolkit::default();
        let mut window = MainWindow::new(WindowOptions::default());
        window.load(&mut ui).unwrap();
        window.unload(&mut ui);

        assert_eq!(window.set_weather(&mut ui, "72°F, Cloudy"), Ok(()));
        assert_eq!(window.set_battery(&mut ui, 53, false), Ok(()));
    }

    #[test]
    fn test_battery_bar_color() {
        let mut ui = CountingToolkit::default();
        let mut window = MainWindow::new(WindowOptions::default());
        window.load(&mut ui).unwrap();

        window.set_battery(&mut ui, 53, true).unwrap();
        assert_eq!(ui.bars.values().next(), Some(&(53, Color::Gray)));
        window.set_battery(&mut ui, 60, false).unwrap();
        assert_eq!(ui.bars.values().next(), Some(&(60, Color::Black)));
        assert_eq!(ui.dirty, 2);
    }

    #[test]
    fn test_text_reaches_layers() {
        let mut ui = CountingToolkit::default();
        let mut window = MainWindow::new(WindowOptions::default());
        window.load(&mut ui).unwrap();
        window.set_weather(&mut ui, "72°F, Cloudy").unwrap();
        window.set_location(&mut ui, "41.878, -87.629").unwrap();

        let texts = ui.texts();
        assert!(texts.contains(&"72°F, Cloudy"));
        assert!(texts.contains(&"41.878, -87.629"));
    }
}
