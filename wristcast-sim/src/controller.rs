//! Watchface controller
//!
//! The controller is the single owner of all watchface state:
//! - Applies events in arrival order
//! - Keeps the clock, weather and battery buffers current
//! - Asks the companion for weather on refresh ticks
//! - Saves and restores the composed weather lines
//! - Pushes text into the window's layers while it is loaded

use chrono::{NaiveDateTime, Timelike};
use heapless::Vec;
use log::{debug, error, info, warn};

use wristcast_core::battery::BatteryIndicator;
use wristcast_core::clock::ClockFormatter;
use wristcast_core::config::WatchfaceConfig;
use wristcast_core::persist::Persistence;
use wristcast_core::scheduler::RefreshScheduler;
use wristcast_core::state::{Event, Lifecycle};
use wristcast_core::weather::{Readings, Rejection, WeatherDecoder};
use wristcast_display::{MainWindow, UiError, UiToolkit, WindowOptions};
use wristcast_hal::{BatteryChargeState, ClockSettings, Outbox, OutboxHandle, PersistStorage};
use wristcast_protocol::Dictionary;

/// Outbound sends awaiting a sent/failed report
const MAX_PENDING: usize = 8;

/// Message counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub received: u32,
    pub dropped: u32,
    pub sent: u32,
    pub failed: u32,
    /// Requests the outbox refused to queue
    pub rejected: u32,
}

/// Controller coordinating the watchface
pub struct Controller<S: PersistStorage, O: Outbox, U: UiToolkit, C: ClockSettings> {
    config: WatchfaceConfig,
    lifecycle: Lifecycle,
    window: MainWindow,
    ui: U,
    clock: ClockFormatter,
    scheduler: RefreshScheduler,
    decoder: WeatherDecoder,
    readings: Readings,
    battery: BatteryIndicator,
    persistence: Persistence<S>,
    outbox: O,
    settings: C,
    pending: Vec<OutboxHandle, MAX_PENDING>,
    stats: Stats,
}

impl<S, O, U, C> Controller<S, O, U, C>
where
    S: PersistStorage,
    O: Outbox,
    U: UiToolkit,
    C: ClockSettings,
{
    pub fn new(config: WatchfaceConfig, storage: S, outbox: O, ui: U, settings: C) -> Self {
        Self {
            lifecycle: Lifecycle::default(),
            window: MainWindow::new(WindowOptions {
                show_date: config.clock.show_date,
                show_battery: config.battery.show_bar,
            }),
            ui,
            clock: ClockFormatter::new(config.clock.show_date),
            scheduler: RefreshScheduler::new(config.weather.refresh_interval_min),
            decoder: WeatherDecoder::new(config.weather.fragment_policy),
            readings: Readings::default(),
            battery: BatteryIndicator::new(config.battery.track_width),
            persistence: Persistence::new(storage),
            outbox,
            settings,
            pending: Vec::new(),
            stats: Stats::default(),
            config,
        }
    }

    /// Startup sequence
    ///
    /// Loads the window, shows the current time, restores the last weather
    /// lines and shows the battery state peeked from the host.
    pub fn start(&mut self, now: NaiveDateTime, battery: BatteryChargeState) {
        self.handle(Event::WindowLoad);
        self.update_clock(&now);
        self.rehydrate();
        self.handle(Event::BatteryChanged(battery));
        info!("Watchface started");
    }

    /// Final unload
    pub fn stop(&mut self) {
        self.handle(Event::WindowUnload);
        info!(
            "Watchface stopped: {} ticks, {} replies, {} sends ok, {} failed",
            self.scheduler.ticks(),
            self.stats.received,
            self.stats.sent,
            self.stats.failed
        );
    }

    /// Process one event
    pub fn handle(&mut self, event: Event) {
        debug!("Event: {}", event.name());

        match event {
            Event::WindowLoad => self.load_window(),
            Event::WindowUnload => {
                if self.lifecycle.has_layers() {
                    self.window.unload(&mut self.ui);
                }
                self.lifecycle = self.lifecycle.transition(&Event::WindowUnload);
            }
            Event::Tick(now) => {
                let outcome = self.scheduler.on_tick(now.minute());
                if outcome.update_clock {
                    self.update_clock(&now);
                }
                if outcome.request_weather {
                    self.request_weather();
                }
            }
            Event::InboxReceived(message) => self.on_inbox(&message),
            Event::InboxDropped(reason) => {
                self.stats.dropped += 1;
                error!("Message dropped: {:?} ({})", reason, reason.code());
            }
            Event::OutboxSent(handle) => {
                self.stats.sent += 1;
                self.complete(handle);
                info!("Outbox send succeeded");
            }
            Event::OutboxFailed(handle, reason) => {
                self.stats.failed += 1;
                self.complete(handle);
                error!("Outbox send failed: {:?} ({})", reason, reason.code());
            }
            Event::BatteryChanged(state) => {
                self.battery.update(state);
                self.show_battery();
            }
        }
    }

    fn load_window(&mut self) {
        if self.lifecycle.has_layers() {
            return;
        }
        if let Err(e) = self.window.load(&mut self.ui) {
            error!("Window load failed: {:?}", e);
            return;
        }
        self.lifecycle = self.lifecycle.transition(&Event::WindowLoad);

        // A reloaded window starts from placeholders; show what we have
        self.show_clock();
        self.show_readings();
        self.show_battery();
    }

    fn update_clock(&mut self, now: &NaiveDateTime) {
        let style = self.config.clock.style.resolve(self.settings.is_24h_style());
        self.clock.update(now, style);
        self.show_clock();
    }

    fn rehydrate(&mut self) {
        match self.persistence.restore() {
            Ok((readings, found)) => {
                debug!("Restored {} persisted lines", found);
                self.readings = readings;
                self.show_readings();
            }
            Err(e) => warn!("Could not restore weather: {:?}", e),
        }
    }

    fn request_weather(&mut self) {
        match self.outbox.submit(&Dictionary::new()) {
            Ok(handle) => {
                if self.pending.is_full() {
                    let oldest = self.pending.remove(0);
                    warn!("No report for outbound message #{}", oldest.id());
                }
                let _ = self.pending.push(handle);
                debug!("Weather requested (#{})", handle.id());
            }
            Err(reason) => {
                self.stats.rejected += 1;
                warn!("Weather request not queued: {:?}", reason);
            }
        }
    }

    fn complete(&mut self, handle: OutboxHandle) {
        match self.pending.iter().position(|h| *h == handle) {
            Some(index) => {
                self.pending.remove(index);
            }
            None => debug!("Report for unknown outbound message #{}", handle.id()),
        }
    }

    fn on_inbox(&mut self, message: &Dictionary) {
        self.stats.received += 1;
        info!("response received from phone");
        if message.skipped() > 0 {
            warn!("{} pairs could not be read", message.skipped());
        }

        let (readings, report) = self.decoder.decode(message);
        for rejection in report.rejected.iter() {
            match rejection {
                Rejection::UnknownKey(key) => error!("Key {} not recognized!", key),
                Rejection::TypeMismatch { key, found } => {
                    error!("Key {} has unexpected type {:?}", key.to_u32(), found)
                }
            }
        }
        if report.truncated > 0 {
            debug!("{} values truncated to fit", report.truncated);
        }

        self.readings = readings;
        self.show_readings();

        if let Err(e) = self.persistence.save(&self.readings) {
            warn!("Could not persist weather: {:?}", e);
        }
    }

    fn show_clock(&mut self) {
        let time = self.window.set_time(&mut self.ui, self.clock.time());
        report("time", time);
        if let Some(date) = self.clock.date() {
            let date = self.window.set_date(&mut self.ui, date);
            report("date", date);
        }
    }

    fn show_readings(&mut self) {
        let weather = self.window.set_weather(&mut self.ui, &self.readings.weather);
        report("weather", weather);
        let location = self.window.set_location(&mut self.ui, &self.readings.location);
        report("location", location);
    }

    fn show_battery(&mut self) {
        let fill = self.battery.fill_width();
        let result = self
            .window
            .set_battery(&mut self.ui, fill, self.battery.is_charging());
        report("battery", result);
        self.battery.take_dirty();
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    pub fn clock(&self) -> &ClockFormatter {
        &self.clock
    }

    pub fn battery(&self) -> &BatteryIndicator {
        &self.battery
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn pending(&self) -> &[OutboxHandle] {
        &self.pending
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }
}

fn report(layer: &str, result: Result<(), UiError>) {
    if let Err(e) = result {
        error!("Failed to update {} layer: {:?}", layer, e);
    }
}
