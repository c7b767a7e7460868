//! Wristcast - weather watchface simulator
//!
//! Hosts the watchface on the desktop. Embassy tasks stand in for the watch
//! OS services (minute ticks, battery, phone link) and a single controller
//! task consumes their events in order.

use clap::Parser;
use embassy_executor::Spawner;
use log::{error, info};
use static_cell::StaticCell;

use wristcast_hal::{BatteryChargeState, BatteryService, WallClock};

use crate::channels::COMPANION_CHANNEL;
use crate::config::{Cli, CompanionSection, SimConfig};
use crate::controller::Controller;
use crate::error::Result;
use crate::host::{
    ConsoleToolkit, FileStore, MemoryStore, QueueOutbox, SimBattery, SimClock, SimSettings,
    SimStore,
};

mod channels;
mod config;
mod controller;
mod error;
mod host;
mod tasks;

/// Milliseconds in a real minute
const REAL_MINUTE_MS: u64 = 60_000;

static COMPANION: StaticCell<CompanionSection> = StaticCell::new();
static BATTERY: StaticCell<SimBattery> = StaticCell::new();

fn load_config() -> Result<SimConfig> {
    let cli = Cli::parse();
    let mut config = SimConfig::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    config.validate()?;
    Ok(config)
}

fn open_store(config: &SimConfig) -> Result<SimStore> {
    Ok(match &config.sim.state_file {
        Some(path) => {
            info!("Persisting to {}", path.display());
            SimStore::File(FileStore::open(path)?)
        }
        None => SimStore::Memory(MemoryStore::new()),
    })
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Wristcast simulator starting...");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    let store = match open_store(&config) {
        Ok(store) => store,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    // Time source
    let clock = if config.sim.accelerated {
        let start = config
            .start_time()
            .ok()
            .flatten()
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        SimClock::accelerated(start)
    } else {
        SimClock::realtime()
    };
    let minute_ms = if config.sim.accelerated {
        config.sim.tick_period_ms
    } else {
        REAL_MINUTE_MS
    };

    let battery: &'static SimBattery = BATTERY.init(SimBattery::new(BatteryChargeState::new(
        config.sim.battery_percent,
        false,
    )));

    let mut controller = Controller::new(
        config.watchface,
        store,
        QueueOutbox::new(COMPANION_CHANNEL.sender()),
        ConsoleToolkit::new(),
        SimSettings {
            is_24h: config.sim.is_24h,
        },
    );
    controller.start(clock.now(), battery.peek());
    info!("Configuration loaded");

    let companion: &'static CompanionSection = COMPANION.init(config.companion.clone());

    spawner.spawn(tasks::controller_task(controller)).unwrap();
    spawner.spawn(tasks::companion_task(companion)).unwrap();
    spawner
        .spawn(tasks::battery_task(battery, minute_ms, config.sim.battery_drain_every_min))
        .unwrap();
    spawner
        .spawn(tasks::tick_task(clock, minute_ms, config.sim.run_minutes))
        .unwrap();

    info!("All tasks spawned");
}
