//! Simulator configuration
//!
//! The watchface sections (`[clock]`, `[weather]`, `[battery]`) map onto
//! [`WatchfaceConfig`]; `[sim]` and `[companion]` drive the simulated host
//! and phone. Without `--config` the embedded `wristcast.toml` is used.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use clap::Parser;
use serde::Deserialize;
use wristcast_core::config::WatchfaceConfig;

use crate::error::{Result, SimError};

/// Default configuration compiled into the binary
pub const EMBEDDED_CONFIG: &str = include_str!("../wristcast.toml");

/// Command line
#[derive(Debug, Default, Parser)]
#[command(name = "wristcast-sim", version, about = "Run the Wristcast watchface in a terminal")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Persistence file, overrides [sim].state_file
    #[arg(long, value_name = "FILE")]
    pub state_file: Option<PathBuf>,

    /// Keep persisted values in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Follow the real wall clock instead of accelerated minutes
    #[arg(long)]
    pub realtime: bool,

    /// Stop after this many minute ticks
    #[arg(long, value_name = "N")]
    pub minutes: Option<u32>,
}

/// `[sim]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimSection {
    /// Advance one minute per `tick_period_ms`
    pub accelerated: bool,
    pub tick_period_ms: u64,
    /// First simulated minute, local time (accelerated mode only)
    pub start_time: Option<String>,
    /// Host 12h/24h preference
    pub is_24h: bool,
    pub battery_percent: u8,
    /// Lose one percent every N minutes (0 = never)
    pub battery_drain_every_min: u32,
    pub run_minutes: Option<u32>,
    pub state_file: Option<PathBuf>,
}

impl Default for SimSection {
    fn default() -> Self {
        Self {
            accelerated: true,
            tick_period_ms: 1000,
            start_time: None,
            is_24h: true,
            battery_percent: 100,
            battery_drain_every_min: 0,
            run_minutes: None,
            state_file: None,
        }
    }
}

/// `[companion]` section: the canned reply of the simulated phone
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompanionSection {
    pub temperature: i32,
    pub conditions: String,
    pub latitude: String,
    pub longitude: String,
    pub response_delay_ms: u64,
    /// Push one reply as soon as the app starts
    pub answer_on_ready: bool,
    /// Report every Nth outbound send as failed (0 = never)
    pub fail_every: u32,
}

impl Default for CompanionSection {
    fn default() -> Self {
        Self {
            temperature: 72,
            conditions: "Cloudy".into(),
            latitude: "41.878113".into(),
            longitude: "-87.629799".into(),
            response_delay_ms: 200,
            answer_on_ready: true,
            fail_every: 0,
        }
    }
}

/// Complete simulator configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    #[serde(flatten)]
    pub watchface: WatchfaceConfig,
    pub sim: SimSection,
    pub companion: CompanionSection,
}

impl SimConfig {
    /// Parse and validate TOML text
    pub fn parse(text: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or the embedded configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::parse(&text)
            }
            None => Self::parse(EMBEDDED_CONFIG),
        }
    }

    /// Apply command-line overrides
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.state_file {
            self.sim.state_file = Some(path.clone());
        }
        if cli.ephemeral {
            self.sim.state_file = None;
        }
        if cli.realtime {
            self.sim.accelerated = false;
        }
        if let Some(minutes) = cli.minutes {
            self.sim.run_minutes = Some(minutes);
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.watchface.validate()?;
        if self.sim.tick_period_ms == 0 {
            return Err(SimError::Setting("sim.tick_period_ms must be positive"));
        }
        if self.sim.battery_percent > 100 {
            return Err(SimError::Setting("sim.battery_percent must be 0-100"));
        }
        self.start_time()?;
        Ok(())
    }

    /// Parsed `[sim].start_time`
    pub fn start_time(&self) -> Result<Option<NaiveDateTime>> {
        self.sim
            .start_time
            .as_deref()
            .map(|s| {
                s.parse::<NaiveDateTime>()
                    .map_err(|_| SimError::StartTime(s.to_string()))
            })
            .transpose()
    }
}
