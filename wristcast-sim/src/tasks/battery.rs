//! Battery task
//!
//! Drains the simulated battery and reports every change.

use embassy_time::{Duration, Ticker};
use log::{debug, info};

use wristcast_core::state::Event;

use crate::channels::EVENT_CHANNEL;
use crate::host::SimBattery;

/// Battery task - one step every `every_min` minutes
#[embassy_executor::task]
pub async fn battery_task(battery: &'static SimBattery, minute_ms: u64, every_min: u32) {
    if every_min == 0 {
        info!("Battery drain disabled");
        return;
    }

    let mut ticker = Ticker::every(Duration::from_millis(minute_ms * every_min as u64));
    loop {
        ticker.next().await;
        let state = battery.step();
        debug!(
            "Battery {}%{}",
            state.charge_percent,
            if state.is_charging { " (charging)" } else { "" }
        );
        EVENT_CHANNEL.send(Event::BatteryChanged(state)).await;
    }
}
