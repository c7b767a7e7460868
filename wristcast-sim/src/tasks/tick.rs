//! Minute tick task
//!
//! Emits one tick per minute, either on real minute boundaries or, in
//! accelerated mode, one simulated minute per tick period.

use chrono::{Local, Timelike};
use embassy_time::{Duration, Ticker, Timer};
use log::info;

use wristcast_core::state::Event;
use wristcast_hal::WallClock;

use crate::channels::{EVENT_CHANNEL, SHUTDOWN};
use crate::host::SimClock;

/// Tick task - sends a tick event for every elapsed minute
#[embassy_executor::task]
pub async fn tick_task(clock: SimClock, period_ms: u64, run_minutes: Option<u32>) {
    info!(
        "Tick task started ({})",
        if clock.is_accelerated() { "accelerated" } else { "realtime" }
    );

    let mut ticker = Ticker::every(Duration::from_millis(period_ms));
    let mut ticks = 0u32;

    loop {
        if run_minutes.is_some_and(|limit| ticks >= limit) {
            break;
        }

        let now = if clock.is_accelerated() {
            ticker.next().await;
            clock.advance()
        } else {
            // Sleep to the next minute boundary
            let second = Local::now().second() as u64;
            Timer::after(Duration::from_secs(60 - second.min(59))).await;
            clock.now()
        };

        ticks += 1;
        EVENT_CHANNEL.send(Event::Tick(now)).await;
    }

    info!("Tick task finished after {} minutes", ticks);
    SHUTDOWN.signal(());
    EVENT_CHANNEL.send(Event::WindowUnload).await;
}
