//! Main controller task
//!
//! Drains the event channel into the controller, one event at a time, and
//! prints the face whenever it changed.

use log::info;

use wristcast_core::state::Event;

use crate::channels::{EVENT_CHANNEL, SHUTDOWN};
use crate::controller::Controller;
use crate::host::{ConsoleToolkit, QueueOutbox, SimSettings, SimStore};

/// Controller wired to the simulated host
pub type SimController = Controller<SimStore, QueueOutbox<'static>, ConsoleToolkit, SimSettings>;

fn present(controller: &mut SimController) {
    if controller.ui_mut().take_changed() {
        info!("\n{}", controller.ui().render());
    }
}

/// Controller task - main event loop
#[embassy_executor::task]
pub async fn controller_task(mut controller: SimController) {
    info!("Controller task started");
    present(&mut controller);

    loop {
        let event = EVENT_CHANNEL.receive().await;
        let last = matches!(event, Event::WindowUnload) && SHUTDOWN.signaled();

        if last {
            controller.stop();
            break;
        }

        controller.handle(event);
        present(&mut controller);
    }

    std::process::exit(0);
}
