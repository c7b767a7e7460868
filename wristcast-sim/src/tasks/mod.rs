//! Embassy async tasks
//!
//! Each task stands in for one host service and feeds the controller through
//! the event channel.

pub mod battery;
pub mod companion;
pub mod controller;
pub mod tick;

pub use battery::battery_task;
pub use companion::companion_task;
pub use controller::{controller_task, SimController};
pub use tick::tick_task;
