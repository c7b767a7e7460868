//! Simulated watch OS services
//!
//! Desktop implementations of the host traits the watchface depends on.

pub mod battery;
pub mod clock;
pub mod outbox;
pub mod store;
pub mod toolkit;

pub use battery::SimBattery;
pub use clock::{SimClock, SimSettings};
pub use outbox::{CompanionRequest, QueueOutbox};
pub use store::{FileStore, MemoryStore, SimStore};
pub use toolkit::ConsoleToolkit;
