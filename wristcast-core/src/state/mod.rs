//! Watchface lifecycle and the events that drive it
//!
//! Every host callback is turned into an [`Event`] and handed to a single
//! consumer in arrival order. The lifecycle is a small explicit machine:
//! display work only happens while the main window is loaded.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::Lifecycle;
