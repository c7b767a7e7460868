//! Watchface window on top of a host UI toolkit
//!
//! This crate provides:
//! - `UiToolkit` trait for the host's layer and font services
//! - The watchface layout (frames, fonts, colors) for a 144x168 screen
//! - `MainWindow`, which owns every layer and font for one load/unload cycle
//!
//! # Architecture
//!
//! Compositing, font rasterization and drawing are done by the host. The
//! window only creates layers on load, pushes text and bar widths into them,
//! and releases everything it acquired on unload.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod layout;
pub mod toolkit;
pub mod window;

// Re-export key types
pub use layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
pub use toolkit::{
    Color, FontId, FontRef, LayerId, Rect, SystemFont, TextAlign, TextStyle, UiError, UiToolkit,
};
pub use window::{MainWindow, WindowOptions};
