//! Board-agnostic core logic for shift-register 7-segment displays
//!
//! This crate contains everything that does not touch hardware:
//!
//! - Segment encoding tables
//! - Number and text formatting (alignment, padding, decimal point)
//! - Character to segment encoding
//! - The polarity-adjusted display buffer and its section layout
//! - Digit-select tables for multiplexed wiring
//! - Configuration type definitions
//!
//! Data flows value → [`format`] → [`encoder`] → [`buffer`]; the
//! [`render`] module runs the first two steps for one section.
//!
//! Nothing in this crate fails at runtime. Values wider than their
//! section are clipped, invalid characters render blank and oversized
//! layouts are truncated. This keeps the display running, at the cost of
//! silently losing data; [`Layout::is_truncated`] and the
//! [`DisplayError`] values returned by the drivers' `try_*` methods make
//! those losses visible when needed.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod buffer;
pub mod config;
pub mod digits;
pub mod encoder;
pub mod encoding;
pub mod error;
pub mod format;
pub mod layout;
pub mod render;

pub use buffer::{DisplayBuffer, MAX_DISPLAY_SIZE};
pub use config::{DisplayConfig, Polarity, Topology};
pub use digits::DigitSelectTable;
pub use error::DisplayError;
pub use format::Alignment;
pub use layout::{Layout, Section};
pub use render::{render, SetOptions, Value};
