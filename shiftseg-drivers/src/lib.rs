//! Display drivers
//!
//! This crate puts the shiftseg-core pieces on real output lines:
//!
//! - [`scan`] - Static and multiplexed scanning through a shift register
//! - [`display`] - The display controller: sections, value writes, timed
//!   show and scrolling
//! - [`embedded`] - Adapters for `embedded-hal` 1.0 pins and delays
//!
//! # Example
//!
//! ```ignore
//! let lines = embedded_lines(data_pin, clock_pin, latch_pin);
//! let clock = EmbeddedClock::new(delay, || timer.millis());
//! let config = DisplayConfig::multiplexed(Polarity::CommonAnode, 4).with_sections(&[2, 2]);
//!
//! let mut display = ShiftDisplay::new(lines, clock, &config);
//! display.set_at(0, 12, SetOptions::new().aligned(Alignment::Right));
//! display.set_at(1, 34, SetOptions::new().zero_padded(true));
//! display.show(1000);
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod mock;

pub mod display;
pub mod embedded;
pub mod scan;

pub use display::ShiftDisplay;
pub use embedded::{embedded_lines, EmbeddedClock, EmbeddedLines, EmbeddedPin};
pub use scan::ScanDriver;
