//! shiftseg Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the display logic is
//! written against. Chip HALs (or the `embedded-hal` adapters in
//! `shiftseg-drivers`) implement them, so the same display code runs on any
//! board with three free output lines.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ShiftDisplay (shiftseg-drivers)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  shiftseg-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  chip HAL /   │
//! │   adapters    │       │  test mocks   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output line
//! - [`shift::ShiftRegister`] - Latch and serial byte transfer
//! - [`time::Clock`] - Millisecond time base and busy-wait

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod shift;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use shift::{shift_out, BitOrder, ShiftLines, ShiftRegister};
pub use time::Clock;
