//! Display configuration
//!
//! Everything about the wiring that is fixed once the display is built:
//! polarity, scan topology, section layout and the digit-select mapping.

use heapless::Vec;

use crate::buffer::MAX_DISPLAY_SIZE;
use crate::digits::DigitSelectTable;
use crate::layout::Layout;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default dwell per digit for multiplexed scanning (ms)
pub const DEFAULT_DWELL_MS: u16 = 1;

/// Default display size
pub const DEFAULT_DISPLAY_SIZE: u8 = 4;

/// Section sizes kept by [`DisplayConfig`]
///
/// One more than can ever fit, so an overlong list still reaches the
/// layout and is reported as truncated.
pub const MAX_SECTION_ENTRIES: usize = MAX_DISPLAY_SIZE + 1;

/// Which side of the LEDs is shared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// Cathodes shared, segment lit when its line is high
    #[default]
    CommonCathode,
    /// Anodes shared, segment lit when its line is low
    CommonAnode,
}

impl Polarity {
    /// Convert a common-cathode segment pattern to line levels
    pub const fn apply(self, pattern: u8) -> u8 {
        match self {
            Self::CommonCathode => pattern,
            Self::CommonAnode => !pattern,
        }
    }

    /// Line level for a single segment bit
    pub const fn apply_bit(self, on: bool) -> bool {
        match self {
            Self::CommonCathode => on,
            Self::CommonAnode => !on,
        }
    }

    /// Convert a one-hot digit-select code to line levels
    ///
    /// The shared pin of a common-cathode digit has to be pulled low to
    /// select it, so its code is inverted.
    pub const fn select(self, code: u8) -> u8 {
        match self {
            Self::CommonCathode => !code,
            Self::CommonAnode => code,
        }
    }
}

/// How digit positions are wired to the registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Topology {
    /// One register per digit, latched continuously
    #[default]
    Static,
    /// One segment register plus one digit-select register, digits lit
    /// one at a time
    Multiplexed,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// LED polarity
    pub polarity: Polarity,
    /// Static or multiplexed drive
    pub topology: Topology,
    /// Section sizes in display order
    ///
    /// A zero entry ends the list. Sections that would exceed
    /// [`MAX_DISPLAY_SIZE`] in total are dropped.
    pub section_sizes: Vec<u8, MAX_SECTION_ENTRIES>,
    /// Multiplexed only: the segment byte is shifted before the
    /// digit-select byte
    pub swapped: bool,
    /// Multiplexed only: physical digit index of each logical position
    ///
    /// Empty means identity. Negative, out of range or missing entries
    /// select no digit.
    pub digit_indexes: Vec<i8, MAX_DISPLAY_SIZE>,
    /// Multiplexed only: time each digit stays lit per scan (ms, at least 1)
    pub dwell_ms: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(Polarity::default(), Topology::default(), DEFAULT_DISPLAY_SIZE)
    }
}

impl DisplayConfig {
    /// Single-section display of `size` digits
    pub fn new(polarity: Polarity, topology: Topology, size: u8) -> Self {
        let mut section_sizes = Vec::new();
        let _ = section_sizes.push(size);
        Self {
            polarity,
            topology,
            section_sizes,
            swapped: false,
            digit_indexes: Vec::new(),
            dwell_ms: DEFAULT_DWELL_MS,
        }
    }

    /// Static display of `size` digits
    pub fn static_drive(polarity: Polarity, size: u8) -> Self {
        Self::new(polarity, Topology::Static, size)
    }

    /// Multiplexed display of `size` digits
    pub fn multiplexed(polarity: Polarity, size: u8) -> Self {
        Self::new(polarity, Topology::Multiplexed, size)
    }

    /// Replace the layout with several sections
    ///
    /// Sizes are taken up to the first zero entry. Entries past
    /// [`MAX_SECTION_ENTRIES`] are not stored; the layout already reports
    /// the list as truncated by then.
    pub fn with_sections(mut self, sizes: &[u8]) -> Self {
        self.section_sizes.clear();
        for &size in sizes.iter().take_while(|&&size| size > 0) {
            if self.section_sizes.push(size).is_err() {
                break;
            }
        }
        self
    }

    /// Set the order the two registers of a multiplexed display are fed
    pub fn with_swapped(mut self, swapped: bool) -> Self {
        self.swapped = swapped;
        self
    }

    /// Map logical digit positions to physical digit-select indexes
    pub fn with_digit_indexes(mut self, indexes: &[i8]) -> Self {
        self.digit_indexes.clear();
        for &index in indexes.iter().take(MAX_DISPLAY_SIZE) {
            let _ = self.digit_indexes.push(index);
        }
        self
    }

    /// Set the per-digit dwell time of a multiplexed scan
    pub fn with_dwell_ms(mut self, dwell_ms: u16) -> Self {
        self.dwell_ms = dwell_ms;
        self
    }

    /// Dwell time actually used, never zero
    pub fn effective_dwell_ms(&self) -> u16 {
        self.dwell_ms.max(1)
    }

    /// Build the section layout
    pub fn layout(&self) -> Layout {
        Layout::from_sizes(&self.section_sizes)
    }

    /// Build the digit-select table
    pub fn digit_select(&self) -> DigitSelectTable {
        if self.digit_indexes.is_empty() {
            DigitSelectTable::identity(self.polarity)
        } else {
            DigitSelectTable::new(&self.digit_indexes, self.polarity)
        }
    }
}
