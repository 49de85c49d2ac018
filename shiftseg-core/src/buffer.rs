//! Display buffer
//!
//! Holds one segment pattern per digit position. Patterns are stored
//! already adjusted for the display polarity, so whatever reads the
//! buffer can shift it out as-is.

use crate::config::Polarity;
use crate::encoding::{DOT_BIT, EMPTY};

/// Most digit positions one display supports
pub const MAX_DISPLAY_SIZE: usize = 8;

/// Fixed-capacity, polarity-adjusted pattern store
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    /// Stored patterns, only the first `len` are in use
    cells: [u8; MAX_DISPLAY_SIZE],
    /// Active display size
    len: usize,
    /// Applied to every pattern on write
    polarity: Polarity,
}

impl DisplayBuffer {
    /// Create a buffer of `len` positions, all segments off
    ///
    /// `len` is capped at [`MAX_DISPLAY_SIZE`].
    pub fn new(len: usize, polarity: Polarity) -> Self {
        let mut buffer = Self {
            cells: [0; MAX_DISPLAY_SIZE],
            len: len.min(MAX_DISPLAY_SIZE),
            polarity,
        };
        buffer.clear_pattern();
        buffer
    }

    /// Number of digit positions
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer has no positions
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Polarity applied on write
    pub const fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Copy `patterns` into the buffer starting at `offset`
    ///
    /// Patterns past the end of the buffer are skipped.
    pub fn write(&mut self, offset: usize, patterns: &[u8]) {
        let polarity = self.polarity;
        let cells = self.cells_mut().iter_mut().skip(offset);
        for (cell, &pattern) in cells.zip(patterns) {
            *cell = polarity.apply(pattern);
        }
    }

    /// Overwrite the pattern of one position
    pub fn write_one(&mut self, index: usize, pattern: u8) {
        let polarity = self.polarity;
        if let Some(cell) = self.cells_mut().get_mut(index) {
            *cell = polarity.apply(pattern);
        }
    }

    /// Turn the decimal point of one position on or off
    ///
    /// The other segments are left untouched.
    pub fn write_dot(&mut self, index: usize, on: bool) {
        let bit = self.polarity.apply_bit(on);
        if let Some(cell) = self.cells_mut().get_mut(index) {
            if bit {
                *cell |= 1 << DOT_BIT;
            } else {
                *cell &= !(1 << DOT_BIT);
            }
        }
    }

    /// Turn every segment of every position off
    pub fn clear_pattern(&mut self) {
        let empty = self.polarity.apply(EMPTY);
        self.cells_mut().fill(empty);
    }

    /// Stored (polarity-adjusted) pattern of one position
    pub fn get(&self, index: usize) -> Option<u8> {
        self.as_slice().get(index).copied()
    }

    /// All stored patterns, first position first
    pub fn as_slice(&self) -> &[u8] {
        &self.cells[..self.len]
    }

    fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells[..self.len]
    }
}
