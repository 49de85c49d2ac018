//! Digit-select table for multiplexed displays
//!
//! Maps each logical digit position to the byte that, shifted into the
//! digit-select register, lights exactly that digit.

use crate::buffer::MAX_DISPLAY_SIZE;
use crate::config::Polarity;
use crate::encoding::DIGIT_SELECT;

/// Polarity-adjusted digit-select codes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitSelectTable {
    codes: [u8; MAX_DISPLAY_SIZE],
    /// Code that selects no digit
    inert: u8,
}

impl DigitSelectTable {
    /// Build the table from physical indexes, one per logical position
    ///
    /// Indexes outside `0..MAX_DISPLAY_SIZE`, and positions without an
    /// index, get the inert code.
    pub fn new(indexes: &[i8], polarity: Polarity) -> Self {
        let inert = polarity.select(0);
        let mut codes = [inert; MAX_DISPLAY_SIZE];

        for (code, &index) in codes.iter_mut().zip(indexes) {
            match usize::try_from(index).ok().and_then(|i| DIGIT_SELECT.get(i)) {
                Some(&select) => *code = polarity.select(select),
                None => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("digit index {} out of range, digit disabled", index);
                }
            }
        }

        Self { codes, inert }
    }

    /// Logical position `i` drives physical digit `i`
    pub fn identity(polarity: Polarity) -> Self {
        let mut indexes = [0i8; MAX_DISPLAY_SIZE];
        for (i, index) in indexes.iter_mut().enumerate() {
            *index = i as i8;
        }
        Self::new(&indexes, polarity)
    }

    /// Code for a logical position (inert when out of range)
    pub fn code(&self, position: usize) -> u8 {
        self.codes.get(position).copied().unwrap_or(self.inert)
    }

    /// Code that selects no digit
    pub const fn inert(&self) -> u8 {
        self.inert
    }
}
