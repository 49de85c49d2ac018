//! Section layout
//!
//! A display is split into sections: consecutive, non-overlapping runs
//! of digit positions that are written independently (a clock might use
//! one section for hours and one for minutes). The layout is computed
//! once from the configured section sizes.

use heapless::Vec;

use crate::buffer::MAX_DISPLAY_SIZE;
use crate::error::DisplayError;

/// A contiguous run of digit positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Section {
    /// Absolute position of the first digit
    pub begin: usize,
    /// Number of digits
    pub size: usize,
}

impl Section {
    /// Absolute position of `relative_index`, if it lies in the section
    pub fn absolute(&self, relative_index: usize) -> Result<usize, DisplayError> {
        if relative_index < self.size {
            Ok(self.begin + relative_index)
        } else {
            Err(DisplayError::InvalidIndex)
        }
    }

    /// One past the last position
    pub const fn end(&self) -> usize {
        self.begin + self.size
    }
}

/// Ordered sections of a display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    sections: Vec<Section, MAX_DISPLAY_SIZE>,
    /// Sum of all section sizes
    display_size: usize,
    /// A section was dropped for exceeding the capacity
    truncated: bool,
}

impl Layout {
    /// Build a layout from section sizes
    ///
    /// Sizes are consumed up to the first zero. A section that would push
    /// the total past [`MAX_DISPLAY_SIZE`] ends the layout; it and every
    /// section after it are dropped. Section 0 always exists, as an empty
    /// section if nothing else fits.
    pub fn from_sizes(sizes: &[u8]) -> Self {
        let mut sections = Vec::new();
        let mut display_size = 0;
        let mut truncated = false;

        for &size in sizes.iter().take_while(|&&size| size > 0) {
            let size = usize::from(size);
            if display_size + size > MAX_DISPLAY_SIZE || sections.is_full() {
                truncated = true;
                break;
            }
            let _ = sections.push(Section {
                begin: display_size,
                size,
            });
            display_size += size;
        }

        if sections.is_empty() {
            let _ = sections.push(Section { begin: 0, size: 0 });
        }

        #[cfg(feature = "defmt")]
        if truncated {
            defmt::warn!(
                "section layout truncated to {} sections, {} digits",
                sections.len(),
                display_size
            );
        }

        Self {
            sections,
            display_size,
            truncated,
        }
    }

    /// One section spanning `size` digits
    pub fn single(size: u8) -> Self {
        Self::from_sizes(&[size])
    }

    /// Section by index
    pub fn section(&self, index: usize) -> Result<Section, DisplayError> {
        self.sections
            .get(index)
            .copied()
            .ok_or(DisplayError::InvalidSection)
    }

    /// All sections in display order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of digit positions
    pub const fn display_size(&self) -> usize {
        self.display_size
    }

    /// Check if configured sections were dropped
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }
}
