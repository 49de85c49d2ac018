//! Error types for the diagnostic API
//!
//! The regular display operations never fail: writes to a section that
//! does not exist, or to a position outside a section, are dropped. The
//! `try_*` variants report why a write was dropped.

/// Reason a buffer write was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Section index is not below the section count
    InvalidSection,
    /// Relative index is outside the section
    InvalidIndex,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidSection => f.write_str("invalid section"),
            Self::InvalidIndex => f.write_str("index outside section"),
        }
    }
}
