//! Character to segment pattern encoding
//!
//! Encoding is a pure per-character lookup; unknown characters render as
//! blank rather than failing.

use crate::encoding::{pattern_for, DOT};

/// Encode `chars` into `output`, setting the decimal point at `dot`
///
/// Only `min(chars.len(), output.len())` positions are encoded. A `dot`
/// index outside `output` is ignored.
pub fn encode_characters(chars: &[u8], output: &mut [u8], dot: Option<usize>) {
    for (slot, &c) in output.iter_mut().zip(chars) {
        *slot = pattern_for(c);
    }

    if let Some(slot) = dot.and_then(|i| output.get_mut(i)) {
        *slot |= DOT;
    }
}

/// Encode `chars` into `output` with one decimal point flag per position
///
/// Positions without a character render blank, positions without a flag
/// have their decimal point off.
pub fn encode_with_dots<I>(chars: I, dots: &[bool], output: &mut [u8])
where
    I: IntoIterator<Item = u8>,
{
    let mut chars = chars.into_iter();
    for (i, slot) in output.iter_mut().enumerate() {
        *slot = pattern_for(chars.next().unwrap_or(b' '));
        if dots.get(i).copied().unwrap_or(false) {
            *slot |= DOT;
        }
    }
}
