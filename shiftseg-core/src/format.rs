//! Character formatting
//!
//! Turns a source character sequence into a fixed-width, padded sequence
//! for one display section, and converts numbers into their decimal
//! characters. Nothing here fails: characters that do not fit are
//! dropped and a decimal point that would land outside the section is
//! omitted.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Widest number the numeric pipeline produces (sign, 19 integer digits,
/// decimal places)
pub const MAX_NUMBER_WIDTH: usize = 32;

/// Upper bound for requested decimal places
///
/// Larger requests are clamped; they could never be shown on a display
/// of at most eight digits anyway.
pub const MAX_DECIMAL_PLACES: u8 = 9;

/// Characters of a formatted number, most significant first
pub type NumberChars = Vec<u8, MAX_NUMBER_WIDTH>;

/// Placement of a value inside its section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Alignment {
    /// First character on the first position
    Left,
    /// Last character on the last position
    Right,
    /// Centered, one position further left on odd remainders
    #[default]
    Center,
}

impl Alignment {
    /// Virtual borders `(left, right)` of `in_size` characters placed in
    /// `out_size` positions
    ///
    /// Both borders may lie outside `0..out_size` when the value is wider
    /// than the section.
    pub fn borders(self, in_size: isize, out_size: isize) -> (isize, isize) {
        let left = match self {
            Self::Left => 0,
            Self::Right => out_size - in_size,
            // Truncating division keeps odd remainders on the right side
            Self::Center => (out_size - in_size) / 2,
        };
        (left, left + in_size - 1)
    }
}

/// Lay out `in_size` characters from `input` in `output`
///
/// Positions left of the value are filled with `'0'` when `leading_zeros`
/// is set, otherwise with a space; positions right of the value with a
/// space. Characters falling outside `output` are dropped.
///
/// When `decimal_places` is given, returns the index of the character
/// that carries the decimal point (`right - decimal_places`), or `None`
/// if that index is outside `output`.
pub fn format_characters<I>(
    input: I,
    in_size: usize,
    output: &mut [u8],
    alignment: Alignment,
    leading_zeros: bool,
    decimal_places: Option<u8>,
) -> Option<usize>
where
    I: IntoIterator<Item = u8>,
{
    let out_size = output.len() as isize;
    let (left, right) = alignment.borders(in_size as isize, out_size);
    let pad = if leading_zeros { b'0' } else { b' ' };

    for (i, slot) in output.iter_mut().enumerate() {
        *slot = if (i as isize) < left { pad } else { b' ' };
    }

    for (j, c) in input.into_iter().take(in_size).enumerate() {
        let i = left + j as isize;
        if i >= out_size {
            break;
        }
        if let Some(slot) = usize::try_from(i).ok().and_then(|i| output.get_mut(i)) {
            *slot = c;
        }
    }

    let dot = right - isize::from(decimal_places?);
    if (0..out_size).contains(&dot) {
        Some(dot as usize)
    } else {
        None
    }
}

/// Number of decimal digits of `magnitude` (at least one)
pub fn count_digits(mut magnitude: u64) -> usize {
    let mut count = 1;
    while magnitude >= 10 {
        magnitude /= 10;
        count += 1;
    }
    count
}

/// Number of characters `value` takes, minus sign included
pub fn count_characters(value: i64) -> usize {
    count_digits(value.unsigned_abs()) + usize::from(value < 0)
}

/// Decimal characters of `value` in exactly `width` positions
///
/// The magnitude is written right-aligned and zero-filled; a negative
/// value then has its first position replaced by `'-'`, so `width` must
/// include a slot for the sign. Digits that do not fit are dropped from
/// the most significant end. `width` is capped at [`MAX_NUMBER_WIDTH`].
pub fn integer_characters(value: i64, width: usize) -> NumberChars {
    let width = width.min(MAX_NUMBER_WIDTH);
    let mut magnitude = value.unsigned_abs();
    let mut chars = NumberChars::new();

    for _ in 0..width {
        // Cannot fail, width is capped to the capacity
        let _ = chars.push(b'0' + (magnitude % 10) as u8);
        magnitude /= 10;
    }
    chars.reverse();

    if value < 0 {
        if let Some(first) = chars.first_mut() {
            *first = b'-';
        }
    }
    chars
}

/// Decimal characters of `number` scaled by `10^decimal_places`
///
/// The decimal point itself is not part of the output; the formatter
/// places it `decimal_places` positions from the right. Numbers in
/// `(-1, 0)` keep their leading zero (`-0.5` → `"-05"`). A sign slot is
/// only reserved when the rounded value is negative, so a number that
/// rounds to zero loses its sign (`-0.04` at one place → `"00"`).
pub fn real_characters(number: f64, decimal_places: u8) -> NumberChars {
    let places = decimal_places.min(MAX_DECIMAL_PLACES);
    let scaled = round_half_away(number * pow10(places));
    let whole = number as i64;

    let width = count_digits(whole.unsigned_abs()) + usize::from(places) + usize::from(scaled < 0);
    // Rounding may carry into one more digit (9.96 → 10.0)
    let width = width.max(count_characters(scaled));

    integer_characters(scaled, width)
}

/// Round to the nearest integer, ties away from zero
///
/// Out-of-range values saturate; NaN becomes zero.
pub fn round_half_away(x: f64) -> i64 {
    if x < 0.0 {
        (x - 0.5) as i64
    } else {
        (x + 0.5) as i64
    }
}

/// Exact for every `places` up to [`MAX_DECIMAL_PLACES`]
fn pow10(places: u8) -> f64 {
    10_u64.pow(u32::from(places)) as f64
}
