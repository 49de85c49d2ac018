//! Value rendering
//!
//! The full pipeline from a value to the segment patterns of one section:
//! numeric conversion, formatting, then encoding.

use crate::buffer::MAX_DISPLAY_SIZE;
use crate::encoder::encode_characters;
use crate::encoding::ascii_or_blank;
use crate::format::{
    count_characters, format_characters, integer_characters, real_characters, round_half_away,
    Alignment, MAX_DECIMAL_PLACES,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Something that can be shown in a section
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Whole number
    Integer(i64),
    /// Real number, shown with a fixed number of decimal places
    Real(f64),
    /// Single character
    Char(char),
    /// Text, one character per digit
    Text(&'a str),
}

macro_rules! integer_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value<'_> {
                fn from(value: $t) -> Self {
                    Value::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value<'_> {
    fn from(value: f32) -> Self {
        Value::Real(f64::from(value))
    }
}

impl From<f64> for Value<'_> {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<char> for Value<'_> {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Text(value)
    }
}

/// Formatting options for a value
///
/// `decimal_places` and `leading_zeros` only apply to numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetOptions {
    /// Placement inside the section
    pub alignment: Alignment,
    /// Digits after the decimal point (0 = whole number)
    pub decimal_places: u8,
    /// Pad the left side with zeros instead of blanks
    pub leading_zeros: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SetOptions {
    /// Centered, no decimal places, no leading zeros
    pub const fn new() -> Self {
        Self {
            alignment: Alignment::Center,
            decimal_places: 0,
            leading_zeros: false,
        }
    }

    /// Set the alignment
    pub const fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the number of decimal places
    pub const fn decimals(mut self, decimal_places: u8) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Enable or disable leading zeros
    pub const fn zero_padded(mut self, leading_zeros: bool) -> Self {
        self.leading_zeros = leading_zeros;
        self
    }
}

/// Render `value` into the segment patterns of one section
///
/// `output.len()` is the section size (at most [`MAX_DISPLAY_SIZE`]
/// positions are written). Patterns are common-cathode; polarity is
/// applied when they are stored.
pub fn render(value: Value<'_>, options: SetOptions, output: &mut [u8]) {
    let mut chars = [b' '; MAX_DISPLAY_SIZE];
    let width = output.len().min(MAX_DISPLAY_SIZE);
    let chars = &mut chars[..width];
    let places = options.decimal_places.min(MAX_DECIMAL_PLACES);

    let dot = match value {
        Value::Integer(n) if places == 0 => {
            let digits = integer_characters(n, count_characters(n));
            format_number(&digits, chars, options, None)
        }
        Value::Integer(n) => {
            let digits = real_characters(n as f64, places);
            format_number(&digits, chars, options, Some(places))
        }
        Value::Real(x) if places == 0 => {
            let n = round_half_away(x);
            let digits = integer_characters(n, count_characters(n));
            format_number(&digits, chars, options, None)
        }
        Value::Real(x) => {
            let digits = real_characters(x, places);
            format_number(&digits, chars, options, Some(places))
        }
        Value::Char(c) => format_characters(
            [ascii_or_blank(c)],
            1,
            chars,
            options.alignment,
            false,
            None,
        ),
        Value::Text(text) => format_characters(
            text.chars().map(ascii_or_blank),
            text.chars().count(),
            chars,
            options.alignment,
            false,
            None,
        ),
    };

    encode_characters(chars, output, dot);
}

fn format_number(
    digits: &[u8],
    chars: &mut [u8],
    options: SetOptions,
    places: Option<u8>,
) -> Option<usize> {
    let dot = format_characters(
        digits.iter().copied(),
        digits.len(),
        chars,
        options.alignment,
        options.leading_zeros,
        places,
    );
    if options.leading_zeros {
        hoist_sign(chars);
    }
    dot
}

/// Move a minus sign in front of the zero padding (`"0-7"` → `"-07"`)
fn hoist_sign(chars: &mut [u8]) {
    if let Some(minus) = chars.iter().position(|&c| c == b'-') {
        if minus > 0 && chars[..minus].iter().all(|&c| c == b'0') {
            chars.swap(0, minus);
        }
    }
}
