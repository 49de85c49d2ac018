//! Segment encoding tables
//!
//! Every pattern is one byte, one bit per LED of a digit:
//!
//! ```text
//!      a
//!    f   b       bit 7 6 5 4 3 2 1 0
//!      g             a b c d e f g dp
//!    e   c
//!      d   dp
//! ```
//!
//! The tables are for a common-cathode display (bit set = segment lit).
//! Polarity inversion happens when a pattern is stored, never here.

/// Bit position of the decimal point
pub const DOT_BIT: u8 = 0;

/// Mask of the decimal point bit
pub const DOT: u8 = 1 << DOT_BIT;

/// Digit patterns, indexed by value
pub const DIGITS: [u8; 10] = [
    0b1111_1100, // 0
    0b0110_0000, // 1
    0b1101_1010, // 2
    0b1111_0010, // 3
    0b0110_0110, // 4
    0b1011_0110, // 5
    0b1011_1110, // 6
    0b1110_0000, // 7
    0b1111_1110, // 8
    0b1111_0110, // 9
];

/// Letter patterns, indexed by position in the alphabet
///
/// Seven segments cannot draw every letter; K, M, V, W and X use the
/// closest recognizable shape.
pub const LETTERS: [u8; 26] = [
    0b1110_1110, // A
    0b0011_1110, // b
    0b1001_1100, // C
    0b0111_1010, // d
    0b1001_1110, // E
    0b1000_1110, // F
    0b1011_1100, // G
    0b0110_1110, // H
    0b0000_1100, // I
    0b0111_1000, // J
    0b0101_1110, // K
    0b0001_1100, // L
    0b1010_1000, // M
    0b0010_1010, // n
    0b0011_1010, // o
    0b1100_1110, // P
    0b1110_0110, // q
    0b0000_1010, // r
    0b1011_0110, // S
    0b0001_1110, // t
    0b0111_1100, // U
    0b0011_1000, // v
    0b0101_0100, // W
    0b0110_1110, // X
    0b0111_0110, // y
    0b1101_1010, // Z
];

/// Minus sign (segment g only)
pub const MINUS: u8 = 0b0000_0010;

/// Space and any character without a pattern
pub const BLANK: u8 = 0b0000_0000;

/// Every segment and the decimal point off
pub const EMPTY: u8 = 0b0000_0000;

/// Digit-select codes, indexed by physical digit index
///
/// Physical index `i` drives output `Q(7-i)` of the digit-select register
/// high. Common-cathode displays select with an active-low line, so the
/// code is inverted for them when the digit table is built.
pub const DIGIT_SELECT: [u8; 8] = [
    0b1000_0000,
    0b0100_0000,
    0b0010_0000,
    0b0001_0000,
    0b0000_1000,
    0b0000_0100,
    0b0000_0010,
    0b0000_0001,
];

/// Pattern for a single ASCII character
///
/// Digits and letters (either case) map to their table entry, `'-'` to
/// [`MINUS`]. Everything else renders as [`BLANK`].
pub const fn pattern_for(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => DIGITS[(c - b'0') as usize],
        b'a'..=b'z' => LETTERS[(c - b'a') as usize],
        b'A'..=b'Z' => LETTERS[(c - b'A') as usize],
        b'-' => MINUS,
        _ => BLANK,
    }
}

/// Narrow a `char` to the byte the tables are indexed by
///
/// Non-ASCII characters become a space.
pub const fn ascii_or_blank(c: char) -> u8 {
    if c.is_ascii() {
        c as u8
    } else {
        b' '
    }
}
