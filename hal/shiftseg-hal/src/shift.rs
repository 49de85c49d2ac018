//! Shift register abstractions
//!
//! A display is wired as a chain of serial-in/parallel-out registers
//! (74HC595 and friends) sharing three lines:
//!
//! - DATA: serial input of the first register
//! - CLOCK: shift clock, data is sampled on the rising edge
//! - LATCH: storage clock, outputs update on the rising edge
//!
//! One transaction is `set_latch(false)`, any number of `shift_out` calls,
//! then `set_latch(true)`.

use crate::gpio::OutputPin;

/// Order in which the bits of a byte are clocked out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Bit 0 first, bit 7 last
    LsbFirst,
    /// Bit 7 first, bit 0 last
    MsbFirst,
}

/// Clock one byte out on a data/clock line pair
///
/// For each bit the data line is set, then the clock line is pulsed
/// high and back low.
pub fn shift_out<D, C>(data: &mut D, clock: &mut C, order: BitOrder, byte: u8)
where
    D: OutputPin + ?Sized,
    C: OutputPin + ?Sized,
{
    for i in 0..8 {
        let bit = match order {
            BitOrder::LsbFirst => (byte >> i) & 1,
            BitOrder::MsbFirst => (byte >> (7 - i)) & 1,
        };
        data.set_state(bit == 1);
        clock.set_high();
        clock.set_low();
    }
}

/// Serial transfer into a latched shift register chain
pub trait ShiftRegister {
    /// Drive the latch (storage clock) line
    ///
    /// Outputs are updated on the low-to-high transition.
    fn set_latch(&mut self, high: bool);

    /// Shift one byte into the chain
    fn shift_out(&mut self, order: BitOrder, byte: u8);
}

/// Bit-banged shift register over three output lines
pub struct ShiftLines<D, C, L> {
    data: D,
    clock: C,
    latch: L,
}

impl<D: OutputPin, C: OutputPin, L: OutputPin> ShiftLines<D, C, L> {
    /// Take ownership of the data, clock and latch lines
    ///
    /// All three lines are driven low so the chain starts from a known
    /// idle state.
    pub fn new(mut data: D, mut clock: C, mut latch: L) -> Self {
        data.set_low();
        clock.set_low();
        latch.set_low();
        Self { data, clock, latch }
    }

    /// Give the lines back
    pub fn release(self) -> (D, C, L) {
        (self.data, self.clock, self.latch)
    }
}

impl<D: OutputPin, C: OutputPin, L: OutputPin> ShiftRegister for ShiftLines<D, C, L> {
    fn set_latch(&mut self, high: bool) {
        self.latch.set_state(high);
    }

    fn shift_out(&mut self, order: BitOrder, byte: u8) {
        shift_out(&mut self.data, &mut self.clock, order, byte);
    }
}
