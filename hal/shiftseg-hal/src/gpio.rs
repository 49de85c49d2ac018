//! GPIO line abstractions
//!
//! Provides the trait for the digital output lines (serial data, serial
//! clock, latch) that feed the shift registers.

/// Digital output pin
///
/// Implementations handle the actual register manipulation for the
/// specific chip. The line is expected to already be configured as an
/// output when it is handed over.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    fn set_high(&mut self) {
        P::set_high(self);
    }

    fn set_low(&mut self) {
        P::set_low(self);
    }

    fn is_set_high(&self) -> bool {
        P::is_set_high(self)
    }
}
