//! embedded-hal adapters
//!
//! Bridges `embedded-hal` 1.0 pins and delays to the display's HAL
//! traits, so any board crate implementing embedded-hal can drive a
//! display without further glue.
//!
//! ```text
//! embedded_hal::digital::OutputPin ──▶ EmbeddedPin ──▶ ShiftLines
//! embedded_hal::delay::DelayNs + now ─▶ EmbeddedClock
//! ```
//!
//! The display API does not fail, so pin errors are dropped here.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital;
use shiftseg_hal::{Clock, OutputPin, ShiftLines};

/// embedded-hal output pin with a remembered level
pub struct EmbeddedPin<P> {
    pin: P,
    high: bool,
}

impl<P: digital::OutputPin> EmbeddedPin<P> {
    /// Wrap a pin, assuming it currently sits low
    pub fn new(pin: P) -> Self {
        Self { pin, high: false }
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: digital::OutputPin> OutputPin for EmbeddedPin<P> {
    fn set_high(&mut self) {
        if self.pin.set_high().is_ok() {
            self.high = true;
        }
    }

    fn set_low(&mut self) {
        if self.pin.set_low().is_ok() {
            self.high = false;
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Shift register over three embedded-hal pins
pub type EmbeddedLines<D, C, L> = ShiftLines<EmbeddedPin<D>, EmbeddedPin<C>, EmbeddedPin<L>>;

/// Build a shift register from embedded-hal data, clock and latch pins
pub fn embedded_lines<D, C, L>(data: D, clock: C, latch: L) -> EmbeddedLines<D, C, L>
where
    D: digital::OutputPin,
    C: digital::OutputPin,
    L: digital::OutputPin,
{
    ShiftLines::new(
        EmbeddedPin::new(data),
        EmbeddedPin::new(clock),
        EmbeddedPin::new(latch),
    )
}

/// Clock from an embedded-hal delay and a millisecond counter
///
/// `now` usually reads a free-running hardware timer.
pub struct EmbeddedClock<D, N> {
    delay: D,
    now: N,
}

impl<D: DelayNs, N: Fn() -> u64> EmbeddedClock<D, N> {
    /// Combine a blocking delay with a millisecond counter
    pub fn new(delay: D, now: N) -> Self {
        Self { delay, now }
    }

    /// Give the delay and counter back
    pub fn release(self) -> (D, N) {
        (self.delay, self.now)
    }
}

impl<D: DelayNs, N: Fn() -> u64> Clock for EmbeddedClock<D, N> {
    fn now_ms(&self) -> u64 {
        (self.now)()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorKind;
    use shiftseg_core::{DisplayConfig, Polarity, SetOptions};
    use shiftseg_hal::{BitOrder, ShiftRegister};
    use std::vec::Vec;

    use crate::display::ShiftDisplay;

    /// Pin that records every level written to it
    struct RecordingPin<'a>(&'a core::cell::RefCell<Vec<bool>>);

    impl digital::ErrorType for RecordingPin<'_> {
        type Error = Infallible;
    }

    impl digital::OutputPin for RecordingPin<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(true);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct PinFault;

    impl digital::Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Pin whose writes always fail
    struct BrokenPin;

    impl digital::ErrorType for BrokenPin {
        type Error = PinFault;
    }

    impl digital::OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(PinFault)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(PinFault)
        }
    }

    /// Delay that advances a shared millisecond counter
    struct VirtualDelay<'a>(&'a Cell<u64>);

    impl DelayNs for VirtualDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.0.set(self.0.get() + u64::from(ns / 1_000_000));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.0.set(self.0.get() + u64::from(ms));
        }
    }

    #[test]
    fn test_pin_tracks_level() {
        let levels = core::cell::RefCell::new(Vec::new());
        let mut pin = EmbeddedPin::new(RecordingPin(&levels));
        assert!(pin.is_set_low());

        pin.set_high();
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(pin.is_set_low());

        assert_eq!(*levels.borrow(), [true, false]);
    }

    #[test]
    fn test_pin_errors_are_dropped() {
        let mut pin = EmbeddedPin::new(BrokenPin);
        pin.set_high();
        assert!(pin.is_set_low());
        let _pin: BrokenPin = pin.release();
    }

    #[test]
    fn test_lines_shift_byte() {
        let data = core::cell::RefCell::new(Vec::new());
        let clock = core::cell::RefCell::new(Vec::new());
        let latch = core::cell::RefCell::new(Vec::new());
        let mut lines = embedded_lines(
            RecordingPin(&data),
            RecordingPin(&clock),
            RecordingPin(&latch),
        );

        lines.set_latch(false);
        lines.shift_out(BitOrder::MsbFirst, 0b1010_0000);
        lines.set_latch(true);

        // Initial low, then one level per bit
        let data = data.borrow();
        assert_eq!(data.len(), 9);
        assert_eq!(&data[1..4], &[true, false, true]);
        assert!(data[4..].iter().all(|&level| !level));
        // Initial low, then high/low per bit
        assert_eq!(clock.borrow().len(), 17);
        assert_eq!(*latch.borrow(), [false, false, true]);
    }

    #[test]
    fn test_clock_uses_counter() {
        let ticks = Cell::new(40);
        let mut clock = EmbeddedClock::new(VirtualDelay(&ticks), || ticks.get());

        assert_eq!(clock.now_ms(), 40);
        clock.delay_ms(15);
        assert_eq!(clock.now_ms(), 55);
    }

    #[test]
    fn test_display_over_embedded_hal() {
        let data = core::cell::RefCell::new(Vec::new());
        let clock = core::cell::RefCell::new(Vec::new());
        let latch = core::cell::RefCell::new(Vec::new());
        let ticks = Cell::new(0);
        let lines = embedded_lines(
            RecordingPin(&data),
            RecordingPin(&clock),
            RecordingPin(&latch),
        );
        let timer = EmbeddedClock::new(VirtualDelay(&ticks), || ticks.get());
        let config = DisplayConfig::multiplexed(Polarity::CommonCathode, 2);
        let mut display = ShiftDisplay::new(lines, timer, &config);

        display.set(42i32, SetOptions::new());
        display.show(10);

        // Scans start at 0, 2, ..., 8
        assert_eq!(ticks.get(), 10);
        // Setup low, construction clear, 5 scans of 2 digits, final clear
        assert_eq!(latch.borrow().len(), 1 + 2 * (1 + 5 * 2 + 1));
    }
}
