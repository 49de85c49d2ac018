//! Scan driver
//!
//! Moves the display buffer into the shift registers. Two wirings are
//! supported:
//!
//! - **Static**: one register per digit. A single latched transaction
//!   carries the whole buffer and the digits stay lit until the next one.
//! - **Multiplexed**: one segment register and one digit-select register.
//!   Each transaction lights a single digit, so the driver cycles through
//!   all positions, holding each for the dwell time, and relies on
//!   persistence of vision.
//!
//! # Byte order
//!
//! ```text
//! static:       latch↓  buf[N-1] … buf[1] buf[0]  latch↑
//! multiplexed:  latch↓  select[i] buf[i]          latch↑  dwell   (i = 0..N)
//! swapped:      latch↓  buf[i] select[i]          latch↑  dwell
//! ```
//!
//! Buffer bytes are shifted LSB first. Clear transactions use MSB first
//! with fixed all-off bytes and never read the buffer.

use shiftseg_core::encoding::EMPTY;
use shiftseg_core::{DigitSelectTable, DisplayBuffer, DisplayConfig, Topology};
use shiftseg_hal::{BitOrder, Clock, ShiftRegister};

/// Bit order for buffer and digit-select bytes
const DATA_ORDER: BitOrder = BitOrder::LsbFirst;

/// Bit order for clear transactions
const CLEAR_ORDER: BitOrder = BitOrder::MsbFirst;

/// Topology-specific scan state
#[derive(Debug, Clone)]
enum Scan {
    Static {
        /// Polarity-adjusted all-off pattern
        blank: u8,
    },
    Multiplexed {
        select: DigitSelectTable,
        /// Segment byte goes out first
        swapped: bool,
        dwell_ms: u16,
    },
}

/// Emits a display buffer to a shift register chain
pub struct ScanDriver<R, C> {
    register: R,
    clock: C,
    scan: Scan,
    /// Number of digit positions
    size: usize,
}

impl<R: ShiftRegister, C: Clock> ScanDriver<R, C> {
    /// Create a driver for a display of `size` positions
    pub fn new(register: R, clock: C, config: &DisplayConfig, size: usize) -> Self {
        let scan = match config.topology {
            Topology::Static => Scan::Static {
                blank: config.polarity.apply(EMPTY),
            },
            Topology::Multiplexed => Scan::Multiplexed {
                select: config.digit_select(),
                swapped: config.swapped,
                dwell_ms: config.effective_dwell_ms(),
            },
        };

        Self {
            register,
            clock,
            scan,
            size,
        }
    }

    /// Wiring topology
    pub fn topology(&self) -> Topology {
        match self.scan {
            Scan::Static { .. } => Topology::Static,
            Scan::Multiplexed { .. } => Topology::Multiplexed,
        }
    }

    /// Time one full scan takes (ms)
    ///
    /// Zero for static displays, `dwell × size` for multiplexed ones.
    pub fn scan_time_ms(&self) -> u64 {
        match self.scan {
            Scan::Static { .. } => 0,
            Scan::Multiplexed { dwell_ms, .. } => u64::from(dwell_ms) * self.size as u64,
        }
    }

    /// Emit the buffer once
    ///
    /// A static display keeps showing it afterwards; a multiplexed display
    /// shows each digit for one dwell interval and ends with the last
    /// digit lit.
    pub fn update(&mut self, buffer: &DisplayBuffer) {
        match &self.scan {
            Scan::Static { .. } => {
                self.register.set_latch(false);
                for &pattern in buffer.as_slice().iter().rev() {
                    self.register.shift_out(DATA_ORDER, pattern);
                }
                self.register.set_latch(true);
            }
            Scan::Multiplexed {
                select,
                swapped,
                dwell_ms,
            } => {
                for (position, &pattern) in buffer.as_slice().iter().enumerate() {
                    let code = select.code(position);
                    let (first, second) = if *swapped {
                        (pattern, code)
                    } else {
                        (code, pattern)
                    };

                    self.register.set_latch(false);
                    self.register.shift_out(DATA_ORDER, first);
                    self.register.shift_out(DATA_ORDER, second);
                    self.register.set_latch(true);

                    self.clock.delay_ms(u32::from(*dwell_ms));
                }
            }
        }
    }

    /// Turn every segment off
    pub fn clear(&mut self) {
        self.register.set_latch(false);
        match self.scan {
            Scan::Static { blank } => {
                for _ in 0..self.size {
                    self.register.shift_out(CLEAR_ORDER, blank);
                }
            }
            Scan::Multiplexed { .. } => {
                // Zero on both registers leaves no LED with a voltage across it
                self.register.shift_out(CLEAR_ORDER, EMPTY);
                self.register.shift_out(CLEAR_ORDER, EMPTY);
            }
        }
        self.register.set_latch(true);
    }

    /// Show the buffer for `duration_ms`, then clear
    ///
    /// A multiplexed display only starts a scan if it can finish before
    /// the duration runs out, so the call returns at most one scan time
    /// early and never late.
    pub fn show(&mut self, buffer: &DisplayBuffer, duration_ms: u32) {
        #[cfg(feature = "defmt")]
        defmt::trace!("show {} ms", duration_ms);

        match self.topology() {
            Topology::Static => {
                self.update(buffer);
                self.clock.delay_ms(duration_ms);
            }
            Topology::Multiplexed if buffer.is_empty() => {
                self.clock.delay_ms(duration_ms);
            }
            Topology::Multiplexed => {
                let start = self.clock.now_ms();
                if let Some(last_start) = u64::from(duration_ms).checked_sub(self.scan_time_ms()) {
                    while self.clock.now_ms().saturating_sub(start) <= last_start {
                        self.update(buffer);
                    }
                }
            }
        }
        self.clear();
    }

    /// Give the register and clock back
    pub fn release(self) -> (R, C) {
        (self.register, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Event, Log, MockClock, MockRegister};
    use proptest::prelude::*;
    use shiftseg_core::encoding::DIGITS;
    use shiftseg_core::Polarity;
    use std::vec;
    use std::vec::Vec;

    fn driver<'a>(log: &'a Log, config: &DisplayConfig) -> ScanDriver<MockRegister<'a>, MockClock<'a>> {
        let size = config.layout().display_size();
        ScanDriver::new(MockRegister(log), MockClock(log), config, size)
    }

    fn buffer(patterns: &[u8], polarity: Polarity) -> DisplayBuffer {
        let mut buffer = DisplayBuffer::new(patterns.len(), polarity);
        buffer.write(0, patterns);
        buffer
    }

    #[test]
    fn test_static_update_last_position_first() {
        let log = Log::new();
        let config = DisplayConfig::static_drive(Polarity::CommonCathode, 3);
        let mut driver = driver(&log, &config);

        driver.update(&buffer(&[DIGITS[1], DIGITS[2], DIGITS[3]], Polarity::CommonCathode));

        assert_eq!(
            log.events(),
            vec![
                Event::Latch(false),
                Event::Shift(BitOrder::LsbFirst, DIGITS[3]),
                Event::Shift(BitOrder::LsbFirst, DIGITS[2]),
                Event::Shift(BitOrder::LsbFirst, DIGITS[1]),
                Event::Latch(true),
            ]
        );
    }

    #[test]
    fn test_multiplexed_update_select_then_segments() {
        let log = Log::new();
        let config = DisplayConfig::multiplexed(Polarity::CommonCathode, 4);
        let mut driver = driver(&log, &config);
        let patterns = [DIGITS[1], DIGITS[2], DIGITS[3], DIGITS[4]];

        driver.update(&buffer(&patterns, Polarity::CommonCathode));

        let mut expected = Vec::new();
        for (i, &pattern) in patterns.iter().enumerate() {
            expected.push(Event::Latch(false));
            expected.push(Event::Shift(BitOrder::LsbFirst, !(0x80u8 >> i)));
            expected.push(Event::Shift(BitOrder::LsbFirst, pattern));
            expected.push(Event::Latch(true));
            expected.push(Event::Delay(1));
        }
        assert_eq!(log.events(), expected);
    }

    #[test]
    fn test_multiplexed_update_swapped() {
        let log = Log::new();
        let config = DisplayConfig::multiplexed(Polarity::CommonAnode, 2)
            .with_swapped(true)
            .with_digit_indexes(&[1, 0])
            .with_dwell_ms(3);
        let mut driver = driver(&log, &config);

        driver.update(&buffer(&[DIGITS[7], DIGITS[8]], Polarity::CommonAnode));

        assert_eq!(
            log.events(),
            vec![
                Event::Latch(false),
                Event::Shift(BitOrder::LsbFirst, !DIGITS[7]),
                Event::Shift(BitOrder::LsbFirst, 0b0100_0000),
                Event::Latch(true),
                Event::Delay(3),
                Event::Latch(false),
                Event::Shift(BitOrder::LsbFirst, !DIGITS[8]),
                Event::Shift(BitOrder::LsbFirst, 0b1000_0000),
                Event::Latch(true),
                Event::Delay(3),
            ]
        );
    }

    #[test]
    fn test_static_clear_uses_polarity_blank() {
        let log = Log::new();
        let mut cathode = driver(&log, &DisplayConfig::static_drive(Polarity::CommonCathode, 2));
        cathode.clear();
        assert_eq!(
            log.transactions(),
            vec![vec![(BitOrder::MsbFirst, 0x00), (BitOrder::MsbFirst, 0x00)]]
        );

        log.reset();
        let mut anode = driver(&log, &DisplayConfig::static_drive(Polarity::CommonAnode, 3));
        anode.clear();
        assert_eq!(log.transactions(), vec![vec![(BitOrder::MsbFirst, 0xFF); 3]]);
    }

    #[test]
    fn test_multiplexed_clear_blanks_both_registers() {
        let log = Log::new();
        let mut driver = driver(&log, &DisplayConfig::multiplexed(Polarity::CommonAnode, 6));
        driver.clear();
        assert_eq!(
            log.events(),
            vec![
                Event::Latch(false),
                Event::Shift(BitOrder::MsbFirst, 0x00),
                Event::Shift(BitOrder::MsbFirst, 0x00),
                Event::Latch(true),
            ]
        );
    }

    #[test]
    fn test_static_show() {
        let log = Log::new();
        let mut driver = driver(&log, &DisplayConfig::static_drive(Polarity::CommonCathode, 1));

        driver.show(&buffer(&[DIGITS[5]], Polarity::CommonCathode), 250);

        assert_eq!(
            log.events(),
            vec![
                Event::Latch(false),
                Event::Shift(BitOrder::LsbFirst, DIGITS[5]),
                Event::Latch(true),
                Event::Delay(250),
                Event::Latch(false),
                Event::Shift(BitOrder::MsbFirst, 0x00),
                Event::Latch(true),
            ]
        );
    }

    #[test]
    fn test_multiplexed_show_full_scans() {
        let log = Log::new();
        let mut driver = driver(&log, &DisplayConfig::multiplexed(Polarity::CommonCathode, 4));
        let buffer = buffer(&[DIGITS[0]; 4], Polarity::CommonCathode);

        driver.show(&buffer, 100);

        // 4 ms per scan: scans start at 0, 4, ..., 96
        assert_eq!(log.delayed(), 100);
        assert_eq!(log.now(), 100);
        let transactions = log.transactions();
        assert_eq!(transactions.len(), 25 * 4 + 1);
        assert_eq!(
            transactions.last(),
            Some(&vec![(BitOrder::MsbFirst, 0x00), (BitOrder::MsbFirst, 0x00)])
        );
    }

    #[test]
    fn test_multiplexed_show_shorter_than_scan() {
        let log = Log::new();
        let mut driver = driver(&log, &DisplayConfig::multiplexed(Polarity::CommonCathode, 4));

        driver.show(&buffer(&[DIGITS[0]; 4], Polarity::CommonCathode), 3);

        assert_eq!(log.delayed(), 0);
        assert_eq!(log.transactions().len(), 1);
    }

    #[test]
    fn test_scan_time() {
        let log = Log::new();
        let config = DisplayConfig::multiplexed(Polarity::CommonCathode, 5).with_dwell_ms(2);
        assert_eq!(driver(&log, &config).scan_time_ms(), 10);

        let config = DisplayConfig::static_drive(Polarity::CommonCathode, 5);
        assert_eq!(driver(&log, &config).scan_time_ms(), 0);
    }

    #[test]
    fn test_release() {
        let log = Log::new();
        let driver = driver(&log, &DisplayConfig::default());
        assert_eq!(driver.topology(), Topology::Static);
        let (_register, _clock) = driver.release();
    }

    proptest! {
        #[test]
        fn prop_multiplexed_show_never_overshoots(
            duration in 0u32..400,
            size in 1u8..=8,
            dwell in 1u16..5,
        ) {
            let log = Log::new();
            let config = DisplayConfig::multiplexed(Polarity::CommonCathode, size).with_dwell_ms(dwell);
            let mut driver = driver(&log, &config);
            let buffer = DisplayBuffer::new(usize::from(size), Polarity::CommonCathode);
            let scan = u64::from(dwell) * u64::from(size);

            driver.show(&buffer, duration);

            let total = log.delayed();
            prop_assert!(total <= u64::from(duration));
            prop_assert!(total + scan > u64::from(duration));
            prop_assert_eq!(total % scan, 0);
        }
    }
}
