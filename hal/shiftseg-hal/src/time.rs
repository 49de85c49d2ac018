//! Time base abstraction
//!
//! The display only needs two things from a timer: a free-running
//! millisecond counter and a blocking delay. Multiplexed scanning and
//! timed `show` calls busy-wait through this trait.

/// Millisecond clock with busy-wait delay
pub trait Clock {
    /// Milliseconds elapsed since an arbitrary, fixed origin
    ///
    /// Must be monotonic for the lifetime of the display.
    fn now_ms(&self) -> u64;

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_ms(&self) -> u64 {
        T::now_ms(self)
    }

    fn delay_ms(&mut self, ms: u32) {
        T::delay_ms(self, ms);
    }
}
