//! Recording test doubles for the HAL traits

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use shiftseg_hal::{BitOrder, Clock, ShiftRegister};

/// Something that happened on the lines or the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Latch(bool),
    Shift(BitOrder, u8),
    Delay(u32),
}

/// Shared event log and virtual time
///
/// Only delays advance the time; shifting is free.
pub struct Log {
    events: RefCell<Vec<Event>>,
    now: Cell<u64>,
}

impl Log {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            now: Cell::new(0),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn reset(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// Total time spent in delays since the last reset
    pub fn delayed(&self) -> u64 {
        self.events
            .borrow()
            .iter()
            .map(|event| match event {
                Event::Delay(ms) => u64::from(*ms),
                _ => 0,
            })
            .sum()
    }

    /// Bytes of each latched transaction, in shift order
    pub fn transactions(&self) -> Vec<Vec<(BitOrder, u8)>> {
        let mut transactions = Vec::new();
        let mut current = Vec::new();
        for event in self.events.borrow().iter() {
            match *event {
                Event::Latch(false) => current.clear(),
                Event::Latch(true) => transactions.push(core::mem::take(&mut current)),
                Event::Shift(order, byte) => current.push((order, byte)),
                Event::Delay(_) => {}
            }
        }
        transactions
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

pub struct MockRegister<'a>(pub &'a Log);

impl ShiftRegister for MockRegister<'_> {
    fn set_latch(&mut self, high: bool) {
        self.0.push(Event::Latch(high));
    }

    fn shift_out(&mut self, order: BitOrder, byte: u8) {
        self.0.push(Event::Shift(order, byte));
    }
}

pub struct MockClock<'a>(pub &'a Log);

impl Clock for MockClock<'_> {
    fn now_ms(&self) -> u64 {
        self.0.now.get()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::Delay(ms));
        self.0.now.set(self.0.now.get() + u64::from(ms));
    }
}
