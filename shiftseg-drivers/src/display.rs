//! Display controller
//!
//! Owns the scan driver, the display buffer and the section layout, and
//! routes values into sections. Writes only change the buffer; nothing
//! reaches the hardware until [`ShiftDisplay::update`],
//! [`ShiftDisplay::show`] or [`ShiftDisplay::scroll`] is called.
//!
//! Writes never fail. A write to a section or position that does not
//! exist is ignored; the `try_*` variants report it instead.

use shiftseg_core::encoder::encode_with_dots;
use shiftseg_core::encoding::ascii_or_blank;
use shiftseg_core::{
    render, DisplayBuffer, DisplayConfig, DisplayError, Layout, Section, SetOptions, Topology,
    Value, MAX_DISPLAY_SIZE,
};
use shiftseg_hal::{Clock, ShiftRegister};

use crate::scan::ScanDriver;

/// 7-segment display behind a shift register chain
pub struct ShiftDisplay<R, C> {
    driver: ScanDriver<R, C>,
    buffer: DisplayBuffer,
    layout: Layout,
}

impl<R: ShiftRegister, C: Clock> ShiftDisplay<R, C> {
    /// Create a display and blank the hardware
    pub fn new(register: R, clock: C, config: &DisplayConfig) -> Self {
        let layout = config.layout();
        let size = layout.display_size();
        let mut driver = ScanDriver::new(register, clock, config, size);
        driver.clear();

        Self {
            driver,
            buffer: DisplayBuffer::new(size, config.polarity),
            layout,
        }
    }

    /// Section layout
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Buffered, polarity-adjusted patterns
    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    /// Total number of digit positions
    pub fn display_size(&self) -> usize {
        self.layout.display_size()
    }

    /// Wiring topology
    pub fn topology(&self) -> Topology {
        self.driver.topology()
    }

    // ========================================================================
    // Buffer writes
    // ========================================================================

    /// Write a value to section 0
    pub fn set<'a>(&mut self, value: impl Into<Value<'a>>, options: SetOptions) {
        self.set_at(0, value, options);
    }

    /// Write a value to a section
    pub fn set_at<'a>(&mut self, section: usize, value: impl Into<Value<'a>>, options: SetOptions) {
        discard(self.try_set_at(section, value, options));
    }

    /// Write a value to a section, reporting an invalid section
    pub fn try_set_at<'a>(
        &mut self,
        section: usize,
        value: impl Into<Value<'a>>,
        options: SetOptions,
    ) -> Result<(), DisplayError> {
        let section = self.layout.section(section)?;
        let mut patterns = [0u8; MAX_DISPLAY_SIZE];
        let patterns = &mut patterns[..section.size];
        render(value.into(), options, patterns);
        self.buffer.write(section.begin, patterns);
        Ok(())
    }

    /// Write segment patterns to section 0 as they are
    pub fn set_raw(&mut self, patterns: &[u8]) {
        self.set_raw_at(0, patterns);
    }

    /// Write segment patterns to a section as they are
    ///
    /// Only the first `size` patterns are used; a shorter slice leaves the
    /// rest of the section untouched.
    pub fn set_raw_at(&mut self, section: usize, patterns: &[u8]) {
        discard(self.try_set_raw_at(section, patterns));
    }

    /// Write segment patterns to a section, reporting an invalid section
    pub fn try_set_raw_at(&mut self, section: usize, patterns: &[u8]) -> Result<(), DisplayError> {
        let section = self.layout.section(section)?;
        let count = patterns.len().min(section.size);
        self.buffer.write(section.begin, &patterns[..count]);
        Ok(())
    }

    /// Write characters with explicit decimal points to section 0
    pub fn set_chars(&mut self, chars: &str, dots: &[bool]) {
        self.set_chars_at(0, chars, dots);
    }

    /// Write characters with explicit decimal points to a section
    ///
    /// One character and one dot flag per position. Missing characters
    /// render blank and missing flags leave the dot off.
    pub fn set_chars_at(&mut self, section: usize, chars: &str, dots: &[bool]) {
        discard(self.try_set_chars_at(section, chars, dots));
    }

    /// Write characters to a section, reporting an invalid section
    pub fn try_set_chars_at(
        &mut self,
        section: usize,
        chars: &str,
        dots: &[bool],
    ) -> Result<(), DisplayError> {
        let section = self.layout.section(section)?;
        let mut patterns = [0u8; MAX_DISPLAY_SIZE];
        let patterns = &mut patterns[..section.size];
        encode_with_dots(chars.chars().map(ascii_or_blank), dots, patterns);
        self.buffer.write(section.begin, patterns);
        Ok(())
    }

    /// Overwrite one position of section 0 with a raw pattern
    pub fn change_character(&mut self, index: usize, pattern: u8) {
        self.change_character_at(0, index, pattern);
    }

    /// Overwrite one position of a section with a raw pattern
    pub fn change_character_at(&mut self, section: usize, index: usize, pattern: u8) {
        discard(self.try_change_character_at(section, index, pattern));
    }

    /// Overwrite one position, reporting an invalid section or index
    pub fn try_change_character_at(
        &mut self,
        section: usize,
        index: usize,
        pattern: u8,
    ) -> Result<(), DisplayError> {
        let position = self.position(section, index)?;
        self.buffer.write_one(position, pattern);
        Ok(())
    }

    /// Turn the decimal point of one position of section 0 on or off
    pub fn change_dot(&mut self, index: usize, on: bool) {
        self.change_dot_at(0, index, on);
    }

    /// Turn the decimal point of one position of a section on or off
    pub fn change_dot_at(&mut self, section: usize, index: usize, on: bool) {
        discard(self.try_change_dot_at(section, index, on));
    }

    /// Change one decimal point, reporting an invalid section or index
    pub fn try_change_dot_at(
        &mut self,
        section: usize,
        index: usize,
        on: bool,
    ) -> Result<(), DisplayError> {
        let position = self.position(section, index)?;
        self.buffer.write_dot(position, on);
        Ok(())
    }

    /// Turn every segment off in the buffer, leaving the hardware alone
    pub fn clear_buffer(&mut self) {
        self.buffer.clear_pattern();
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Emit the buffer once
    pub fn update(&mut self) {
        self.driver.update(&self.buffer);
    }

    /// Turn the display off; the buffer is kept
    pub fn clear(&mut self) {
        self.driver.clear();
    }

    /// Show the buffer for `duration_ms`, then turn the display off
    pub fn show(&mut self, duration_ms: u32) {
        self.driver.show(&self.buffer, duration_ms);
    }

    /// Scroll text across the whole display
    ///
    /// Each window of `display_size` characters is shown for `speed_ms`.
    /// Text that already fits is shown once for `speed_ms × display_size`.
    /// Overwrites every section of the buffer and blocks until done.
    pub fn scroll(&mut self, text: &str, speed_ms: u32) {
        let size = self.display_size();
        let whole = Section { begin: 0, size };
        let length = text.chars().count();

        #[cfg(feature = "defmt")]
        defmt::trace!("scroll {} chars over {} digits", length, size);

        if length <= size {
            self.render_section(whole, Value::Text(text));
            self.driver
                .show(&self.buffer, speed_ms.saturating_mul(size as u32));
            return;
        }

        for start in 0..=length - size {
            self.render_section(whole, Value::Text(char_window(text, start, size)));
            self.driver.show(&self.buffer, speed_ms);
        }
    }

    /// Give the register and clock back
    pub fn release(self) -> (R, C) {
        self.driver.release()
    }

    fn position(&self, section: usize, index: usize) -> Result<usize, DisplayError> {
        self.layout.section(section)?.absolute(index)
    }

    fn render_section(&mut self, section: Section, value: Value<'_>) {
        let mut patterns = [0u8; MAX_DISPLAY_SIZE];
        let patterns = &mut patterns[..section.size];
        render(value, SetOptions::default(), patterns);
        self.buffer.write(section.begin, patterns);
    }
}

/// Drop a write error, logging it when defmt is enabled
fn discard(result: Result<(), DisplayError>) {
    if let Err(_error) = result {
        #[cfg(feature = "defmt")]
        defmt::debug!("display write ignored: {}", _error);
    }
}

/// `len` characters of `text` starting at character `start`
fn char_window(text: &str, start: usize, len: usize) -> &str {
    let mut bounds = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(core::iter::once(text.len()));
    let begin = bounds.nth(start).unwrap_or(text.len());
    let end = match len {
        0 => begin,
        _ => bounds.nth(len - 1).unwrap_or(text.len()),
    };
    &text[begin..end]
}
