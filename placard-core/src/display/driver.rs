use heapless::Vec;

use crate::config::{BrightnessThresholds, Tunables};
use crate::store::MAX_MESSAGE_LEN;
use crate::traits::{Brightness, CharacterDisplay, Console, DisplayError, Wake};

use super::brightness::brightness_for;

/// Widest grid the renderer supports
pub const MAX_COLS: usize = 40;

/// Padding, longest message, padding
const SCROLL_CAPACITY: usize = MAX_MESSAGE_LEN + 2 * MAX_COLS;

/// How a render call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderOutcome {
    /// Text was fully shown
    Completed,
    /// Input arrived during a scroll step
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scroll {
    Finished,
    Interrupted,
    OutOfTime,
}

/// Renders messages onto a [`CharacterDisplay`]
///
/// Owns the row-alternation state for scrolling so successive scrolls wear
/// both rows evenly.
pub struct MessageDisplay<D> {
    display: D,
    scroll_row: u8,
    scroll_step_ms: u32,
    thresholds: BrightnessThresholds,
    brightness: Option<Brightness>,
}

impl<D: CharacterDisplay> MessageDisplay<D> {
    pub fn new(display: D, tunables: &Tunables, thresholds: BrightnessThresholds) -> Self {
        Self {
            display,
            scroll_row: 0,
            scroll_step_ms: tunables.scroll_step_ms,
            thresholds,
            brightness: None,
        }
    }

    /// Power the display on and clear it
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.display.set_power(true)?;
        self.display.clear()
    }

    fn cols(&self) -> usize {
        usize::from(self.display.dimensions().0).clamp(1, MAX_COLS)
    }

    fn rows(&self) -> usize {
        usize::from(self.display.dimensions().1).max(1)
    }

    /// Characters that fit on the grid at once
    pub fn capacity(&self) -> usize {
        self.cols() * self.rows()
    }

    /// Whether `text` is drawn directly rather than scrolled
    pub fn fits_direct(&self, text: &str) -> bool {
        text.chars().count() <= self.capacity()
    }

    /// Draw `text` row by row from the top-left cell
    ///
    /// Anything beyond the grid capacity is dropped.
    pub fn render_direct(&mut self, text: &str) -> Result<(), DisplayError> {
        let cols = self.cols();
        let rows = self.rows();
        let mut cells: Vec<u8, SCROLL_CAPACITY> = Vec::new();
        for glyph in glyphs(text).take(self.capacity()) {
            if cells.push(glyph).is_err() {
                break;
            }
        }

        self.display.clear()?;
        for (row, chunk) in cells.chunks(cols).take(rows).enumerate() {
            self.display.set_cursor(0, row as u8)?;
            self.display.write_str(as_text(chunk))?;
        }
        Ok(())
    }

    /// Scroll `text` right to left through one row
    ///
    /// The text enters from the right edge and leaves on the left, advancing
    /// one column per step. Returns [`RenderOutcome::Interrupted`] as soon as
    /// input is pending; the next call then reuses the same row.
    pub async fn render_scroll<C: Console>(
        &mut self,
        text: &str,
        console: &mut C,
    ) -> Result<RenderOutcome, DisplayError> {
        let mut budget_ms = u32::MAX;
        match self.scroll(text, console, &mut budget_ms).await? {
            Scroll::Interrupted => Ok(RenderOutcome::Interrupted),
            Scroll::Finished | Scroll::OutOfTime => Ok(RenderOutcome::Completed),
        }
    }

    /// Keep `text` on screen for `hold_ms` after it was rendered
    ///
    /// Text that fits stays where [`render`](Self::render) put it. Longer text
    /// keeps scrolling until the time is up, so part of it is always visible.
    /// Returns [`Wake::Input`] as soon as input is pending.
    pub async fn hold<C: Console>(
        &mut self,
        text: &str,
        hold_ms: u32,
        console: &mut C,
    ) -> Result<Wake, DisplayError> {
        if self.fits_direct(text) {
            return Ok(console.sleep_ms(hold_ms).await);
        }

        let mut budget_ms = hold_ms;
        while budget_ms > 0 {
            if self.scroll(text, console, &mut budget_ms).await? == Scroll::Interrupted {
                return Ok(Wake::Input);
            }
        }
        Ok(Wake::Elapsed)
    }

    /// One scroll pass, spending at most `budget_ms` on steps
    ///
    /// The row alternates only when the pass reaches its last window.
    async fn scroll<C: Console>(
        &mut self,
        text: &str,
        console: &mut C,
        budget_ms: &mut u32,
    ) -> Result<Scroll, DisplayError> {
        let cols = self.cols();
        let mut buffer: Vec<u8, SCROLL_CAPACITY> = Vec::new();
        let _ = buffer.resize(cols, b' ');
        for glyph in glyphs(text).take(MAX_MESSAGE_LEN) {
            let _ = buffer.push(glyph);
        }
        let _ = buffer.resize(buffer.len() + cols, b' ');

        let row = self.scroll_row;
        self.display.clear()?;
        for window in buffer.windows(cols) {
            if *budget_ms == 0 {
                return Ok(Scroll::OutOfTime);
            }
            self.display.set_cursor(0, row)?;
            self.display.write_str(as_text(window))?;

            let step = self.scroll_step_ms.max(1).min(*budget_ms);
            *budget_ms -= step;
            if console.sleep_ms(step).await == Wake::Input {
                return Ok(Scroll::Interrupted);
            }
        }

        self.scroll_row = (row + 1) % self.rows() as u8;
        Ok(Scroll::Finished)
    }

    /// Draw directly if `text` fits, otherwise scroll it
    pub async fn render<C: Console>(
        &mut self,
        text: &str,
        console: &mut C,
    ) -> Result<RenderOutcome, DisplayError> {
        if self.fits_direct(text) {
            self.render_direct(text)?;
            Ok(RenderOutcome::Completed)
        } else {
            self.render_scroll(text, console).await
        }
    }

    /// Pick the brightness level for an ambient reading and apply it
    pub fn adjust_brightness(&mut self, reading: u16) -> Result<Brightness, DisplayError> {
        let level = brightness_for(reading, &self.thresholds);
        self.display.set_brightness(level)?;
        self.brightness = Some(level);
        Ok(level)
    }

    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear()
    }

    /// Clear and switch off (power save)
    pub fn blank(&mut self) -> Result<(), DisplayError> {
        self.display.clear()?;
        self.display.set_power(false)
    }

    /// Switch back on after [`blank`](Self::blank)
    pub fn wake(&mut self) -> Result<(), DisplayError> {
        self.display.set_power(true)
    }

    /// Row the next scroll will use
    pub fn scroll_row(&self) -> u8 {
        self.scroll_row
    }

    /// Last applied brightness level
    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    pub fn inner(&self) -> &D {
        &self.display
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

/// Display cells for `text`; anything outside printable ASCII becomes `?`
fn glyphs(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.chars().map(|c| {
        if c.is_ascii() && !c.is_ascii_control() {
            c as u8
        } else {
            b'?'
        }
    })
}

fn as_text(cells: &[u8]) -> &str {
    // Cells only ever hold printable ASCII
    core::str::from_utf8(cells).unwrap_or("")
}
