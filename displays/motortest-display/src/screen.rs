//! Character grid for text-mode displays
//!
//! [`TextScreen`] turns the core's draw requests into a fixed grid of
//! lines. The header takes the top row and is shown inverted, the footer
//! takes the bottom row, and everything else stacks downwards through the
//! body rows in the order it was requested. Body content that does not fit
//! is dropped.

use heapless::String;
use motortest_core::traits::RenderSink;
use motortest_core::ui::VISIBLE_ROWS;

use crate::backend::{DisplayBackend, DisplayError};

/// Character rows (64 px / 8 px font)
pub const SCREEN_ROWS: usize = 8;

/// Character columns (128 px / 5 px font)
pub const SCREEN_COLS: usize = 25;

const HEADER_ROW: usize = 0;
const FIRST_BODY_ROW: usize = 1;
const FOOTER_ROW: usize = SCREEN_ROWS - 1;

type Line = String<SCREEN_COLS>;

/// Laid-out frame, ready to be drawn to a [`DisplayBackend`]
#[derive(Clone)]
pub struct TextScreen {
    lines: [Line; SCREEN_ROWS],
    /// Inverted cells per row (start_col, end_col)
    highlights: [Option<(u8, u8)>; SCREEN_ROWS],
    /// Next free body row
    cursor: usize,
    dirty: bool,
}

impl Default for TextScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl TextScreen {
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [None; SCREEN_ROWS],
            cursor: FIRST_BODY_ROW,
            dirty: true,
        }
    }

    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.highlights = [None; SCREEN_ROWS];
        self.cursor = FIRST_BODY_ROW;
        self.dirty = true;
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    pub fn highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Body rows still free
    pub fn rows_left(&self) -> usize {
        FOOTER_ROW.saturating_sub(self.cursor)
    }

    /// Draw every row, apply highlights, flush
    pub fn draw<B: DisplayBackend>(&self, backend: &mut B) -> Result<(), DisplayError> {
        if !backend.is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        backend.clear()?;
        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                backend.draw_text(row as u8, 0, line)?;
            }
        }
        for (row, highlight) in self.highlights.iter().enumerate() {
            if let Some((start, end)) = highlight {
                backend.invert_region(row as u8, *start, *end)?;
            }
        }
        backend.flush()
    }

    fn set_line(&mut self, row: usize, parts: &[&str]) {
        let line = &mut self.lines[row];
        line.clear();
        'fill: for part in parts {
            for ch in part.chars() {
                if line.push(ch).is_err() {
                    break 'fill;
                }
            }
        }
        self.dirty = true;
    }

    /// Claim the next body row; `None` once the body is full
    fn push_body(&mut self, parts: &[&str]) -> Option<usize> {
        if self.cursor >= FOOTER_ROW {
            return None;
        }
        let row = self.cursor;
        self.set_line(row, parts);
        self.cursor += 1;
        Some(row)
    }
}

impl RenderSink for TextScreen {
    fn begin(&mut self) {
        self.clear();
    }

    fn header(&mut self, text: &str) {
        self.set_line(HEADER_ROW, &[text]);
        self.highlights[HEADER_ROW] = Some((0, SCREEN_COLS as u8));
    }

    fn list(&mut self, items: &[&str], highlighted: usize, scroll_offset: usize) {
        for (index, item) in items
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(VISIBLE_ROWS)
        {
            let selected = index == highlighted;
            let marker = if selected { "> " } else { "  " };
            if let Some(row) = self.push_body(&[marker, item]) {
                if selected {
                    self.highlights[row] = Some((0, SCREEN_COLS as u8));
                }
            }
        }
    }

    fn prompt(&mut self, prompt: &str, value: &str) {
        self.push_body(&[prompt]);
        self.push_body(&["  ", value]);
    }

    fn status(&mut self, line: &str) {
        self.push_body(&[line]);
    }

    fn footer(&mut self, hint: &str) {
        self.set_line(FOOTER_ROW, &[hint]);
    }

    fn finish(&mut self) {
        self.dirty = true;
    }
}
