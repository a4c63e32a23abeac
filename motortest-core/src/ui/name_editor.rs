//! Character-by-character profile name editor
//!
//! Each cell holds a [`Glyph`] from a fixed, ordered alphabet. Up and
//! Down cycle the cell under the cursor forward and backward through the
//! alphabet with wrap-around; the [`Glyph::End`] entry lets the same
//! controls terminate entry.

use core::fmt::Write;

use heapless::String;

use crate::config::MAX_NAME_LEN;
use crate::profile::{name_from, ProfileName};

/// Name used when entry finishes with nothing typed
pub const FALLBACK_NAME: &str = "Motor";

/// One editor cell value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    Char(char),
    /// Finish entry here
    End,
}

/// Cycle order: A-Z, 0-9, space, '-', '_', End
pub const ALPHABET_LEN: usize = 26 + 10 + 3 + 1;

fn glyph_at(index: usize) -> Glyph {
    match index {
        0..=25 => Glyph::Char((b'A' + index as u8) as char),
        26..=35 => Glyph::Char((b'0' + (index - 26) as u8) as char),
        36 => Glyph::Char(' '),
        37 => Glyph::Char('-'),
        38 => Glyph::Char('_'),
        _ => Glyph::End,
    }
}

fn index_of(glyph: Glyph) -> usize {
    (0..ALPHABET_LEN)
        .find(|&i| glyph_at(i) == glyph)
        .unwrap_or(0)
}

const FIRST: Glyph = Glyph::Char('A');

/// Rendered editor line, wide enough for every cell plus the cursor box
pub type EditorLine = String<{ MAX_NAME_LEN + 6 }>;

/// Name editor state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEditor {
    cells: [Option<Glyph>; MAX_NAME_LEN],
    cursor: usize,
}

impl Default for NameEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl NameEditor {
    pub const fn new() -> Self {
        Self {
            cells: [None; MAX_NAME_LEN],
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Glyph under the cursor (`None` = untouched)
    pub fn current(&self) -> Option<Glyph> {
        self.cells[self.cursor]
    }

    /// Cycle the current cell forward; an untouched cell becomes 'A'
    pub fn up(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = Some(match *cell {
            None => FIRST,
            Some(g) => glyph_at((index_of(g) + 1) % ALPHABET_LEN),
        });
    }

    /// Cycle the current cell backward; an untouched cell becomes 'A'
    pub fn down(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = Some(match *cell {
            None => FIRST,
            Some(g) => glyph_at((index_of(g) + ALPHABET_LEN - 1) % ALPHABET_LEN),
        });
    }

    /// Accept the current cell
    ///
    /// Returns the finished name when the cell holds `End`, or when the
    /// last position is accepted. Otherwise the cursor advances.
    pub fn confirm(&mut self) -> Option<ProfileName> {
        match self.cells[self.cursor] {
            Some(Glyph::End) => return Some(self.finish()),
            None => self.cells[self.cursor] = Some(FIRST),
            Some(Glyph::Char(_)) => {}
        }

        if self.cursor + 1 < MAX_NAME_LEN {
            self.cursor += 1;
            None
        } else {
            Some(self.finish())
        }
    }

    fn finish(&self) -> ProfileName {
        let mut raw: String<MAX_NAME_LEN> = String::new();
        for cell in &self.cells[..=self.cursor] {
            if let Some(Glyph::Char(c)) = cell {
                let _ = raw.push(*c);
            }
        }

        if raw.is_empty() {
            name_from(FALLBACK_NAME)
        } else {
            name_from(&raw)
        }
    }

    /// Text for display: accepted cells, then the cursor cell in brackets
    ///
    /// When `blink_on` is false an untouched or character cursor cell is
    /// drawn as '_' instead.
    pub fn line(&self, blink_on: bool) -> EditorLine {
        let mut line = EditorLine::new();
        for cell in &self.cells[..self.cursor] {
            if let Some(Glyph::Char(c)) = cell {
                let _ = line.push(*c);
            }
        }

        let _ = match self.current() {
            Some(Glyph::End) => line.push_str("[END]"),
            Some(Glyph::Char(c)) if blink_on => write!(line, "[{}]", c).map_err(|_| ()),
            None if blink_on => line.push_str("[ ]"),
            _ => line.push_str("[_]"),
        };
        line
    }
}
