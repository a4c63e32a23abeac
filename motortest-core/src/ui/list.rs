//! Highlighted list with a scroll window

/// Rows a list shows at once
pub const VISIBLE_ROWS: usize = 3;

/// Selection and scroll position of a list
///
/// The highlighted index is clamped to the list (no wrap-around) and
/// the scroll offset always keeps it inside the visible window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    index: usize,
    scroll: usize,
}

impl ListCursor {
    /// Highlight `index` in a list of `len` items
    pub fn reset(&mut self, index: usize, len: usize) {
        self.index = index.min(len.saturating_sub(1));
        self.scroll = 0;
        self.follow();
    }

    /// Move up; returns whether the highlight moved
    pub fn up(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.follow();
        true
    }

    /// Move down; returns whether the highlight moved
    pub fn down(&mut self, len: usize) -> bool {
        if self.index + 1 >= len {
            return false;
        }
        self.index += 1;
        self.follow();
        true
    }

    /// Re-clamp after the list changed length
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
            self.follow();
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn follow(&mut self) {
        if self.index < self.scroll {
            self.scroll = self.index;
        }
        if self.index >= self.scroll + VISIBLE_ROWS {
            self.scroll = self.index + 1 - VISIBLE_ROWS;
        }
    }
}
