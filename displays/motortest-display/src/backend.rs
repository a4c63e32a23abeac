//! Display backend trait

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Communication,
    /// Row or column outside the panel
    InvalidCoordinates,
    /// `init` has not completed
    NotInitialized,
}

/// Character-addressed display
///
/// Drawing goes to a local buffer; nothing reaches the glass until
/// [`flush`](DisplayBackend::flush).
pub trait DisplayBackend {
    /// Blank the buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text starting at a character cell
    ///
    /// Text running past the right edge is clipped.
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Invert cells `start_col..end_col` of a row
    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError>;

    /// Send the buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// (columns, rows) in character cells
    fn dimensions(&self) -> (u8, u8);

    fn is_ready(&self) -> bool;
}
