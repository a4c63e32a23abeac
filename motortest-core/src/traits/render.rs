//! Render adapter contract
//!
//! The UI navigator describes *what* to show as a short sequence of draw
//! requests. The adapter owns fonts, coordinates and pixels.

/// Receiver of draw requests for one frame
pub trait RenderSink {
    /// Start a new frame (clear previous content)
    fn begin(&mut self);

    /// Screen title
    fn header(&mut self, text: &str);

    /// Scrollable list with one highlighted entry
    ///
    /// `scroll_offset` is the index of the first visible item.
    fn list(&mut self, items: &[&str], highlighted: usize, scroll_offset: usize);

    /// Two-line prompt/value pair used by wizard steps
    fn prompt(&mut self, prompt: &str, value: &str);

    /// One line of status text; successive calls stack downwards
    fn status(&mut self, line: &str);

    /// Help hint at the bottom of the screen
    fn footer(&mut self, hint: &str);

    /// Frame complete; push to the display
    fn finish(&mut self);
}
