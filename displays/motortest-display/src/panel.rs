//! Render sink bound to a physical display

use motortest_core::traits::RenderSink;

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::TextScreen;

/// [`TextScreen`] plus the backend it is pushed to on `finish`
pub struct Panel<B> {
    screen: TextScreen,
    backend: B,
    last_error: Option<DisplayError>,
}

impl<B: DisplayBackend> Panel<B> {
    pub fn new(backend: B) -> Self {
        Self {
            screen: TextScreen::new(),
            backend,
            last_error: None,
        }
    }

    pub fn screen(&self) -> &TextScreen {
        &self.screen
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Error from the most recent push, cleared by the next good one
    pub fn last_error(&self) -> Option<DisplayError> {
        self.last_error
    }
}

impl<B: DisplayBackend> RenderSink for Panel<B> {
    fn begin(&mut self) {
        self.screen.begin();
    }

    fn header(&mut self, text: &str) {
        self.screen.header(text);
    }

    fn list(&mut self, items: &[&str], highlighted: usize, scroll_offset: usize) {
        self.screen.list(items, highlighted, scroll_offset);
    }

    fn prompt(&mut self, prompt: &str, value: &str) {
        self.screen.prompt(prompt, value);
    }

    fn status(&mut self, line: &str) {
        self.screen.status(line);
    }

    fn footer(&mut self, hint: &str) {
        self.screen.footer(hint);
    }

    fn finish(&mut self) {
        self.screen.finish();
        match self.screen.draw(&mut self.backend) {
            Ok(()) => {
                self.screen.mark_clean();
                self.last_error = None;
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Display push failed: {:?}", e);
                self.last_error = Some(e);
            }
        }
    }
}
