//! Two-stage debounce for a single button
//!
//! A raw transition restarts the debounce timer. Once the raw level has
//! held for longer than the window and differs from the stable level, it
//! is committed. A commit into the pressed (low) level latches a one-shot
//! press edge.

/// Debounce and long-press state for one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    /// Raw sample from the last poll (`true` = low = pressed)
    last_raw_low: bool,
    /// Debounced level
    stable_low: bool,
    /// Time of the last raw transition
    debounce_ms: u32,
    /// One-shot press edge
    press_latched: bool,
    /// One-shot long press
    long_latched: bool,
    /// Long press already fired for this hold
    long_fired: bool,
    /// Hold start, 0 = not held
    press_start_ms: u32,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ButtonState {
    /// Create a button whose stable level starts at `raw_low`
    ///
    /// Seeding from the current reading means a key held at power-on is
    /// reported as held (for boot chords) without producing a press edge.
    pub const fn new(raw_low: bool) -> Self {
        Self {
            last_raw_low: raw_low,
            stable_low: raw_low,
            debounce_ms: 0,
            press_latched: false,
            long_latched: false,
            long_fired: false,
            press_start_ms: 0,
        }
    }

    /// Feed one raw sample
    pub fn update(&mut self, raw_low: bool, now_ms: u32, window_ms: u32) {
        if raw_low != self.last_raw_low {
            self.debounce_ms = now_ms;
        }

        if now_ms.wrapping_sub(self.debounce_ms) > window_ms && raw_low != self.stable_low {
            self.stable_low = raw_low;
            if raw_low {
                self.press_latched = true;
            }
        }

        self.last_raw_low = raw_low;
    }

    /// Track hold time on the stable level and fire the long press once
    pub fn update_long_press(&mut self, now_ms: u32, threshold_ms: u32) {
        if !self.stable_low {
            self.press_start_ms = 0;
            self.long_fired = false;
            self.long_latched = false;
            return;
        }

        if self.press_start_ms == 0 {
            // 0 is the "not held" sentinel
            self.press_start_ms = now_ms.max(1);
        } else if now_ms.wrapping_sub(self.press_start_ms) > threshold_ms && !self.long_fired {
            self.long_latched = true;
            self.long_fired = true;
        }
    }

    /// Drop an unconsumed press edge (edges live for one tick)
    pub fn clear_edge(&mut self) {
        self.press_latched = false;
    }

    /// Return and clear the press edge
    pub fn consume_press(&mut self) -> bool {
        core::mem::take(&mut self.press_latched)
    }

    /// Return and clear the long press
    pub fn consume_long_press(&mut self) -> bool {
        core::mem::take(&mut self.long_latched)
    }

    /// Debounced level (`true` = pressed)
    pub fn is_low(&self) -> bool {
        self.stable_low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u32 = 50;

    /// Hold `raw_low` from `from` to `to` inclusive, sampling every 5ms
    fn hold(button: &mut ButtonState, raw_low: bool, from: u32, to: u32) {
        let mut t = from;
        while t <= to {
            button.update(raw_low, t, WINDOW);
            t += 5;
        }
    }

    #[test]
    fn test_press_commits_after_window() {
        let mut b = ButtonState::new(false);
        hold(&mut b, true, 100, 150);
        // exactly 50ms held: not yet (strictly greater)
        assert!(!b.is_low());
        b.update(true, 151, WINDOW);
        assert!(b.is_low());
        assert!(b.consume_press());
        assert!(!b.consume_press());
    }

    #[test]
    fn test_release_does_not_latch_edge() {
        let mut b = ButtonState::new(true);
        hold(&mut b, false, 100, 200);
        assert!(!b.is_low());
        assert!(!b.consume_press());
    }

    #[test]
    fn test_glitch_rejected() {
        let mut b = ButtonState::new(false);
        hold(&mut b, true, 100, 130);
        hold(&mut b, false, 135, 300);
        assert!(!b.is_low());
        assert!(!b.consume_press());
    }

    #[test]
    fn test_seeded_level_has_no_edge() {
        let b = &mut ButtonState::new(true);
        assert!(b.is_low());
        assert!(!b.consume_press());
    }

    #[test]
    fn test_long_press_fires_once() {
        let mut b = ButtonState::new(false);
        let mut t = 100;
        let mut fired = 0;
        while t < 2000 {
            b.update(true, t, WINDOW);
            b.update_long_press(t, 600);
            if b.consume_long_press() {
                fired += 1;
            }
            t += 5;
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_long_press_threshold_is_measured_from_stable_press() {
        let mut b = ButtonState::new(false);
        let mut t = 1000;
        // stable at 1055, long press must not fire before 1055 + 600
        while t <= 1655 {
            b.update(true, t, WINDOW);
            b.update_long_press(t, 600);
            assert!(!b.consume_long_press(), "fired early at {t}");
            t += 5;
        }
        b.update(true, 1660, WINDOW);
        b.update_long_press(1660, 600);
        assert!(b.consume_long_press());
    }

    #[test]
    fn test_release_resets_long_press() {
        let mut b = ButtonState::new(false);
        let mut t = 100;
        while t < 900 {
            b.update(true, t, WINDOW);
            b.update_long_press(t, 600);
            t += 5;
        }
        // latched but never consumed; release must clear it
        while t < 1100 {
            b.update(false, t, WINDOW);
            b.update_long_press(t, 600);
            t += 5;
        }
        assert!(!b.consume_long_press());
    }
}
