//! Tachometer pulse counter
//!
//! The FG edge handler runs outside the control loop and may interleave
//! with it at any point. It only ever calls [`PulseCounter::record`]; the
//! loop reads the count with [`PulseCounter::take`], which swaps in zero
//! so no pulse is lost or counted twice.

use portable_atomic::{AtomicU32, Ordering};

/// Pulse counter shared between the edge handler and the control loop
pub struct PulseCounter {
    pulses: AtomicU32,
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self {
            pulses: AtomicU32::new(0),
        }
    }

    /// Count one tachometer edge
    #[inline]
    pub fn record(&self) {
        self.pulses.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the count and reset it to zero
    pub fn take(&self) -> u32 {
        self.pulses.swap(0, Ordering::AcqRel)
    }

    #[cfg(test)]
    pub(crate) fn record_many(&self, count: u32) {
        self.pulses.fetch_add(count, Ordering::Relaxed);
    }

    /// Current count, without resetting
    pub fn peek(&self) -> u32 {
        self.pulses.load(Ordering::Relaxed)
    }
}

impl Default for PulseCounter {
    fn default() -> Self {
        Self::new()
    }
}
