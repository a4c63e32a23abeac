//! Tiered manual speed steps
//!
//! Steps are fine at low frequencies and coarse at high ones:
//!
//! | target        | up     | down    |
//! |---------------|--------|---------|
//! | 0             | 100    | 0       |
//! | up to 100     | +100   | to 0    |
//! | 100..1000     | +100   | -100    |
//! | 1000..5000    | +500   | -500    |
//! | 5000 and more | +1000  | -1000   |
//!
//! Exact thresholds: up uses `< 1000` and `< 5000`, down uses `> 5000`,
//! `> 1000` and `> 100`. Results are clamped to `max_hz`.

/// Next target when stepping up
pub fn step_up(hz: u32, max_hz: u32) -> u32 {
    let next = if hz == 0 {
        100
    } else if hz < 1000 {
        hz + 100
    } else if hz < 5000 {
        hz + 500
    } else {
        hz.saturating_add(1000)
    };
    next.min(max_hz)
}

/// Next target when stepping down
pub fn step_down(hz: u32, max_hz: u32) -> u32 {
    let next = if hz > 5000 {
        hz - 1000
    } else if hz > 1000 {
        hz - 500
    } else if hz > 100 {
        hz - 100
    } else {
        0
    };
    next.min(max_hz)
}
