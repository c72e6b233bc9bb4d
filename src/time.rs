//! Fixed-timestep game clock using an accumulator pattern.
//!
//! `draw_web()` calls at ~60fps with variable delta. GameTime converts
//! this into whole 100ms ticks, so passive income is credited at a fixed
//! cadence regardless of frame rate.

/// Game ticks per real-time second.
pub const TICKS_PER_SECOND: u32 = 10;

/// Seconds of game time covered by one tick.
pub const SECONDS_PER_TICK: f64 = 1.0 / TICKS_PER_SECOND as f64;

/// Longest frame gap fed into the accumulator. Larger gaps (tab in the
/// background) are dropped rather than replayed.
const MAX_FRAME_MS: f64 = 500.0;

/// Frame gaps above this are reported as lag.
const LAG_WARNING_MS: f64 = 1_000.0;

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks.
    accumulator: f64,
    last_timestamp: Option<f64>,
    /// Whether the most recent frame gap exceeded `LAG_WARNING_MS`.
    lagged: bool,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            last_timestamp: None,
            lagged: false,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()`), once per frame.
    /// Returns the number of whole ticks to process.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let raw = match self.last_timestamp {
            Some(prev) => now_ms - prev,
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);
        self.lagged = raw > LAG_WARNING_MS;

        self.accumulator += raw.clamp(0.0, MAX_FRAME_MS);
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        ticks
    }

    /// True if the last `update` followed a frame gap of more than a second.
    pub fn lagged(&self) -> bool {
        self.lagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut gt = GameTime::new(TICKS_PER_SECOND);
        assert_eq!(gt.update(1234.0), 0);
    }

    #[test]
    fn one_tick_at_100ms() {
        let mut gt = GameTime::new(TICKS_PER_SECOND);
        gt.update(0.0);
        assert_eq!(gt.update(100.0), 1);
    }

    #[test]
    fn remainder_carried_over() {
        let mut gt = GameTime::new(TICKS_PER_SECOND);
        gt.update(0.0);
        assert_eq!(gt.update(150.0), 1); // 50ms left over
        assert_eq!(gt.update(200.0), 1); // 50 + 50
        assert_eq!(gt.update(250.0), 0);
    }

    #[test]
    fn sub_tick_frames_accumulate() {
        let mut gt = GameTime::new(TICKS_PER_SECOND);
        gt.update(0.0);
        for i in 1..=6 {
            assert_eq!(gt.update(i as f64 * 16.0), 0);
        }
        assert_eq!(gt.update(112.0), 1);
    }

    #[test]
    fn large_gap_is_clamped_and_flagged() {
        let mut gt = GameTime::new(TICKS_PER_SECOND);
        gt.update(0.0);
        assert_eq!(gt.update(10_000.0), 5);
        assert!(gt.lagged());
        gt.update(10_016.0);
        assert!(!gt.lagged());
    }

    #[test]
    fn clock_going_backwards_adds_nothing() {
        let mut gt = GameTime::new(TICKS_PER_SECOND);
        gt.update(500.0);
        assert_eq!(gt.update(100.0), 0);
        assert_eq!(gt.update(150.0), 0);
    }

    #[test]
    fn steady_60fps() {
        let mut gt = GameTime::new(TICKS_PER_SECOND);
        gt.update(0.0);
        let mut total = 0u32;
        for i in 1..=60 {
            total += gt.update(i as f64 * 16.667);
        }
        assert!((9..=11).contains(&total), "expected ~10 ticks, got {}", total);
    }

    #[test]
    fn seconds_per_tick_matches_rate() {
        assert!((SECONDS_PER_TICK * TICKS_PER_SECOND as f64 - 1.0).abs() < 1e-12);
    }
}
