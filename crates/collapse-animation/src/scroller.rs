//! Timed scroll integration used to settle a panel after release.
//!
//! Port of the `startScroll` path of Android's `Scroller`: a fixed-duration
//! move from a start offset by a delta, eased with the viscous-fluid curve.

use std::sync::LazyLock;

/// Duration of a settle when none is given.
pub const DEFAULT_SETTLE_DURATION_MS: i64 = 250;

/// Controls how sharply the viscous-fluid curve decelerates.
const VISCOUS_FLUID_SCALE: f32 = 8.0;

/// e^-1, where the two halves of the curve meet.
const VISCOUS_FLUID_KNEE: f32 = 0.367_879_44;

/// `(normalize, offset)` so that the curve maps 0 to 0 and 1 to 1.
static VISCOUS_FLUID_NORMALIZATION: LazyLock<(f32, f32)> = LazyLock::new(|| {
    let normalize = 1.0 / viscous_fluid_raw(1.0);
    let offset = 1.0 - normalize * viscous_fluid_raw(1.0);
    (normalize, offset)
});

fn viscous_fluid_raw(x: f32) -> f32 {
    let x = x * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        let x = 1.0 - (1.0 - x).exp();
        VISCOUS_FLUID_KNEE + x * (1.0 - VISCOUS_FLUID_KNEE)
    }
}

/// Viscous-fluid easing of a linear time fraction in `[0, 1]`.
///
/// Starts slowly, accelerates, then decays exponentially into the target.
pub fn viscous_fluid(fraction: f32) -> f32 {
    let (normalize, offset) = *VISCOUS_FLUID_NORMALIZATION;
    let interpolated = normalize * viscous_fluid_raw(fraction.clamp(0.0, 1.0));
    if interpolated > 0.0 {
        interpolated + offset
    } else {
        interpolated
    }
}

/// Integrates a settle from `start` to `start + delta` over a fixed duration.
///
/// Offsets are whole pixels. The scroller never reads a clock; every time is
/// supplied by the caller in milliseconds.
#[derive(Clone, Debug)]
pub struct SettleScroller {
    start: i32,
    delta: i32,
    current: i32,
    start_time_ms: i64,
    duration_ms: i64,
    finished: bool,
}

impl Default for SettleScroller {
    fn default() -> Self {
        Self::new()
    }
}

impl SettleScroller {
    /// Creates a scroller that is already finished.
    pub fn new() -> Self {
        Self {
            start: 0,
            delta: 0,
            current: 0,
            start_time_ms: 0,
            duration_ms: 0,
            finished: true,
        }
    }

    /// Starts a settle with [`DEFAULT_SETTLE_DURATION_MS`].
    pub fn start_scroll(&mut self, start: i32, delta: i32, now_ms: i64) {
        self.start_scroll_with_duration(start, delta, now_ms, DEFAULT_SETTLE_DURATION_MS);
    }

    /// Starts a settle that lasts `duration_ms`, replacing any settle in flight.
    pub fn start_scroll_with_duration(
        &mut self,
        start: i32,
        delta: i32,
        now_ms: i64,
        duration_ms: i64,
    ) {
        self.start = start;
        self.delta = delta;
        self.current = start;
        self.start_time_ms = now_ms;
        self.duration_ms = duration_ms.max(0);
        self.finished = false;
    }

    /// Advances the integration to `now_ms`.
    ///
    /// Returns `false` if the scroller was already finished before this call.
    /// The call that reaches the duration snaps to the final offset, marks
    /// the scroller finished and still returns `true`.
    pub fn compute_offset(&mut self, now_ms: i64) -> bool {
        if self.finished {
            return false;
        }

        let elapsed = self.elapsed_ms(now_ms);
        if elapsed < self.duration_ms {
            let fraction = elapsed as f32 / self.duration_ms as f32;
            let eased = viscous_fluid(fraction);
            self.current = self.start + (eased * self.delta as f32).round() as i32;
        } else {
            self.current = self.final_offset();
            self.finished = true;
        }
        true
    }

    /// Stops the integration where it is; [`current`](Self::current) keeps
    /// the last computed offset.
    pub fn force_finished(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    /// Offset the integration ends at.
    pub fn final_offset(&self) -> i32 {
        self.start + self.delta
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    /// Time since the settle started, never negative.
    pub fn elapsed_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.start_time_ms).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viscous_fluid_endpoints() {
        assert_eq!(viscous_fluid(0.0), 0.0);
        assert!((viscous_fluid(1.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn viscous_fluid_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let value = viscous_fluid(i as f32 / 100.0);
            assert!(
                value >= prev,
                "curve decreased at step {}: {} < {}",
                i,
                value,
                prev
            );
            prev = value;
        }
    }

    #[test]
    fn viscous_fluid_clamps_input() {
        assert_eq!(viscous_fluid(-1.0), 0.0);
        assert!((viscous_fluid(2.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn new_scroller_is_finished() {
        let mut scroller = SettleScroller::new();
        assert!(scroller.is_finished());
        assert!(!scroller.compute_offset(100));
    }

    #[test]
    fn settle_reaches_final_offset_at_duration() {
        let mut scroller = SettleScroller::new();
        scroller.start_scroll(40, 160, 1_000);

        assert!(scroller.compute_offset(1_000));
        assert_eq!(scroller.current(), 40);

        assert!(scroller.compute_offset(1_100));
        assert!(scroller.current() > 40 && scroller.current() < 200);
        assert!(!scroller.is_finished());

        assert!(scroller.compute_offset(1_000 + DEFAULT_SETTLE_DURATION_MS));
        assert_eq!(scroller.current(), 200);
        assert!(scroller.is_finished());

        assert!(!scroller.compute_offset(1_400));
    }

    #[test]
    fn negative_delta_moves_backwards() {
        let mut scroller = SettleScroller::new();
        scroller.start_scroll(120, -120, 0);

        scroller.compute_offset(50);
        assert!(scroller.current() < 120);
        assert!(scroller.current() >= 0);
        assert_eq!(scroller.final_offset(), 0);
    }

    #[test]
    fn force_finished_keeps_current_offset() {
        let mut scroller = SettleScroller::new();
        scroller.start_scroll(0, 100, 0);
        scroller.compute_offset(100);
        let current = scroller.current();

        scroller.force_finished();

        assert!(scroller.is_finished());
        assert_eq!(scroller.current(), current);
        assert!(!scroller.compute_offset(200));
        assert_eq!(scroller.current(), current);
    }

    #[test]
    fn zero_duration_finishes_on_first_frame() {
        let mut scroller = SettleScroller::new();
        scroller.start_scroll_with_duration(10, 50, 0, 0);
        assert!(scroller.compute_offset(0));
        assert_eq!(scroller.current(), 60);
        assert!(scroller.is_finished());
    }

    #[test]
    fn elapsed_is_never_negative() {
        let mut scroller = SettleScroller::new();
        scroller.start_scroll(0, 10, 500);
        assert_eq!(scroller.elapsed_ms(400), 0);
        assert_eq!(scroller.elapsed_ms(600), 100);
    }
}
