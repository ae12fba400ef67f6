//! Velocity estimation for the release of a resize drag.
//!
//! Uses the impulse strategy: every pair of consecutive samples contributes
//! kinetic energy, and the accumulated energy is converted back into a
//! velocity. Compared to a plain first/last difference this weighs the most
//! recent motion more heavily, which is what a flick feels like.

use smallvec::SmallVec;

use crate::pointer::PointerSample;

/// Maximum number of samples retained.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window before the newest one contribute.
const HORIZON_MS: i64 = 100;

/// A gap this long between two samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

/// 1D velocity tracker over vertical pointer positions.
///
/// Samples are kept in chronological order and pruned on insert, so the
/// history never holds more than what the next estimate can use.
///
/// # Usage
/// ```
/// use collapse_foundation::{PointerSample, VelocityTracker1D};
///
/// let mut tracker = VelocityTracker1D::new();
/// tracker.add_sample(PointerSample::new(0.0, 0));
/// tracker.add_sample(PointerSample::new(50.0, 10));
/// tracker.add_sample(PointerSample::new(100.0, 20));
/// assert!(tracker.calculate_velocity() > 0.0); // px/sec, moving down
/// ```
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker1D {
    samples: SmallVec<[PointerSample; HISTORY_SIZE]>,
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer position.
    pub fn add_sample(&mut self, sample: PointerSample) {
        if let Some(last) = self.samples.last() {
            if sample.time_ms - last.time_ms > ASSUME_STOPPED_MS {
                self.samples.clear();
            }
        }
        self.samples
            .retain(|kept| sample.time_ms - kept.time_ms <= HORIZON_MS);
        if self.samples.len() == HISTORY_SIZE {
            self.samples.remove(0);
        }
        self.samples.push(sample);
    }

    pub fn add_movement(&mut self, y: f32, time_ms: i64) {
        self.add_sample(PointerSample::new(y, time_ms));
    }

    /// Number of samples currently retained.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Velocity in px/second. Positive means the pointer moves down.
    ///
    /// Returns 0.0 with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.samples.last() else {
            return 0.0;
        };

        let mut first = self.samples.len() - 1;
        while first > 0 {
            let older = self.samples[first - 1];
            let newer = self.samples[first];
            if newest.time_ms - older.time_ms > HORIZON_MS
                || newer.time_ms - older.time_ms > ASSUME_STOPPED_MS
            {
                break;
            }
            first -= 1;
        }

        let window = &self.samples[first..];
        if window.len() < 2 {
            return 0.0;
        }

        impulse_velocity(window) * 1000.0
    }

    /// Velocity in px/second, clamped to `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }

        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }

        velocity.clamp(-max_velocity, max_velocity)
    }

    /// Forgets every sample.
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

/// Velocity in px/ms from chronologically ordered samples.
fn impulse_velocity(window: &[PointerSample]) -> f32 {
    let mut work = 0.0f32;
    for (index, pair) in window.windows(2).enumerate() {
        let elapsed = (pair[1].time_ms - pair[0].time_ms) as f32;
        if elapsed == 0.0 {
            continue;
        }

        let v_curr = (pair[1].y - pair[0].y) / elapsed;
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if index == 0 {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1, solved for v.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
