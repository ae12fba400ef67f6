//! Gesture thresholds shared by everything that resizes a panel by dragging.
//!
//! # DPI Considerations
//!
//! The constants are in logical pixels at density 1.0. Hosts running on
//! high-density touch screens should build their configuration with
//! [`ViewConfiguration::scaled`] so slop and fling thresholds keep the same
//! physical size.

/// Touch slop in logical pixels.
///
/// A pointer has to travel further than this from its down position before
/// the movement counts as a drag. Anything shorter is treated as a tap or
/// finger jitter and leaves the panel untouched.
///
/// Matches the common platform convention (Android uses 8dp for
/// `ViewConfiguration.TOUCH_SLOP`).
pub const TOUCH_SLOP: f32 = 8.0;

/// Minimum fling velocity in logical pixels per second.
///
/// Releases faster than this snap in the direction of travel no matter where
/// the panel currently is.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Velocity estimates are capped to this value before any decision is made.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Input thresholds a resize gesture is configured with.
///
/// Usually sourced from the host platform defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfiguration {
    /// Distance in pixels a pointer must travel before a drag starts.
    pub touch_slop: f32,
    /// Velocity in px/s above which a release counts as a fling.
    pub min_fling_velocity: f32,
    /// Velocity in px/s that estimates are capped to.
    pub max_fling_velocity: f32,
}

impl Default for ViewConfiguration {
    fn default() -> Self {
        Self {
            touch_slop: TOUCH_SLOP,
            min_fling_velocity: MIN_FLING_VELOCITY,
            max_fling_velocity: MAX_FLING_VELOCITY,
        }
    }
}

impl ViewConfiguration {
    /// Platform defaults scaled for a screen of the given density
    /// (1.0 for mdpi, 2.0 for xhdpi, ...).
    ///
    /// Non-finite or non-positive densities fall back to 1.0.
    pub fn scaled(density: f32) -> Self {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            1.0
        };
        Self {
            touch_slop: TOUCH_SLOP * density,
            min_fling_velocity: MIN_FLING_VELOCITY * density,
            max_fling_velocity: MAX_FLING_VELOCITY * density,
        }
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_fling_velocities(mut self, min: f32, max: f32) -> Self {
        self.min_fling_velocity = min;
        self.max_fling_velocity = max;
        self
    }
}
