//! Maps drag distance to resize progress and applies it to the panel.

use crate::surface::{
    AnimatableSet, HostSurface, PanelMode, ResizeHost, ResizeOutcome, ResizeTargets,
    SizingSurface,
};

/// Edge a resize gesture started from.
///
/// Decides how a raw drag delta is clamped: a collapsed panel can only grow,
/// an expanded one can only shrink. Progress always reads 0.0 for collapsed
/// and 1.0 for expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeOrigin {
    CollapsedOrigin,
    ExpandedOrigin,
}

impl ResizeOrigin {
    pub fn from_mode(mode: PanelMode) -> Self {
        match mode {
            PanelMode::Compact => ResizeOrigin::CollapsedOrigin,
            PanelMode::Expanded => ResizeOrigin::ExpandedOrigin,
        }
    }

    /// Clamps a raw delta into the usable range and returns the distance
    /// from the collapsed edge, in whole pixels.
    ///
    /// `CollapsedOrigin` accepts `[0, end_size]` as is. `ExpandedOrigin`
    /// accepts `[-end_size, 0]` and shifts it by `end_size`.
    pub fn clamp_delta(self, raw_delta: f32, end_size: i32) -> i32 {
        let end_size = end_size.max(0);
        let end = end_size as f32;
        match self {
            ResizeOrigin::CollapsedOrigin => raw_delta.clamp(0.0, end) as i32,
            ResizeOrigin::ExpandedOrigin => raw_delta.clamp(-end, 0.0) as i32 + end_size,
        }
    }

    /// Raw delta that [`clamp_delta`](Self::clamp_delta) maps back to
    /// `distance`. Used to re-anchor a drag on an offset already shown.
    pub fn delta_for_distance(self, distance: i32, end_size: i32) -> f32 {
        match self {
            ResizeOrigin::CollapsedOrigin => distance as f32,
            ResizeOrigin::ExpandedOrigin => (distance - end_size.max(0)) as f32,
        }
    }
}

/// Drives the sizing surfaces of one resize gesture.
///
/// Created once a drag passes the touch slop and consumed by
/// [`finish`](Self::finish), so no gesture can be finished twice.
pub struct ProgressCoordinator {
    origin: ResizeOrigin,
    active_index: usize,
    initialized: bool,
    primary: Box<dyn SizingSurface>,
    secondary: AnimatableSet,
}

impl ProgressCoordinator {
    pub fn new(origin: ResizeOrigin, active_index: usize, targets: ResizeTargets) -> Self {
        Self {
            origin,
            active_index,
            initialized: false,
            primary: targets.primary,
            secondary: targets.secondary,
        }
    }

    pub fn origin(&self) -> ResizeOrigin {
        self.origin
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Whether any progress has been applied yet.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn start_size(&self) -> i32 {
        0
    }

    pub fn end_size(&self) -> i32 {
        self.primary.full_extent()
    }

    /// How far the panel currently is from collapsed, in pixels.
    pub fn current_height<H: HostSurface + ?Sized>(&self, host: &H) -> i32 {
        host.occupied_extent() - self.primary.min_extent()
    }

    /// `distance / end_size` clamped to `[0, 1]`; 0.0 while the extent is
    /// still unknown (zero or negative).
    pub fn progress_for(&self, distance: i32) -> f32 {
        let end_size = self.end_size();
        if end_size <= 0 {
            return 0.0;
        }
        (distance as f32 / end_size as f32).clamp(0.0, 1.0)
    }

    /// Applies a raw drag delta and returns the progress it produced.
    pub fn apply_delta<H: HostSurface + ?Sized>(&mut self, host: &mut H, raw_delta: f32) -> f32 {
        let distance = self.origin.clamp_delta(raw_delta, self.end_size());
        let progress = self.progress_for(distance);
        self.apply(host, progress);
        progress
    }

    /// Shows `progress` on the primary surface, then on every secondary
    /// surface in order, then asks the host for a layout pass.
    pub fn apply<H: HostSurface + ?Sized>(&mut self, host: &mut H, progress: f32) {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        self.primary.animate(progress);
        self.secondary.animate_all(progress);
        self.initialized = true;

        host.request_relayout();
    }

    /// Ends the gesture and hands the outcome to the host.
    pub fn finish<H: ResizeHost + ?Sized>(self, host: &mut H, expanded: bool) -> ResizeOutcome {
        let outcome = ResizeOutcome {
            origin: self.origin,
            active_index: self.active_index,
            expanded,
        };
        host.finish_resize(outcome);
        outcome
    }
}

impl std::fmt::Debug for ProgressCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressCoordinator")
            .field("origin", &self.origin)
            .field("active_index", &self.active_index)
            .field("initialized", &self.initialized)
            .field("end_size", &self.end_size())
            .field("secondary", &self.secondary)
            .finish()
    }
}
