//! Capabilities the resize engine consumes from its host.
//!
//! The engine never lays anything out itself. It asks the host how tall the
//! panel currently is, tells sizing surfaces which progress to show, and
//! reports the final outcome back.

use collapse_foundation::ViewConfiguration;
use smallvec::SmallVec;

use crate::progress::ResizeOrigin;

/// Anything that can animate between its collapsed and expanded size.
pub trait SizingSurface {
    /// Shows the surface at `progress`, where 0.0 is fully collapsed and 1.0
    /// fully expanded. Must be absolute: repeating a value changes nothing.
    fn animate(&mut self, progress: f32);

    /// Extent in pixels when fully collapsed.
    fn min_extent(&self) -> i32;

    /// Extent in pixels the surface grows by between collapsed and expanded.
    fn full_extent(&self) -> i32;
}

/// The panel being resized.
pub trait HostSurface {
    /// Extent the panel currently occupies in its parent, in pixels.
    fn occupied_extent(&self) -> i32;

    fn request_relayout(&mut self);

    fn schedule_redraw(&mut self);

    /// Input thresholds, usually the platform defaults.
    fn view_configuration(&self) -> ViewConfiguration {
        ViewConfiguration::default()
    }
}

/// Which layout the panel's grid is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelMode {
    /// A single row (the active week).
    Compact,
    /// Every row (the whole month).
    Expanded,
}

/// The panel's own view-mode state.
pub trait GridModel {
    fn current_mode(&self) -> PanelMode;

    /// Toggles between [`PanelMode::Compact`] and [`PanelMode::Expanded`].
    fn switch_mode(&mut self);

    /// Index of the row that stays visible in compact mode.
    fn active_row_index(&self) -> usize;

    /// Rebuilds the row surfaces for the current mode.
    fn rebuild_rows(&mut self);
}

/// Everything a resize gesture needs from the panel.
pub trait ResizeHost: HostSurface + GridModel {
    /// Surfaces to animate for a gesture starting at `origin`.
    ///
    /// Called once per gesture, after the grid was switched to its expanded
    /// layout, so every row to animate already exists.
    fn resize_targets(&mut self, origin: ResizeOrigin, active_index: usize) -> ResizeTargets;

    /// Commits the outcome of a finished gesture, typically by settling the
    /// grid in the matching mode and dropping interim animation state.
    fn finish_resize(&mut self, outcome: ResizeOutcome);
}

/// Ordered secondary surfaces that follow the primary surface's progress.
#[derive(Default)]
pub struct AnimatableSet {
    surfaces: SmallVec<[Box<dyn SizingSurface>; 4]>,
}

impl AnimatableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, surface: impl SizingSurface + 'static) {
        self.surfaces.push(Box::new(surface));
    }

    pub fn push_boxed(&mut self, surface: Box<dyn SizingSurface>) {
        self.surfaces.push(surface);
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Animates every surface to `progress` in insertion order.
    pub fn animate_all(&mut self, progress: f32) {
        for surface in self.surfaces.iter_mut() {
            surface.animate(progress);
        }
    }
}

impl std::fmt::Debug for AnimatableSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatableSet")
            .field("len", &self.surfaces.len())
            .finish()
    }
}

impl FromIterator<Box<dyn SizingSurface>> for AnimatableSet {
    fn from_iter<I: IntoIterator<Item = Box<dyn SizingSurface>>>(iter: I) -> Self {
        Self {
            surfaces: iter.into_iter().collect(),
        }
    }
}

/// The surfaces a single gesture animates.
pub struct ResizeTargets {
    /// Drives the panel's extent and defines the gesture's pixel range.
    pub primary: Box<dyn SizingSurface>,
    pub secondary: AnimatableSet,
}

impl ResizeTargets {
    pub fn new(primary: impl SizingSurface + 'static) -> Self {
        Self {
            primary: Box::new(primary),
            secondary: AnimatableSet::new(),
        }
    }

    pub fn with_secondary(mut self, surface: impl SizingSurface + 'static) -> Self {
        self.secondary.push(surface);
        self
    }
}

impl std::fmt::Debug for ResizeTargets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeTargets")
            .field("primary_min_extent", &self.primary.min_extent())
            .field("primary_full_extent", &self.primary.full_extent())
            .field("secondary", &self.secondary)
            .finish()
    }
}

/// How a gesture ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub origin: ResizeOrigin,
    pub active_index: usize,
    pub expanded: bool,
}

impl ResizeOutcome {
    /// Mode the panel should be committed to.
    pub fn mode(&self) -> PanelMode {
        if self.expanded {
            PanelMode::Expanded
        } else {
            PanelMode::Compact
        }
    }
}
