//! Fake calendar panel for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use collapse_foundation::ViewConfiguration;

use crate::progress::ResizeOrigin;
use crate::surface::{
    GridModel, HostSurface, PanelMode, ResizeHost, ResizeOutcome, ResizeTargets, SizingSurface,
};

type AnimationLog = Rc<RefCell<Vec<(usize, f32)>>>;

/// Surface whose extent is `min + full * progress`, written to a shared cell.
pub(crate) struct FakeSurface {
    id: usize,
    min: i32,
    full: i32,
    height: Rc<Cell<i32>>,
    log: AnimationLog,
}

impl SizingSurface for FakeSurface {
    fn animate(&mut self, progress: f32) {
        self.height
            .set(self.min + (self.full as f32 * progress).round() as i32);
        self.log.borrow_mut().push((self.id, progress));
    }

    fn min_extent(&self) -> i32 {
        self.min
    }

    fn full_extent(&self) -> i32 {
        self.full
    }
}

/// Panel with a week row of `min` pixels that grows by `full` pixels when
/// showing the whole month.
pub(crate) struct FakePanel {
    pub(crate) mode: PanelMode,
    pub(crate) active_row: usize,
    pub(crate) config: ViewConfiguration,
    pub(crate) relayouts: usize,
    pub(crate) redraws: usize,
    pub(crate) mode_switches: usize,
    pub(crate) rows_rebuilt: usize,
    pub(crate) targets_built: usize,
    pub(crate) outcomes: Vec<ResizeOutcome>,
    min: i32,
    full: i32,
    secondary_rows: usize,
    height: Rc<Cell<i32>>,
    log: AnimationLog,
}

impl FakePanel {
    pub(crate) fn compact(min: i32, full: i32) -> Self {
        Self::with_mode(PanelMode::Compact, min, full, min)
    }

    pub(crate) fn expanded(min: i32, full: i32) -> Self {
        Self::with_mode(PanelMode::Expanded, min, full, min + full)
    }

    fn with_mode(mode: PanelMode, min: i32, full: i32, height: i32) -> Self {
        Self {
            mode,
            active_row: 2,
            config: ViewConfiguration::default(),
            relayouts: 0,
            redraws: 0,
            mode_switches: 0,
            rows_rebuilt: 0,
            targets_built: 0,
            outcomes: Vec::new(),
            min,
            full,
            secondary_rows: 0,
            height: Rc::new(Cell::new(height)),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub(crate) fn with_secondary_rows(mut self, rows: usize) -> Self {
        self.secondary_rows = rows;
        self
    }

    pub(crate) fn height(&self) -> i32 {
        self.height.get()
    }

    /// Distance from the collapsed extent.
    pub(crate) fn progress_px(&self) -> i32 {
        self.height.get() - self.min
    }

    /// Every `(surface id, progress)` animated so far; the primary is id 0.
    pub(crate) fn animations(&self) -> Vec<(usize, f32)> {
        self.log.borrow().clone()
    }

    fn surface(&self, id: usize, height: Rc<Cell<i32>>) -> FakeSurface {
        FakeSurface {
            id,
            min: self.min,
            full: self.full,
            height,
            log: Rc::clone(&self.log),
        }
    }
}

impl HostSurface for FakePanel {
    fn occupied_extent(&self) -> i32 {
        self.height.get()
    }

    fn request_relayout(&mut self) {
        self.relayouts += 1;
    }

    fn schedule_redraw(&mut self) {
        self.redraws += 1;
    }

    fn view_configuration(&self) -> ViewConfiguration {
        self.config
    }
}

impl GridModel for FakePanel {
    fn current_mode(&self) -> PanelMode {
        self.mode
    }

    fn switch_mode(&mut self) {
        self.mode_switches += 1;
        self.mode = match self.mode {
            PanelMode::Compact => PanelMode::Expanded,
            PanelMode::Expanded => PanelMode::Compact,
        };
    }

    fn active_row_index(&self) -> usize {
        self.active_row
    }

    fn rebuild_rows(&mut self) {
        self.rows_rebuilt += 1;
    }
}

impl ResizeHost for FakePanel {
    fn resize_targets(&mut self, _origin: ResizeOrigin, _active_index: usize) -> ResizeTargets {
        self.targets_built += 1;
        let mut targets = ResizeTargets::new(self.surface(0, Rc::clone(&self.height)));
        for id in 1..=self.secondary_rows {
            let row = self.surface(id, Rc::new(Cell::new(self.min)));
            targets = targets.with_secondary(row);
        }
        targets
    }

    fn finish_resize(&mut self, outcome: ResizeOutcome) {
        self.mode = outcome.mode();
        self.outcomes.push(outcome);
    }
}
