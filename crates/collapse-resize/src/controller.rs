//! Gesture state machine for drag-to-resize.
//!
//! # State Machine
//!
//! ```text
//! Idle --(move past slop)--> Dragging --(up/cancel)--> Settling --(last frame)--> Idle
//!                               |                         |
//!                               +--(up, nothing applied)--+--> Idle
//!                                                         |
//!            Dragging <--(down while settling, resumes)---+
//! ```
//!
//! The coordinator only exists as payload of `Dragging` and `Settling`, so an
//! idle controller cannot hold a stale one.
//!
//! # Failure Modes
//!
//! Events that cannot happen with correct host wiring (a move or release
//! without a preceding down, a frame tick while not settling, anything after
//! [`ResizeController::dispose`]) return a [`ResizeError`] and leave the
//! controller untouched.

use std::mem;

use collapse_animation::{SettleScroller, DEFAULT_SETTLE_DURATION_MS};
use collapse_foundation::{PointerEvent, PointerEventKind, VelocityTracker1D, ViewConfiguration};

use crate::error::ResizeError;
use crate::progress::{ProgressCoordinator, ResizeOrigin};
use crate::surface::{HostSurface, PanelMode, ResizeHost, ResizeOutcome};

/// Phase of the resize gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging,
    Settling,
}

impl std::fmt::Display for GestureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GestureState::Idle => "idle",
            GestureState::Dragging => "dragging",
            GestureState::Settling => "settling",
        };
        f.write_str(name)
    }
}

/// Terminal state a release settles toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettleTarget {
    Expand,
    Collapse,
}

impl SettleTarget {
    /// Picks the settle target for a release.
    ///
    /// A fling (`|velocity| > min_fling_velocity`) goes wherever it points,
    /// no matter how far the panel is. A slow release goes to the nearer
    /// half: expand when `current >= end / 2`.
    pub fn decide(velocity: f32, current: i32, end: i32, min_fling_velocity: f32) -> Self {
        if velocity.abs() > min_fling_velocity {
            if velocity > 0.0 {
                SettleTarget::Expand
            } else {
                SettleTarget::Collapse
            }
        } else if end / 2 <= current {
            SettleTarget::Expand
        } else {
            SettleTarget::Collapse
        }
    }

    /// Scroll delta that takes `current` to this target.
    pub fn delta_from(self, current: i32, end: i32) -> i32 {
        match self {
            SettleTarget::Expand => end - current,
            SettleTarget::Collapse => -current,
        }
    }
}

/// Result of one settle frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettleFrame {
    /// Still moving; the host gets another redraw request.
    Animating { progress: f32 },
    /// Settled and reported to the host; the controller is idle again.
    Finished(ResizeOutcome),
}

enum Phase {
    Idle,
    Dragging {
        /// Pointer position that maps to a zero drag delta.
        anchor_y: f32,
        coordinator: ProgressCoordinator,
    },
    Settling {
        coordinator: ProgressCoordinator,
        scroller: SettleScroller,
    },
}

/// Turns pointer input into panel resize progress.
///
/// All methods are synchronous and expect events in the order the host
/// received them. The settle animation is driven by calling
/// [`on_frame`](Self::on_frame) on every redraw while
/// [`is_settling`](Self::is_settling) is true.
pub struct ResizeController {
    config: ViewConfiguration,
    settle_duration_ms: i64,
    phase: Phase,
    down_y: Option<f32>,
    /// Acquired on the first down, reset on each later one, released on dispose.
    tracker: Option<VelocityTracker1D>,
    disposed: bool,
}

impl ResizeController {
    pub fn new(config: ViewConfiguration) -> Self {
        Self {
            config,
            settle_duration_ms: DEFAULT_SETTLE_DURATION_MS,
            phase: Phase::Idle,
            down_y: None,
            tracker: None,
            disposed: false,
        }
    }

    /// Creates a controller with the host's input configuration.
    pub fn for_host<H: HostSurface + ?Sized>(host: &H) -> Self {
        Self::new(host.view_configuration())
    }

    pub fn with_settle_duration(mut self, duration_ms: i64) -> Self {
        self.settle_duration_ms = duration_ms.max(0);
        self
    }

    pub fn view_configuration(&self) -> ViewConfiguration {
        self.config
    }

    pub fn state(&self) -> GestureState {
        match self.phase {
            Phase::Idle => GestureState::Idle,
            Phase::Dragging { .. } => GestureState::Dragging,
            Phase::Settling { .. } => GestureState::Settling,
        }
    }

    pub fn is_settling(&self) -> bool {
        matches!(self.phase, Phase::Settling { .. })
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Coordinator of the gesture in progress, if any.
    pub fn coordinator(&self) -> Option<&ProgressCoordinator> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Dragging { coordinator, .. } | Phase::Settling { coordinator, .. } => {
                Some(coordinator)
            }
        }
    }

    /// Dispatches a pointer event and returns whether the resize gesture
    /// consumed it.
    pub fn handle_event<H: ResizeHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
    ) -> Result<bool, ResizeError> {
        match event.kind {
            PointerEventKind::Down => self.on_pointer_down(host, event.y(), event.time_ms()),
            PointerEventKind::Move => self.on_pointer_move(host, event.y(), event.time_ms()),
            PointerEventKind::Up | PointerEventKind::Cancel => {
                let was_dragging = matches!(self.phase, Phase::Dragging { .. });
                if event.kind == PointerEventKind::Up {
                    self.on_pointer_up(host, event.y(), event.time_ms())?;
                } else {
                    self.on_pointer_cancel(host, event.time_ms())?;
                }
                Ok(was_dragging)
            }
        }
    }

    /// Starts a gesture. Returns `true` when it interrupts a settle (or a
    /// drag that never saw its release) and dragging resumes right away.
    pub fn on_pointer_down<H: ResizeHost + ?Sized>(
        &mut self,
        host: &mut H,
        y: f32,
        time_ms: i64,
    ) -> Result<bool, ResizeError> {
        self.ensure_live(PointerEventKind::Down.name())?;

        let tracker = self.tracker.get_or_insert_with(VelocityTracker1D::new);
        tracker.reset();
        tracker.add_movement(y, time_ms);
        self.down_y = Some(y);

        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => Ok(false),
            Phase::Settling {
                coordinator,
                mut scroller,
            } => {
                scroller.force_finished();
                let offset = scroller.current();
                log::debug!("settle interrupted at offset {offset}, resuming drag");
                self.resume_drag(y, offset, coordinator);
                Ok(true)
            }
            Phase::Dragging { coordinator, .. } => {
                let offset = coordinator.current_height(host);
                log::debug!("drag re-anchored at offset {offset}");
                self.resume_drag(y, offset, coordinator);
                Ok(true)
            }
        }
    }

    /// Tracks the pointer. Returns `true` once the gesture is a resize drag.
    pub fn on_pointer_move<H: ResizeHost + ?Sized>(
        &mut self,
        host: &mut H,
        y: f32,
        time_ms: i64,
    ) -> Result<bool, ResizeError> {
        let event = PointerEventKind::Move.name();
        self.ensure_live(event)?;
        let Some(down_y) = self.down_y else {
            return Err(self.invalid(event));
        };

        if let Some(tracker) = self.tracker.as_mut() {
            tracker.add_movement(y, time_ms);
        }

        match &mut self.phase {
            Phase::Dragging {
                anchor_y,
                coordinator,
            } => {
                let progress = coordinator.apply_delta(host, y - *anchor_y);
                log::trace!("drag progress {progress}");
                Ok(true)
            }
            Phase::Settling { .. } => Err(self.invalid(event)),
            Phase::Idle => {
                let distance = y - down_y;
                if distance.abs() <= self.config.touch_slop {
                    return Ok(false);
                }

                let coordinator = begin_resize(host);
                log::debug!(
                    "resize drag started from {:?} after {distance}px",
                    coordinator.origin()
                );
                self.phase = Phase::Dragging {
                    anchor_y: y,
                    coordinator,
                };
                Ok(true)
            }
        }
    }

    /// Ends the gesture at `y` and starts settling if the drag moved the panel.
    pub fn on_pointer_up<H: ResizeHost + ?Sized>(
        &mut self,
        host: &mut H,
        y: f32,
        time_ms: i64,
    ) -> Result<(), ResizeError> {
        let event = PointerEventKind::Up.name();
        self.ensure_live(event)?;
        if self.down_y.is_none() {
            return Err(self.invalid(event));
        }

        if let Some(tracker) = self.tracker.as_mut() {
            tracker.add_movement(y, time_ms);
        }
        self.release(host, time_ms);
        Ok(())
    }

    /// Same as [`on_pointer_up`](Self::on_pointer_up) without a final position.
    pub fn on_pointer_cancel<H: ResizeHost + ?Sized>(
        &mut self,
        host: &mut H,
        time_ms: i64,
    ) -> Result<(), ResizeError> {
        let event = PointerEventKind::Cancel.name();
        self.ensure_live(event)?;
        if self.down_y.is_none() {
            return Err(self.invalid(event));
        }

        self.release(host, time_ms);
        Ok(())
    }

    /// Advances the settle animation to `time_ms`.
    ///
    /// Only valid while settling. The frame that completes the settle reports
    /// the outcome to the host and returns the controller to idle.
    pub fn on_frame<H: ResizeHost + ?Sized>(
        &mut self,
        host: &mut H,
        time_ms: i64,
    ) -> Result<SettleFrame, ResizeError> {
        let event = "frame";
        self.ensure_live(event)?;

        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Settling {
                mut coordinator,
                mut scroller,
            } => {
                scroller.compute_offset(time_ms);
                let progress = coordinator.progress_for(scroller.current());
                coordinator.apply(host, progress);

                if !scroller.is_finished() {
                    log::trace!("settle offset {} progress {progress}", scroller.current());
                    host.schedule_redraw();
                    self.phase = Phase::Settling {
                        coordinator,
                        scroller,
                    };
                    return Ok(SettleFrame::Animating { progress });
                }

                let expanded = scroller.final_offset() > 0;
                let outcome = coordinator.finish(host, expanded);
                log::debug!("settle finished, expanded: {expanded}");
                Ok(SettleFrame::Finished(outcome))
            }
            other => {
                self.phase = other;
                Err(self.invalid(event))
            }
        }
    }

    /// Releases the velocity tracker and drops any gesture in progress without
    /// reporting it. Every later event returns [`ResizeError::Disposed`].
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if !matches!(self.phase, Phase::Idle) {
            log::debug!("disposed while {}", self.state());
        }
        self.phase = Phase::Idle;
        self.tracker = None;
        self.down_y = None;
        self.disposed = true;
    }

    fn resume_drag(&mut self, y: f32, offset: i32, coordinator: ProgressCoordinator) {
        let delta = coordinator
            .origin()
            .delta_for_distance(offset, coordinator.end_size());
        self.phase = Phase::Dragging {
            anchor_y: y - delta,
            coordinator,
        };
    }

    fn release<H: ResizeHost + ?Sized>(&mut self, host: &mut H, time_ms: i64) {
        self.down_y = None;

        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging { coordinator, .. } if coordinator.is_initialized() => {
                self.start_settle(host, coordinator, time_ms);
            }
            Phase::Dragging { coordinator, .. } => {
                // Nothing was shown yet, so the panel goes back to where it started.
                let expanded = coordinator.origin() == ResizeOrigin::ExpandedOrigin;
                log::debug!("released before any progress was applied");
                coordinator.finish(host, expanded);
            }
            other => self.phase = other,
        }
    }

    fn start_settle<H: ResizeHost + ?Sized>(
        &mut self,
        host: &mut H,
        coordinator: ProgressCoordinator,
        time_ms: i64,
    ) {
        let velocity = self.tracker.as_ref().map_or(0.0, |tracker| {
            tracker.calculate_velocity_with_max(self.config.max_fling_velocity)
        });
        let current = coordinator.current_height(host);
        let end = coordinator.end_size();
        let target = SettleTarget::decide(velocity, current, end, self.config.min_fling_velocity);

        let mut scroller = SettleScroller::new();
        scroller.start_scroll_with_duration(
            current,
            target.delta_from(current, end),
            time_ms,
            self.settle_duration_ms,
        );
        log::debug!("settling toward {target:?} from {current}/{end}, velocity {velocity}px/s");

        host.schedule_redraw();
        self.phase = Phase::Settling {
            coordinator,
            scroller,
        };
    }

    fn ensure_live(&self, event: &'static str) -> Result<(), ResizeError> {
        if self.disposed {
            let err = ResizeError::Disposed { event };
            log::warn!("{err}");
            return Err(err);
        }
        Ok(())
    }

    fn invalid(&self, event: &'static str) -> ResizeError {
        let err = ResizeError::InvalidSequence {
            event,
            state: self.state(),
        };
        log::warn!("{err}");
        err
    }
}

impl std::fmt::Debug for ResizeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeController")
            .field("state", &self.state())
            .field("config", &self.config)
            .field("coordinator", &self.coordinator())
            .field("disposed", &self.disposed)
            .finish()
    }
}

/// Builds the coordinator for a drag that just passed the slop.
///
/// A compact panel is switched to its expanded layout first so every row the
/// gesture animates exists by the time the surfaces are requested.
fn begin_resize<H: ResizeHost + ?Sized>(host: &mut H) -> ProgressCoordinator {
    let mode = host.current_mode();
    let active_index = host.active_row_index();
    let origin = ResizeOrigin::from_mode(mode);

    if mode == PanelMode::Compact {
        host.switch_mode();
        host.rebuild_rows();
    }

    let targets = host.resize_targets(origin, active_index);
    ProgressCoordinator::new(origin, active_index, targets)
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
