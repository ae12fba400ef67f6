//! Drag-to-resize engine for collapsible calendar panels.
//!
//! The host forwards pointer events to a [`ResizeController`]. Once a drag
//! passes the touch slop the controller builds a [`ProgressCoordinator`],
//! which maps drag distance to a `[0, 1]` progress and fans it out to every
//! sizing surface of the panel. On release the controller picks a terminal
//! state from the fling velocity (or the midpoint for slow releases) and
//! settles toward it; the host drives the settle by calling
//! [`ResizeController::on_frame`] from its redraw loop.
//!
//! Layout, the grid model and rendering stay with the host and are reached
//! through the traits in [`surface`].

pub mod controller;
pub mod error;
pub mod progress;
pub mod surface;

#[cfg(test)]
mod test_support;

pub use collapse_foundation::{PointerEvent, PointerEventKind, ViewConfiguration};

pub use controller::{GestureState, ResizeController, SettleFrame, SettleTarget};
pub use error::ResizeError;
pub use progress::{ProgressCoordinator, ResizeOrigin};
pub use surface::{
    AnimatableSet, GridModel, HostSurface, PanelMode, ResizeHost, ResizeOutcome, ResizeTargets,
    SizingSurface,
};
