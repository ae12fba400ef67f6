//! Foundation pieces for collapsible panels: pointer input, gesture thresholds
//! and velocity tracking.

pub mod gesture_constants;
pub mod pointer;
pub mod velocity_tracker;

pub use gesture_constants::ViewConfiguration;
pub use pointer::{PointerEvent, PointerEventKind, PointerSample};
pub use velocity_tracker::VelocityTracker1D;
