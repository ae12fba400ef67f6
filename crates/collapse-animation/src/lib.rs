//! Settle animation for collapsible panels.
//!
//! The animation is driven by the host: it calls
//! [`SettleScroller::compute_offset`] with its frame time on every redraw and
//! reads back the current offset. Nothing here owns a timer or a thread.

pub mod scroller;

pub use scroller::{viscous_fluid, SettleScroller, DEFAULT_SETTLE_DURATION_MS};
