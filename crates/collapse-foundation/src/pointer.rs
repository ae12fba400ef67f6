//! Single-pointer input as seen by a vertical resize gesture.

/// Kind of a raw pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerEventKind {
    /// Lowercase name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            PointerEventKind::Down => "pointer down",
            PointerEventKind::Move => "pointer move",
            PointerEventKind::Up => "pointer up",
            PointerEventKind::Cancel => "pointer cancel",
        }
    }
}

/// A vertical pointer position at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    /// Vertical position in pixels, growing downward.
    pub y: f32,
    /// Event time in milliseconds on the host's input clock.
    pub time_ms: i64,
}

impl PointerSample {
    pub fn new(y: f32, time_ms: i64) -> Self {
        Self { y, time_ms }
    }
}

/// Pointer event forwarded by the host.
///
/// Only the vertical axis matters to the resize gesture, so the horizontal
/// coordinate is not carried.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub sample: PointerSample,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, y: f32, time_ms: i64) -> Self {
        Self {
            kind,
            sample: PointerSample::new(y, time_ms),
        }
    }

    pub fn down(y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, y, time_ms)
    }

    pub fn moved(y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, y, time_ms)
    }

    pub fn up(y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, y, time_ms)
    }

    pub fn cancel(y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, y, time_ms)
    }

    pub fn y(&self) -> f32 {
        self.sample.y
    }

    pub fn time_ms(&self) -> i64 {
        self.sample.time_ms
    }
}
