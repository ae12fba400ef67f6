use crate::controller::GestureState;

/// Contract violations reported by [`ResizeController`](crate::ResizeController).
///
/// All of them point at host wiring bugs; none is transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeError {
    /// The event is not valid in the current gesture state, e.g. a move
    /// without a preceding down, or a frame tick while not settling.
    InvalidSequence {
        event: &'static str,
        state: GestureState,
    },
    /// The controller was disposed and no longer accepts events.
    Disposed { event: &'static str },
}

impl std::fmt::Display for ResizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeError::InvalidSequence { event, state } => {
                write!(f, "{event} is not valid while {state}")
            }
            ResizeError::Disposed { event } => {
                write!(f, "{event} delivered to a disposed resize controller")
            }
        }
    }
}

impl std::error::Error for ResizeError {}
