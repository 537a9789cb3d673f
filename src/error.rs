// ============================================================================
// ERRORS
// ============================================================================

use thiserror::Error;

/// Fatal startup and host failures. The drawing state machine itself never fails.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface error: {0}")]
    Pixels(#[from] pixels::Error),
}

/// A rendering strategy name that is not one of `direct`, `buffered` or `replay`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown rendering strategy {0:?} (expected direct, buffered or replay)")]
pub struct UnknownStrategy(pub String);
