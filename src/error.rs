//! Error types
//!
//! The simulation itself never fails; errors only come from constructing the
//! engine and from parsing authored data.

use thiserror::Error;

/// Engine construction failures
#[derive(Debug, Error)]
pub enum EngineError {
    /// The surface could not hand out a 2D drawing context
    #[error("drawing surface has no 2D context")]
    MissingContext,
    /// The surface reports a zero or negative playfield size
    #[error("drawing surface has invalid size {width}x{height}")]
    InvalidSurfaceSize { width: f32, height: f32 },
}

/// Authored level data failures
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid color {0:?} (expected #rgb, #rrggbb or #rrggbbaa)")]
    InvalidColor(String),
}

/// Tuning file failures
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
}
