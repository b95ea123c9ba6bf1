//! Error types for the gravity sandbox.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Two bodies occupy exactly the same position, so the line between
    /// them (and any force or impulse along it) is undefined.
    #[error("degenerate geometry: bodies overlap exactly at ({x}, {y})")]
    DegenerateGeometry { x: f64, y: f64 },

    #[error("invalid spawn: {0}")]
    InvalidSpawn(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
