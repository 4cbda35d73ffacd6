// Typed errors with thiserror. Surface meaningful messages to JS.
// Frame-level input problems (no hand, missing landmark) are not errors; they are no-ops.

use thiserror::Error;

/// Tracker error types. Raised only at the configuration and JSON boundary.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid detection frame: {0}")]
    InvalidFrame(String),

    #[error("Invalid game snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Unknown game phase: {0}")]
    UnknownPhase(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}
