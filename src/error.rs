//! Error types for construction and configuration
//!
//! Only programmer errors and bad configuration surface here. Runtime
//! conditions (no live ship, bullet cap reached, stale timers) are plain state.

use thiserror::Error;

/// Simulation construction/configuration errors
#[derive(Debug, Error)]
pub enum SimError {
    /// Asteroid size class outside 0..=2
    #[error("Invalid asteroid size {0} (expected 0..=2)")]
    InvalidAsteroidSize(u8),

    /// Raider size class outside 0..=1
    #[error("Invalid raider size {0} (expected 0..=1)")]
    InvalidRaiderSize(u8),

    /// A tuning value failed validation
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    /// Tuning JSON could not be decoded
    #[error("Failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// Tuning file could not be read
    #[error("Failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;
