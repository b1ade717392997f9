//! Error types for the game controller and its configuration.
//!
//! Gameplay itself has no failure modes (falling off the field is a phase
//! change), so these only cover misuse of the controller API and bad
//! configuration input.

use std::fmt;

use crate::sim::GamePhase;

/// Top-level error enum for Astro Jump.
#[derive(Debug)]
pub enum GameError {
    /// `restart` was called while a run was still in progress.
    RestartWhilePlaying {
        /// Phase the session was in when the restart was rejected.
        phase: GamePhase,
    },

    /// A configuration value is outside its usable range.
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the constraint.
        reason: &'static str,
    },

    /// Configuration or settings JSON could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::RestartWhilePlaying { phase } => {
                write!(f, "restart requested while session is {:?}", phase)
            }
            GameError::InvalidConfig { field, reason } => {
                write!(f, "invalid config field '{}': {}", field, reason)
            }
            GameError::Parse(err) => write!(f, "failed to parse JSON: {}", err),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Parse(err)
    }
}
