//! # Core Error Types
//!
//! All errors that can occur in the runner simulation.

use thiserror::Error;

use crate::character::Character;

/// Errors that can occur in the runner simulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Tuning values failed to parse or broke an invariant.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A config file could not be read.
    #[error("cannot read configuration: {0}")]
    ConfigIo(String),

    /// The selected character needs an unlock the wallet lacks.
    #[error("character {0:?} is locked")]
    CharacterLocked(Character),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
