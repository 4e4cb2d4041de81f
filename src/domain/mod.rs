/// Domain module containing the habit record and its streak rules
///
/// This module defines the Habit entity, the Frequency it repeats on, and the
/// Transition that each touch of a habit produces. Nothing in here does I/O.

pub mod clock;
pub mod frequency;
pub mod habit;
pub mod transition;

// Re-export public types for easy access
pub use clock::*;
pub use frequency::*;
pub use habit::*;
pub use transition::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("invalid interval: {0}")]
    InvalidFrequency(String),
}
