//! Validation errors for mood, task, and duration inputs.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Mood must be an integer in 1..=5.
    #[error("mood must be between 1 and 5, got {value}")]
    MoodOutOfRange { value: i64 },

    #[error("task {task_id}: difficulty must be between 1 and 5, got {value}")]
    DifficultyOutOfRange { task_id: String, value: u8 },

    /// Travel and routine durations cannot run backwards.
    #[error("{field} cannot be negative, got {value}")]
    NegativeDuration { field: &'static str, value: i64 },

    /// Too large to subtract from the event start.
    #[error("{field} is out of range, got {value}")]
    DurationOutOfRange { field: &'static str, value: i64 },
}
