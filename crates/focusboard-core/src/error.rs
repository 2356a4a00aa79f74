//! Core error types for focusboard-core.
//!
//! Each concern gets its own `thiserror` enum; [`CoreError`] aggregates them
//! for callers that cross concerns (the CLI, storage round trips).

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::Phase;

/// Core error type for focusboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Reorder precondition violations
    #[error("Reorder error: {0}")]
    Reorder(#[from] ReorderError),

    /// Timer transition or configuration errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Quick-add parsing errors
    #[error("Quick-add error: {0}")]
    QuickAdd(#[from] QuickAddError),

    /// Task lookup errors
    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    /// Habit lookup errors
    #[error("Habit error: {0}")]
    Habit(#[from] HabitError),

    /// Note lookup and validation errors
    #[error("Note error: {0}")]
    Note(#[from] NoteError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the reorder engine and layout moves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// Source or destination index outside `[0, len)`.
    #[error("Index {index} out of bounds for list of length {len}")]
    InvalidIndex { index: usize, len: usize },
}

/// Errors raised by the focus timer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Duration change attempted while running or outside the focus phase.
    #[error("Cannot change durations in {phase:?} phase (running: {running})")]
    InvalidConfigState { phase: Phase, running: bool },

    /// Durations must be positive.
    #[error("Duration must be at least one second")]
    InvalidDuration,
}

/// Errors raised by the quick-add parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuickAddError {
    /// Nothing left to use as a title once tags are stripped.
    #[error("Task title is empty")]
    EmptyTitle,
}

/// Task lookup errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(String),
}

/// Habit lookup errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HabitError {
    #[error("Habit not found: {0}")]
    NotFound(String),
}

/// Note errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    #[error("Note title is empty")]
    EmptyTitle,

    #[error("Note not found: {0}")]
    NotFound(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg) => {
                if code.code == rusqlite::ErrorCode::DatabaseBusy
                    || code.code == rusqlite::ErrorCode::DatabaseLocked
                {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
