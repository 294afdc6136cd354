//! Load-time error types
//!
//! Everything inside the tick loop is total; only loading a schedule or a
//! tuning file can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while deriving a note schedule from its tabular source
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read schedule {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected 6 columns, found {found}")]
    MissingColumn { line: usize, found: usize },

    #[error("line {line}: invalid {column} value {value:?}")]
    InvalidField {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: pitch {pitch} does not map to a lane")]
    InvalidPitch { line: usize, pitch: i32 },

    #[error("line {line}: start time {start} is negative")]
    NegativeStart { line: usize, start: f32 },

    #[error("line {line}: end time {end} precedes start time {start}")]
    EndBeforeStart { line: usize, start: f32, end: f32 },
}

impl ScheduleError {
    pub fn invalid_field(line: usize, column: &'static str, value: impl Into<String>) -> Self {
        ScheduleError::InvalidField {
            line,
            column,
            value: value.into(),
        }
    }
}

/// Errors produced while loading [`crate::Tuning`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}
