//! Errors raised by the logging pipeline.

use std::{io, path::PathBuf};

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// A `%` in a rotation template is not followed by `Y`, `M`, `D`, `H` or `m`.
    #[error("invalid rotate pattern ({0})")]
    InvalidPattern(String),

    #[error("invalid log level ({0})")]
    InvalidLevel(String),

    #[error("invalid time format ({0})")]
    InvalidTimeFormat(String),

    /// The sink could not create its directory or open its file.
    #[error("failed to open log file {}: {source}", path.display())]
    SinkInit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write log record: {0}")]
    Write(#[from] io::Error),

    #[error("failed to rotate log file {}: {source}", path.display())]
    Rotate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("logger is closed")]
    LoggerClosed,

    #[error("default logger is already initialized")]
    AlreadyInitialized,
}
