//! # rotlog
//! Asynchronous, level-filtered logger writing to rotating log files and the
//! console from a single background thread.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! rotlog = "0.1.0"
//! ```
//!
//! ```rust
//! use rotlog::{Level, Logger, RotatingLogFile};
//!
//! let _ = std::fs::remove_dir_all("/tmp/rotlog_doc_usage");
//! let logger = Logger::builder().level(Level::Info).build();
//! logger
//!     .register(
//!         RotatingLogFile::new(
//!             "/tmp/rotlog_doc_usage/app.log",
//!             "/tmp/rotlog_doc_usage/app.log.%Y%M%D",
//!         )
//!         .expect("Invalid rotation pattern"),
//!     )
//!     .expect("Unable to open log file");
//! rotlog::info!(logger: logger, "served {} requests", 3);
//! rotlog::debug!(logger: logger, "below the minimum level");
//! // close drains the queue and flushes every file
//! logger.close();
//!
//! let content = std::fs::read_to_string("/tmp/rotlog_doc_usage/app.log").unwrap();
//! assert_eq!(content.lines().count(), 1);
//! assert!(content.ends_with("served 3 requests\n"));
//! ```
//!
//! ## Configuration
//! Sinks can be set up from a [`LogConfig`], typically deserialized from the
//! application's configuration file. With a separate warning file, INFO and
//! below go to `log_path` while WARNING and ERROR go to `wf_log_path`.
//!
//! ```rust
//! use rotlog::{FileWriterConfig, LogConfig, Logger, setup_logger};
//!
//! let _ = std::fs::remove_dir_all("/tmp/rotlog_doc_config");
//! let config = LogConfig {
//!     log_level: "trace".into(),
//!     file_writer: FileWriterConfig {
//!         on: true,
//!         log_path: "/tmp/rotlog_doc_config/app.log".into(),
//!         rotate_log_path: "/tmp/rotlog_doc_config/app.log.%Y%M%D%H".into(),
//!         wf_log_path: "/tmp/rotlog_doc_config/app.wf.log".into(),
//!         rotate_wf_log_path: "/tmp/rotlog_doc_config/app.wf.log.%Y%M%D%H".into(),
//!     },
//!     ..Default::default()
//! };
//! let logger = Logger::new();
//! setup_logger(&logger, &config).expect("Invalid log configuration");
//! rotlog::info!(logger: logger, "started");
//! rotlog::error!(logger: logger, "lost connection");
//! logger.close();
//!
//! let wf = std::fs::read_to_string("/tmp/rotlog_doc_config/app.wf.log").unwrap();
//! assert!(wf.ends_with("lost connection\n"));
//! assert!(!wf.contains("started"));
//! ```
//!
//! ## Process-wide logger
//! Macros without a `logger:` argument go to a default instance created on
//! first use. [`close`] drains and drops it; the next use creates a fresh one.
//!
//! ```rust
//! rotlog::register(rotlog::LogStdout::new(false)).unwrap();
//! rotlog::warn!("disk usage at {}%", 91);
//! rotlog::close();
//! ```

mod bridge;
mod config;
mod macros;

pub use bridge::install_log_bridge;
pub use config::{ConsoleWriterConfig, FileWriterConfig, LogConfig, setup_default, setup_logger};
pub use rotlog_core::{
    DEFAULT_TIME_FORMAT, Flush, Level, LevelWindow, LogError, LogRecord, LogStdout, LogWriter,
    Logger, LoggerBuilder, OverflowPolicy, PathPattern, PoolStats, RecordPool, Result, Rotate,
    RotatingLogFile, TimeField,
};

use std::sync::{Arc, PoisonError, RwLock};

static DEFAULT_LOGGER: RwLock<Option<Arc<Logger>>> = RwLock::new(None);

/// Returns the process-wide logger, creating it with the environment
/// defaults if none is active.
pub fn default_logger() -> Arc<Logger> {
    {
        let slot = DEFAULT_LOGGER.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(logger) = slot.as_ref() {
            return Arc::clone(logger);
        }
    }
    let mut slot = DEFAULT_LOGGER.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(slot.get_or_insert_with(|| Arc::new(Logger::new())))
}

/// Installs a process-wide logger built from `builder`.
/// Fails if one is already active; call [`close`] first to replace it.
pub fn init_default(builder: LoggerBuilder) -> Result<Arc<Logger>> {
    let mut slot = DEFAULT_LOGGER.write().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        return Err(LogError::AlreadyInitialized);
    }
    let logger = Arc::new(builder.build());
    *slot = Some(Arc::clone(&logger));
    Ok(logger)
}

/// Drains, flushes and drops the process-wide logger.
pub fn close() {
    let logger = DEFAULT_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    if let Some(logger) = logger {
        logger.close();
    }
}

/// Registers a sink on the process-wide logger.
pub fn register<W: LogWriter + 'static>(writer: W) -> Result<()> {
    default_logger().register(writer)
}

pub fn set_level(level: Level) {
    default_logger().set_level(level);
}

pub fn set_time_format(format: &str) -> Result<()> {
    default_logger().set_time_format(format)
}

/// Blocks until the process-wide logger has written and flushed everything
/// queued so far.
pub fn flush() -> Result<()> {
    default_logger().flush()
}
