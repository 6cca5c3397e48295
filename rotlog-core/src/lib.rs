//! # rotlog-core
//! Core pipeline for rotlog: a bounded record queue drained by one background
//! thread that fans records out to sinks, flushes them and rotates log files
//! on timers.

mod config;
mod error;
mod level;
mod log_rotation;
mod log_thread;
mod log_writer;
mod logger;
mod pattern;
mod pool;
mod record;

pub use config::{ROTLOG_CONFIG, RotLogConfig};
pub use error::{LogError, Result};
pub use level::{Level, LevelWindow};
pub use log_rotation::RotatingLogFile;
pub use log_writer::{Flush, LogStdout, LogWriter, Rotate};
pub use logger::{DEFAULT_TIME_FORMAT, Logger, LoggerBuilder, OverflowPolicy};
pub use pattern::{PathPattern, TimeField};
pub use pool::{PoolStats, RecordPool};
pub use record::LogRecord;
