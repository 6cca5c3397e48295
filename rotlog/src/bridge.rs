use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::default_logger;

/// Forwards `log` crate records to the process-wide logger.
struct LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        default_logger().enabled(metadata.level().into())
    }

    fn log(&self, record: &Record) {
        default_logger().log_at(
            record.level().into(),
            record.file().unwrap_or("<unknown>"),
            record.line().unwrap_or(0),
            *record.args(),
        );
    }

    fn flush(&self) {
        let _ = crate::flush();
    }
}

/// Routes `log::info!` and friends into rotlog. `log::Level::Warn` maps to
/// WARNING; everything else maps by name. Can only be installed once per
/// process.
pub fn install_log_bridge(max_level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge))?;
    log::set_max_level(max_level);
    Ok(())
}
