use serde::Deserialize;

use crate::{Level, LogStdout, Logger, Result, RotatingLogFile, default_logger};

/// Logging section of an application configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of `trace`, `debug`, `info`, `warning`, `error`, `fatal`.
    pub log_level: String,
    pub file_writer: FileWriterConfig,
    pub console_writer: ConsoleWriterConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            file_writer: FileWriterConfig::default(),
            console_writer: ConsoleWriterConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileWriterConfig {
    pub on: bool,
    pub log_path: String,
    /// Rotation template for `log_path`, e.g. `app.log.%Y%M%D`.
    pub rotate_log_path: String,
    /// Separate file for WARNING and ERROR records.
    pub wf_log_path: String,
    pub rotate_wf_log_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleWriterConfig {
    pub on: bool,
    pub color: bool,
}

/// Registers the sinks described by `config` on `logger` and sets its level.
///
/// The main file spans TRACE..INFO when a warning file is configured and
/// TRACE..ERROR otherwise; the warning file spans WARNING..ERROR. The level
/// and both rotation templates are validated before any sink is registered.
pub fn setup_logger(logger: &Logger, config: &LogConfig) -> Result<()> {
    let level: Level = config.log_level.parse()?;
    let files = &config.file_writer;

    let mut writers = Vec::new();
    if files.on {
        if !files.log_path.is_empty() {
            let max = if files.wf_log_path.is_empty() {
                Level::Error
            } else {
                Level::Info
            };
            writers.push(
                RotatingLogFile::new(&files.log_path, &files.rotate_log_path)?
                    .with_levels(Level::Trace, max),
            );
        }
        if !files.wf_log_path.is_empty() {
            writers.push(
                RotatingLogFile::new(&files.wf_log_path, &files.rotate_wf_log_path)?
                    .with_levels(Level::Warning, Level::Error),
            );
        }
    }
    for writer in writers {
        logger.register(writer)?;
    }
    if config.console_writer.on {
        logger.register(LogStdout::new(config.console_writer.color))?;
    }
    logger.set_level(level);
    Ok(())
}

/// [`setup_logger`] applied to the process-wide logger.
pub fn setup_default(config: &LogConfig) -> Result<()> {
    setup_logger(&default_logger(), config)
}
