use std::{fmt, str::FromStr};

use colored::{ColoredString, Colorize};

use crate::error::LogError;

/// Severity of a log record, in ascending order.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// Tag written between the first pair of brackets of every line.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    pub(crate) fn colored(self) -> ColoredString {
        match self {
            Level::Trace => "TRACE".purple(),
            Level::Debug => "DEBUG".blue(),
            Level::Info => "INFO".green(),
            Level::Warning => "WARN".yellow(),
            Level::Error => "ERROR".red(),
            Level::Fatal => "FATAL".bright_red().bold(),
        }
    }

    pub(crate) fn from_u8(value: u8) -> Level {
        Level::ALL
            .get(value as usize)
            .copied()
            .unwrap_or(Level::Fatal)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    /// Parses the lowercase configuration names.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            other => Err(LogError::InvalidLevel(other.to_string())),
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

/// Inclusive `[min, max]` severity gate applied by each sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelWindow {
    pub min: Level,
    pub max: Level,
}

impl LevelWindow {
    pub const fn new(min: Level, max: Level) -> Self {
        Self { min, max }
    }

    pub const fn all() -> Self {
        Self::new(Level::Trace, Level::Fatal)
    }

    pub fn contains(&self, level: Level) -> bool {
        self.min <= level && level <= self.max
    }
}

impl Default for LevelWindow {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_order() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_parse_config_names() {
        assert_eq!("trace".parse::<Level>().unwrap(), Level::Trace);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("fatal".parse::<Level>().unwrap(), Level::Fatal);
        let err = "WARN".parse::<Level>().unwrap_err();
        assert!(matches!(err, LogError::InvalidLevel(name) if name == "WARN"));
        assert!("".parse::<Level>().is_err());
    }

    #[test]
    fn test_u8_round_trip() {
        for level in Level::ALL {
            assert_eq!(Level::from_u8(level as u8), level);
        }
    }

    #[test]
    fn test_window() {
        let window = LevelWindow::new(Level::Warning, Level::Error);
        assert!(!window.contains(Level::Info));
        assert!(window.contains(Level::Warning));
        assert!(window.contains(Level::Error));
        assert!(!window.contains(Level::Fatal));
        assert!(LevelWindow::all().contains(Level::Trace));
    }

    #[test]
    fn test_warning_tag() {
        assert_eq!(Level::Warning.to_string(), "WARN");
        assert_eq!(Level::from(log::Level::Warn), Level::Warning);
    }
}
