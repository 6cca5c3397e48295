use std::io::{self, Write};

use crate::level::Level;

/// A single log entry. Records are pooled and reused, so every field is
/// overwritten before a record is enqueued.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub time: String,
    pub location: String,
    pub message: String,
    pub level: Level,
}

impl Default for LogRecord {
    fn default() -> Self {
        Self {
            time: String::new(),
            location: String::new(),
            message: String::new(),
            level: Level::Trace,
        }
    }
}

impl LogRecord {
    /// Empties the text fields while keeping their allocations.
    pub(crate) fn clear(&mut self) {
        self.time.clear();
        self.location.clear();
        self.message.clear();
        self.level = Level::Trace;
    }

    /// Writes `[LEVEL][time][location]message\n`.
    pub fn write_line<W: Write + ?Sized>(&self, out: &mut W, color: bool) -> io::Result<()> {
        if color {
            writeln!(
                out,
                "[{}][{}][{}]{}",
                self.level.colored(),
                self.time,
                self.location,
                self.message
            )
        } else {
            writeln!(
                out,
                "[{}][{}][{}]{}",
                self.level.as_str(),
                self.time,
                self.location,
                self.message
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let record = LogRecord {
            time: "2024/05/10 12:30:00".into(),
            location: "main.rs:42".into(),
            message: "hello".into(),
            level: Level::Warning,
        };
        let mut out = Vec::new();
        record.write_line(&mut out, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[WARN][2024/05/10 12:30:00][main.rs:42]hello\n"
        );
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut record = LogRecord {
            message: "a fairly long message body".into(),
            level: Level::Error,
            ..Default::default()
        };
        let capacity = record.message.capacity();
        record.clear();
        assert!(record.message.is_empty());
        assert_eq!(record.message.capacity(), capacity);
        assert_eq!(record.level, Level::Trace);
    }
}
