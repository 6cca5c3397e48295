use std::io::{self, Write};

use crate::{
    error::Result,
    level::{Level, LevelWindow},
    record::LogRecord,
};

/// An output target fed by the writer thread.
///
/// Only `write` is required. Sinks that buffer or rotate expose those
/// capabilities through [`LogWriter::as_flush`] and [`LogWriter::as_rotate`];
/// the writer thread queries them on every flush and rotate tick.
pub trait LogWriter: Send {
    /// Called once at registration, on the registering thread.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Records outside the sink's severity window are ignored, not rejected.
    fn write(&mut self, record: &LogRecord) -> Result<()>;

    fn as_flush(&mut self) -> Option<&mut dyn Flush> {
        None
    }

    fn as_rotate(&mut self) -> Option<&mut dyn Rotate> {
        None
    }
}

pub trait Flush {
    fn flush(&mut self) -> Result<()>;
}

pub trait Rotate {
    fn rotate(&mut self) -> Result<()>;
}

/// Console sink. Every line is flushed as soon as it is written.
pub struct LogStdout {
    out: Box<dyn Write + Send>,
    color: bool,
    window: LevelWindow,
}

impl Default for LogStdout {
    fn default() -> Self {
        Self::new(false)
    }
}

impl LogStdout {
    pub fn new(color: bool) -> Self {
        Self::with_writer(io::stdout(), color)
    }

    /// Writes to `out` instead of the process standard output.
    pub fn with_writer<W: Write + Send + 'static>(out: W, color: bool) -> Self {
        Self {
            out: Box::new(out),
            color,
            window: LevelWindow::all(),
        }
    }

    pub fn with_levels(self, min: Level, max: Level) -> Self {
        Self {
            window: LevelWindow::new(min, max),
            ..self
        }
    }
}

impl LogWriter for LogStdout {
    fn write(&mut self, record: &LogRecord) -> Result<()> {
        if !self.window.contains(record.level) {
            return Ok(());
        }
        record.write_line(&mut self.out, self.color)?;
        self.out.flush()?;
        Ok(())
    }
}
