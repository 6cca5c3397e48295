use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::{
    error::{LogError, Result},
    level::{Level, LevelWindow},
    log_writer::{Flush, LogWriter, Rotate},
    pattern::PathPattern,
    record::LogRecord,
};

const BUFFER_SIZE: usize = 8 * 1024;

/// A log file that is archived whenever the time fields of its rotation
/// pattern change.
///
/// Records are always appended to `path`. On rotation the current file is
/// renamed to the pattern rendered with the field values observed when it was
/// opened, and a fresh file is created at `path`.
pub struct RotatingLogFile {
    path: PathBuf,
    pattern: PathPattern,
    window: LevelWindow,
    file: Option<BufWriter<File>>,
    observed: Vec<i32>,
}

impl RotatingLogFile {
    /// Compiles `pattern` right away so a bad template is reported at
    /// construction. The file itself is opened by [`LogWriter::init`].
    pub fn new<P: AsRef<Path>>(path: P, pattern: &str) -> Result<Self> {
        let pattern = PathPattern::compile(pattern)?;
        let observed = pattern.sample(&Local::now());
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            pattern,
            window: LevelWindow::all(),
            file: None,
            observed,
        })
    }

    pub fn with_levels(self, min: Level, max: Level) -> Self {
        Self {
            window: LevelWindow::new(min, max),
            ..self
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn window(&self) -> LevelWindow {
        self.window
    }

    /// Where the current file goes on the next rotation.
    pub fn archive_path(&self) -> PathBuf {
        PathBuf::from(self.pattern.render(&self.observed))
    }

    /// Rotates if any pattern field differs between `now` and the values
    /// observed at the last rotation. Calling it again within the same time
    /// bucket does nothing.
    pub fn rotate_at(&mut self, now: &DateTime<Local>) -> Result<()> {
        let current = self.pattern.sample(now);
        if current == self.observed {
            return Ok(());
        }
        let archive = self.archive_path();
        self.observed = current;

        if let Some(mut file) = self.file.take() {
            let archived = file.flush().and_then(|()| {
                drop(file);
                create_parent(&archive)?;
                fs::rename(&self.path, &archive)
            });
            if let Err(source) = archived {
                // keep writing to the target path even if archiving failed
                self.file = open_append(&self.path).ok();
                return Err(LogError::Rotate {
                    path: archive,
                    source,
                });
            }
        }

        self.file = Some(open_append(&self.path).map_err(|source| LogError::Rotate {
            path: self.path.clone(),
            source,
        })?);
        Ok(())
    }
}

impl LogWriter for RotatingLogFile {
    fn init(&mut self) -> Result<()> {
        let file = open_append(&self.path).map_err(|source| LogError::SinkInit {
            path: self.path.clone(),
            source,
        })?;
        self.file = Some(file);
        Ok(())
    }

    fn write(&mut self, record: &LogRecord) -> Result<()> {
        if !self.window.contains(record.level) {
            return Ok(());
        }
        let file = self.file.as_mut().ok_or_else(|| {
            LogError::Write(io::Error::new(io::ErrorKind::NotConnected, "no opened file"))
        })?;
        record.write_line(file, false)?;
        Ok(())
    }

    fn as_flush(&mut self) -> Option<&mut dyn Flush> {
        Some(self)
    }

    fn as_rotate(&mut self) -> Option<&mut dyn Rotate> {
        Some(self)
    }
}

impl Flush for RotatingLogFile {
    fn flush(&mut self) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

impl Rotate for RotatingLogFile {
    fn rotate(&mut self) -> Result<()> {
        self.rotate_at(&Local::now())
    }
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn open_append(path: &Path) -> io::Result<BufWriter<File>> {
    create_parent(path)?;
    let file = File::options().create(true).append(true).open(path)?;
    Ok(BufWriter::with_capacity(BUFFER_SIZE, file))
}
