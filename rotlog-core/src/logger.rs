use std::{
    cell::RefCell,
    fmt::{self, Write},
    panic::Location,
    path::Path,
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicU8, AtomicU64, Ordering},
    },
    time::Duration,
};

use chrono::{
    Local,
    format::{Item, StrftimeItems},
};
use crossbeam_channel::{TrySendError, bounded};

use crate::{
    config::ROTLOG_CONFIG,
    error::{LogError, Result},
    level::Level,
    log_thread::{LogSender, Message, Timings, spawn_log_thread},
    log_writer::LogWriter,
    pool::RecordPool,
};

/// `2006/01/02 15:04:05` style, second precision.
pub const DEFAULT_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// What an emitting thread does when the record queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Wait until the writer thread makes room.
    #[default]
    Block,
    /// Panic in the emitting thread.
    Panic,
}

/// Builder for [`Logger`]. Defaults come from the `ROTLOG_*` environment.
pub struct LoggerBuilder {
    level: Level,
    time_format: String,
    queue_capacity: usize,
    first_flush: Duration,
    flush_interval: Duration,
    rotate_interval: Duration,
    overflow: OverflowPolicy,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            time_format: DEFAULT_TIME_FORMAT.into(),
            queue_capacity: ROTLOG_CONFIG.QUEUE_CAPACITY as usize,
            first_flush: Duration::from_millis(ROTLOG_CONFIG.FIRST_FLUSH_MS),
            flush_interval: Duration::from_millis(ROTLOG_CONFIG.FLUSH_INTERVAL_MS),
            rotate_interval: Duration::from_millis(ROTLOG_CONFIG.ROTATE_INTERVAL_MS),
            overflow: OverflowPolicy::Block,
        }
    }
}

impl LoggerBuilder {
    /// Minimum level accepted by the logger.
    pub fn level(self, level: Level) -> Self {
        Self { level, ..self }
    }
    /// Sets the chrono `strftime` layout used for record timestamps.
    pub fn time_format(self, format: &str) -> Result<Self> {
        validate_time_format(format)?;
        Ok(Self {
            time_format: format.into(),
            ..self
        })
    }
    pub fn queue_capacity(self, queue_capacity: usize) -> Self {
        Self {
            queue_capacity: queue_capacity.max(1),
            ..self
        }
    }
    /// Delay before the first flush tick.
    pub fn first_flush(self, first_flush: Duration) -> Self {
        Self {
            first_flush,
            ..self
        }
    }
    /// Period of every following flush tick.
    pub fn flush_interval(self, flush_interval: Duration) -> Self {
        Self {
            flush_interval,
            ..self
        }
    }
    pub fn rotate_interval(self, rotate_interval: Duration) -> Self {
        Self {
            rotate_interval,
            ..self
        }
    }
    pub fn overflow(self, overflow: OverflowPolicy) -> Self {
        Self { overflow, ..self }
    }

    /// Starts the writer thread.
    pub fn build(self) -> Logger {
        let tick = Duration::from_millis(1);
        let pool = Arc::new(RecordPool::new(self.queue_capacity));
        let sender = spawn_log_thread(
            self.queue_capacity,
            Arc::clone(&pool),
            Timings {
                first_flush: self.first_flush.max(tick),
                flush_interval: self.flush_interval.max(tick),
                rotate_interval: self.rotate_interval.max(tick),
            },
        );
        Logger {
            sender: RwLock::new(Some(sender)),
            pool,
            level: AtomicU8::new(self.level as u8),
            time_format: RwLock::new(self.time_format.into()),
            format_generation: AtomicU64::new(next_format_generation()),
            overflow: self.overflow,
        }
    }
}

/// Identifies a time format installed on some logger. Unique process-wide,
/// so one thread-local cache can serve every logger.
static FORMAT_GENERATION: AtomicU64 = AtomicU64::new(0);

fn next_format_generation() -> u64 {
    FORMAT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Formatted timestamp, recomputed only when the wall-clock second or the
/// format changes.
struct TimeCache {
    generation: u64,
    format: Arc<str>,
    second: i64,
    text: String,
}

thread_local! {
    static TIME_CACHE: RefCell<TimeCache> = RefCell::new(TimeCache {
        generation: u64::MAX,
        format: Arc::from(""),
        second: i64::MIN,
        text: String::new(),
    });
}

fn validate_time_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(LogError::InvalidTimeFormat(format.to_string()));
    }
    Ok(())
}

/// Asynchronous dispatcher.
///
/// Emitting threads format the message, stamp it and push it onto a bounded
/// queue; a single writer thread owns every registered sink and is the only
/// one to touch them. A full queue blocks the emitter (or panics, depending on
/// [`OverflowPolicy`]); nothing is ever dropped or reordered.
///
/// Dropping the logger closes it.
pub struct Logger {
    sender: RwLock<Option<LogSender>>,
    pool: Arc<RecordPool>,
    level: AtomicU8,
    time_format: RwLock<Arc<str>>,
    format_generation: AtomicU64,
    overflow: OverflowPolicy,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

impl Logger {
    pub fn new() -> Self {
        LoggerBuilder::default().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    pub fn set_time_format(&self, format: &str) -> Result<()> {
        validate_time_format(format)?;
        *self
            .time_format
            .write()
            .unwrap_or_else(PoisonError::into_inner) = format.into();
        self.format_generation
            .store(next_format_generation(), Ordering::Release);
        Ok(())
    }

    /// Runs the sink's `init` and hands it to the writer thread. Records
    /// emitted before this call are not delivered to the new sink.
    pub fn register<W: LogWriter + 'static>(&self, writer: W) -> Result<()> {
        self.register_boxed(Box::new(writer))
    }

    pub fn register_boxed(&self, mut writer: Box<dyn LogWriter>) -> Result<()> {
        let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);
        let sender = guard.as_ref().ok_or(LogError::LoggerClosed)?;
        writer.init()?;
        sender
            .send(Message::Register(writer))
            .map_err(|_| LogError::LoggerClosed)
    }

    /// Blocks until every record queued so far is written and all sinks are
    /// flushed.
    pub fn flush(&self) -> Result<()> {
        let (ack, done) = bounded(1);
        {
            let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);
            let sender = guard.as_ref().ok_or(LogError::LoggerClosed)?;
            sender
                .send(Message::Flush(ack))
                .map_err(|_| LogError::LoggerClosed)?;
        }
        done.recv().map_err(|_| LogError::LoggerClosed)
    }

    /// Number of queued items not yet taken by the writer thread.
    pub fn pending(&self) -> usize {
        let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map_or(0, |sender| sender.len())
    }

    pub fn pool(&self) -> &RecordPool {
        &self.pool
    }

    pub fn is_closed(&self) -> bool {
        self.sender
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Stops accepting records, waits for the writer thread to write and
    /// flush everything already queued, then returns. Emitting afterwards is
    /// a no-op. Closing twice is harmless.
    pub fn close(&self) {
        let sender = self
            .sender
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(sender) = sender {
            sender.shutdown();
        }
    }

    /// Emits a record located at the caller.
    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let location = Location::caller();
        self.log_at(level, location.file(), location.line(), args);
    }

    /// Emits a record with an explicit source location. Only the file name
    /// of `file` is kept.
    pub fn log_at(&self, level: Level, file: &str, line: u32, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = guard.as_ref() else {
            return;
        };

        let mut record = self.pool.acquire();
        record.level = level;
        let _ = record.message.write_fmt(args);
        let file = Path::new(file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(file);
        let _ = write!(record.location, "{file}:{line}");
        self.stamp(&mut record.time);

        match self.overflow {
            OverflowPolicy::Block => {
                let _ = sender.send(Message::Record(record));
            }
            OverflowPolicy::Panic => match sender.try_send(Message::Record(record)) {
                Ok(()) | Err(TrySendError::Disconnected(_)) => {}
                Err(TrySendError::Full(_)) => panic!("rotlog record queue is full"),
            },
        }
    }

    #[track_caller]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }
    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }
    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }
    #[track_caller]
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warning, args);
    }
    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }
    /// Records at FATAL severity. The process keeps running.
    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Fatal, args);
    }

    /// Uses this thread's cache; the shared format is only read after
    /// `set_time_format`, so emitting threads never wait on one another here.
    fn stamp(&self, out: &mut String) {
        let now = Local::now();
        let second = now.timestamp();
        let generation = self.format_generation.load(Ordering::Acquire);
        TIME_CACHE.with_borrow_mut(|cache| {
            if cache.generation != generation {
                cache.format = Arc::clone(
                    &self
                        .time_format
                        .read()
                        .unwrap_or_else(PoisonError::into_inner),
                );
                cache.generation = generation;
                cache.second = i64::MIN;
            }
            if cache.second != second {
                cache.text.clear();
                let _ = write!(cache.text, "{}", now.format(&cache.format));
                cache.second = second;
            }
            out.push_str(&cache.text);
        });
    }
}
