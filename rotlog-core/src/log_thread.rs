use std::{
    ops::Deref,
    sync::Arc,
    thread::JoinHandle,
    time::{Duration, Instant},
};

use colored::Colorize;
use crossbeam_channel::{RecvTimeoutError, Sender, bounded};

use crate::{
    error::LogError,
    log_writer::LogWriter,
    pool::RecordPool,
    record::LogRecord,
};

/// Items travelling through the record queue.
pub(crate) enum Message {
    Record(Box<LogRecord>),
    /// Sinks join in queue order, so they only see records emitted after them.
    Register(Box<dyn LogWriter>),
    /// Flush barrier: acknowledged once every earlier record is written and
    /// every sink is flushed.
    Flush(Sender<()>),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Timings {
    pub first_flush: Duration,
    pub flush_interval: Duration,
    pub rotate_interval: Duration,
}

/// Producer half of the record queue plus the handle of its writer thread.
pub(crate) struct LogSender {
    sender: Sender<Message>,
    handler: JoinHandle<()>,
}

impl Deref for LogSender {
    type Target = Sender<Message>;
    fn deref(&self) -> &Self::Target {
        &self.sender
    }
}

impl LogSender {
    /// Disconnects the queue and waits for the writer thread to drain it.
    pub fn shutdown(self) {
        let Self { sender, handler } = self;
        drop(sender);
        if handler.join().is_err() {
            eprintln!("[{}] writer thread panicked", "rotlog".red());
        }
    }
}

pub(crate) fn report(action: &str, err: &LogError) {
    eprintln!("[{}] {action} failed: {err}", "rotlog".red());
}

struct Worker {
    writers: Vec<Box<dyn LogWriter>>,
    pool: Arc<RecordPool>,
}

impl Worker {
    fn handle(&mut self, message: Message) {
        match message {
            Message::Record(record) => {
                for writer in &mut self.writers {
                    if let Err(err) = writer.write(&record) {
                        report("write", &err);
                    }
                }
                self.pool.release(record);
            }
            Message::Register(writer) => self.writers.push(writer),
            Message::Flush(ack) => {
                self.flush();
                let _ = ack.send(());
            }
        }
    }

    fn flush(&mut self) {
        for writer in &mut self.writers {
            if let Some(flusher) = writer.as_flush() {
                if let Err(err) = flusher.flush() {
                    report("flush", &err);
                }
            }
        }
    }

    fn rotate(&mut self) {
        for writer in &mut self.writers {
            if let Some(rotator) = writer.as_rotate() {
                if let Err(err) = rotator.rotate() {
                    report("rotate", &err);
                }
            }
        }
    }
}

/// Spawns the single thread that owns every sink. It writes records in queue
/// order and runs the flush and rotate timers in between, each rescheduled
/// independently after it fires. The first rotate check comes one full
/// `rotate_interval` after start: sinks open on the current bucket at `init`,
/// so an earlier check has nothing to do. Once the queue is disconnected and
/// empty it flushes all sinks and exits.
pub(crate) fn spawn_log_thread(
    capacity: usize,
    pool: Arc<RecordPool>,
    timings: Timings,
) -> LogSender {
    let (sender, receiver) = bounded::<Message>(capacity.max(1));
    let handler = std::thread::spawn(move || {
        let mut worker = Worker {
            writers: Vec::new(),
            pool,
        };
        let started = Instant::now();
        let mut next_flush = started + timings.first_flush;
        let mut next_rotate = started + timings.rotate_interval;
        loop {
            match receiver.recv_deadline(next_flush.min(next_rotate)) {
                Ok(message) => worker.handle(message),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            // Timers are checked after every event so a busy queue cannot starve them.
            let now = Instant::now();
            if now >= next_flush {
                worker.flush();
                next_flush = now + timings.flush_interval;
            }
            if now >= next_rotate {
                worker.rotate();
                next_rotate = now + timings.rotate_interval;
            }
        }
        worker.flush();
    });
    LogSender { sender, handler }
}
