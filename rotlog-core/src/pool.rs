//! Lock-free pool of reusable log records.
//!
//! Producers take records with [`RecordPool::acquire`] and the writer thread
//! hands them back with [`RecordPool::release`] once every sink has seen them.
//! When the pool runs dry a fresh record is allocated; when it is full a
//! returned record is simply dropped.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_queue::ArrayQueue;

use crate::record::LogRecord;

pub struct RecordPool {
    slots: ArrayQueue<Box<LogRecord>>,
    hits: AtomicU64,
    misses: AtomicU64,
    returns: AtomicU64,
    drops: AtomicU64,
}

/// Point-in-time view of the pool counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub hits: u64,
    pub misses: u64,
    pub returns: u64,
    pub drops: u64,
}

impl RecordPool {
    /// Creates a pool holding `capacity` pre-allocated records.
    pub fn new(capacity: usize) -> Self {
        let slots: ArrayQueue<Box<LogRecord>> = ArrayQueue::new(capacity.max(1));
        while slots.push(Box::default()).is_ok() {}
        Self {
            slots,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            returns: AtomicU64::new(0),
            drops: AtomicU64::new(0),
        }
    }

    /// Never fails: allocates when no pooled record is available.
    pub fn acquire(&self) -> Box<LogRecord> {
        match self.slots.pop() {
            Some(record) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                record
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Box::default()
            }
        }
    }

    pub fn release(&self, mut record: Box<LogRecord>) {
        record.clear();
        if self.slots.push(record).is_ok() {
            self.returns.fetch_add(1, Ordering::Relaxed);
        } else {
            self.drops.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn available(&self) -> usize {
        self.slots.len()
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            drops: self.drops.load(Ordering::Relaxed),
        }
    }
}
