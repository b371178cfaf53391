//! Bounded worker pool: a counting semaphore built on a bounded channel of slot tokens.
//!
//! Holding a [`PoolSlot`] is the right to run one action. The slot goes back to the pool
//! when it is dropped, which also happens while a panicking worker unwinds.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct WorkerPool {
    slots_tx: Sender<()>,
    slots_rx: Receiver<()>,
    capacity: usize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

/// A held slot. Released on drop.
#[must_use = "the slot is released as soon as it is dropped"]
pub struct PoolSlot<'a> {
    pool: &'a WorkerPool,
}

impl WorkerPool {
    /// Pool with `capacity` slots (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (slots_tx, slots_rx) = bounded(capacity);
        Self {
            slots_tx,
            slots_rx,
            capacity,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Block until a slot is free, then take it.
    pub fn acquire(&self) -> PoolSlot<'_> {
        // The pool owns a receiver, so the channel is never disconnected.
        let _ = self.slots_tx.send(());
        self.occupy()
    }

    fn occupy(&self) -> PoolSlot<'_> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        PoolSlot { pool: self }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently held.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of slots held at the same time since the pool was created.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Drop for PoolSlot<'_> {
    fn drop(&mut self) {
        // Decrement before handing the token back so in_flight never reads above capacity.
        self.pool.in_flight.fetch_sub(1, Ordering::SeqCst);
        let _ = self.pool.slots_rx.try_recv();
    }
}
