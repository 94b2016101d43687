//! Free-list pools for reusable buffers
//!
//! A pool is a bounded MPMC queue of idle items. Acquiring takes an idle item
//! or builds a fresh one; releasing recycles the item (length to zero,
//! capacity kept) and parks it again. When the queue is full the item is
//! simply dropped, so a burst never pins memory beyond the pool capacity.

use super::metrics::PoolMetrics;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::ops::{Deref, DerefMut};

/// Something that can be emptied for reuse without giving back its storage
pub trait Recycle {
    fn recycle(&mut self);
}

impl<T> Recycle for Vec<T> {
    fn recycle(&mut self) {
        self.clear();
    }
}

impl Recycle for String {
    fn recycle(&mut self) {
        self.clear();
    }
}

/// Thread-safe free list
///
/// `T::default()` must not allocate; it is used both for pool misses and as
/// the placeholder left behind when a [`Pooled`] guard hands its item back.
#[derive(Debug)]
pub struct Pool<T> {
    idle_tx: Sender<T>,
    idle_rx: Receiver<T>,
    metrics: PoolMetrics,
}

impl<T: Recycle + Default> Pool<T> {
    /// Create a pool that keeps at most `capacity` idle items
    pub fn new(capacity: usize) -> Self {
        let (idle_tx, idle_rx) = bounded(capacity);
        Self {
            idle_tx,
            idle_rx,
            metrics: PoolMetrics::new(),
        }
    }

    /// Take an idle item, or a fresh one if none is parked
    pub fn acquire(&self) -> T {
        match self.idle_rx.try_recv() {
            Ok(item) => {
                self.metrics.record_hit();
                item
            }
            Err(_) => {
                self.metrics.record_miss();
                T::default()
            }
        }
    }

    /// Recycle an item and park it for the next caller
    pub fn release(&self, mut item: T) {
        item.recycle();
        match self.idle_tx.try_send(item) {
            Ok(()) => {
                self.metrics.record_released();
            }
            Err(_) => {
                self.metrics.record_discarded();
            }
        }
    }

    /// Acquire an item wrapped in a guard that releases it on drop
    pub fn get(&self) -> Pooled<'_, T> {
        Pooled {
            pool: self,
            item: self.acquire(),
        }
    }

    /// Number of items currently parked
    pub fn idle(&self) -> usize {
        self.idle_rx.len()
    }

    /// Maximum number of parked items
    pub fn capacity(&self) -> usize {
        self.idle_rx.capacity().unwrap_or(0)
    }

    pub fn metrics(&self) -> &PoolMetrics {
        &self.metrics
    }
}

/// RAII guard for a pooled item
///
/// Dereferences to the item; dropping the guard recycles the item back into
/// its pool. The item cannot outlive the guard, so nothing can touch it after
/// release.
pub struct Pooled<'a, T: Recycle + Default> {
    pool: &'a Pool<T>,
    item: T,
}

impl<T: Recycle + Default> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T: Recycle + Default> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.item
    }
}

impl<T: Recycle + Default> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        let item = std::mem::take(&mut self.item);
        self.pool.release(item);
    }
}
