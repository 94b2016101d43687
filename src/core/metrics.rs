//! Pool metrics for observability
//!
//! Counters that show whether the free lists are doing their job: a healthy
//! steady state is almost all hits and no discards.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for one buffer pool
///
/// # Example
///
/// ```
/// use realm_bridge::core::PoolMetrics;
///
/// let metrics = PoolMetrics::new();
/// metrics.record_miss();
/// metrics.record_hit();
///
/// assert_eq!(metrics.hits(), 1);
/// assert_eq!(metrics.hit_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct PoolMetrics {
    /// Acquires served from the free list
    hits: AtomicU64,

    /// Acquires that had to allocate
    misses: AtomicU64,

    /// Items returned to the free list
    released: AtomicU64,

    /// Items dropped because the free list was full
    discarded: AtomicU64,
}

impl PoolMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            released: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn released(&self) -> u64 {
        self.released.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_hit(&self) -> u64 {
        self.hits.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_miss(&self) -> u64 {
        self.misses.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_released(&self) -> u64 {
        self.released.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_discarded(&self) -> u64 {
        self.discarded.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of acquires served from the free list, as a percentage
    ///
    /// Returns 0.0 if nothing has been acquired yet.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 {
            0.0
        } else {
            (hits / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.released.store(0, Ordering::Relaxed);
        self.discarded.store(0, Ordering::Relaxed);
    }
}

impl Default for PoolMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PoolMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            hits: AtomicU64::new(self.hits()),
            misses: AtomicU64::new(self.misses()),
            released: AtomicU64::new(self.released()),
            discarded: AtomicU64::new(self.discarded()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = PoolMetrics::new();
        assert_eq!(metrics.hits(), 0);
        assert_eq!(metrics.misses(), 0);
        assert_eq!(metrics.released(), 0);
        assert_eq!(metrics.discarded(), 0);
        assert_eq!(metrics.hit_rate(), 0.0);
    }

    #[test]
    fn test_metrics_record_returns_previous() {
        let metrics = PoolMetrics::new();
        assert_eq!(metrics.record_hit(), 0);
        assert_eq!(metrics.record_hit(), 1);
        assert_eq!(metrics.hits(), 2);
    }

    #[test]
    fn test_metrics_hit_rate() {
        let metrics = PoolMetrics::new();
        metrics.record_miss();
        for _ in 0..3 {
            metrics.record_hit();
        }
        assert_eq!(metrics.hit_rate(), 75.0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = PoolMetrics::new();
        metrics.record_released();

        let snapshot = metrics.clone();
        metrics.record_released();

        assert_eq!(snapshot.released(), 1);
        assert_eq!(metrics.released(), 2);

        metrics.reset();
        assert_eq!(metrics.released(), 0);
    }
}
