//! Sweep Counter Module
//!
//! Per-pass iterated/expired counts and the two stopping predicates that
//! govern a partial sweep.

// == Constants ==
/// Default cap on live entries delivered to one sweep pass.
pub(crate) const DEFAULT_MAX_ITERATED_COUNT: usize = 20;

/// Default expired-ratio floor below which the partial GC stops re-sampling.
pub(crate) const DEFAULT_MIN_EXPIRED_PERCENT: f64 = 0.25;

// == Sweep Counter ==
/// Ephemeral state of one sweep pass.
///
/// Lives only for the duration of a single pass; each partial-GC pass starts
/// from a fresh counter.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SweepCounter {
    iterated: usize,
    expired: usize,
    max_iterated_count: usize,
    min_expired_percent: f64,
}

impl SweepCounter {
    // == Constructor ==
    pub(crate) fn new(max_iterated_count: usize, min_expired_percent: f64) -> Self {
        Self {
            iterated: 0,
            expired: 0,
            max_iterated_count,
            min_expired_percent,
        }
    }

    // == Recording ==
    pub(crate) fn record_iterated(&mut self) {
        self.iterated += 1;
    }

    pub(crate) fn record_expired(&mut self) {
        self.expired += 1;
    }

    pub(crate) fn iterated(&self) -> usize {
        self.iterated
    }

    pub(crate) fn expired(&self) -> usize {
        self.expired
    }

    // == Stop Iterate ==
    /// True once the pass has visited its sample-size cap. Bounds the
    /// worst-case latency of a single storage scan.
    pub(crate) fn stop_iterate(&self) -> bool {
        self.iterated >= self.max_iterated_count
    }

    // == Stop Clean ==
    /// True if the partial-GC outer loop should stop re-sampling: either the
    /// pass visited nothing (empty storage), or the observed expired ratio
    /// fell below the configured floor.
    pub(crate) fn stop_clean(&self) -> bool {
        if self.iterated == 0 {
            return true;
        }

        (self.expired as f64 / self.iterated as f64) < self.min_expired_percent
    }
}
