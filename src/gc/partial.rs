//! Partial GC Module
//!
//! Bounded-sample sweep strategy: repeatedly samples a small batch of
//! entries and keeps sampling as long as a large fraction of the batch is
//! expired. Modeled on how Redis amortizes active key expiration.

use std::hash::Hash;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::Value;
use crate::clock::SharedClock;
use crate::gc::counter::{DEFAULT_MAX_ITERATED_COUNT, DEFAULT_MIN_EXPIRED_PERCENT};
use crate::gc::{GarbageCollector, SweepHandler};
use crate::storage::{with_interruption, Storage};

// == Partial GC Config ==
/// Tuning knobs for the bounded-sample sweep.
#[derive(Debug, Clone, Copy)]
pub struct PartialGcConfig {
    /// Cap on live entries delivered to one sweep pass (default: 20)
    pub max_iterated_count: usize,
    /// Expired-ratio floor below which re-sampling stops (default: 0.25)
    pub min_expired_percent: f64,
}

impl Default for PartialGcConfig {
    fn default() -> Self {
        Self {
            max_iterated_count: DEFAULT_MAX_ITERATED_COUNT,
            min_expired_percent: DEFAULT_MIN_EXPIRED_PERCENT,
        }
    }
}

// == Partial GC ==
/// Bounded-sample, repeat-until-clean sweep strategy.
///
/// Each pass visits at most `max_iterated_count` entries with a fresh
/// counter; a high expired ratio in the last pass signals that more expired
/// keys likely remain, so another pass is sampled. Once the ratio drops
/// below `min_expired_percent` the keyspace is assumed clean enough.
pub struct PartialGc<K, T> {
    storage: Arc<dyn Storage<K, Value<T>>>,
    clock: SharedClock,
    config: PartialGcConfig,
}

impl<K, T> PartialGc<K, T> {
    // == Constructor ==
    /// Creates a partial GC over shared storage and clock.
    pub fn new(
        storage: Arc<dyn Storage<K, Value<T>>>,
        clock: SharedClock,
        config: PartialGcConfig,
    ) -> Self {
        Self {
            storage,
            clock,
            config,
        }
    }
}

impl<K, T> GarbageCollector for PartialGc<K, T>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn clean(&self, token: &CancellationToken) {
        let mut passes = 0usize;
        let mut total_expired = 0usize;

        loop {
            if token.is_cancelled() {
                debug!(passes, total_expired, "partial GC cancelled");
                return;
            }

            let mut handler = SweepHandler::new(
                self.storage.as_ref(),
                self.clock.as_ref(),
                self.config.max_iterated_count,
                self.config.min_expired_percent,
            );
            {
                let mut wrapped =
                    with_interruption(token, |key: &K, value: &Value<T>| handler.handle(key, value));
                self.storage.iterate(&mut wrapped);
            }

            passes += 1;
            let counter = handler.counter();
            total_expired += counter.expired();
            debug!(
                pass = passes,
                iterated = counter.iterated(),
                expired = counter.expired(),
                "partial GC pass finished"
            );

            if counter.stop_clean() {
                debug!(passes, total_expired, "partial GC finished");
                return;
            }
        }
    }
}
