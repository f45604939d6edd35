//! Sweep Handler Module
//!
//! The per-pass iteration callback shared by both GC strategies: inspects
//! one entry, deletes it if expired, updates the pass counter, and signals
//! whether the scan should continue.

use crate::cache::Value;
use crate::clock::Clock;
use crate::gc::SweepCounter;
use crate::storage::Storage;

// == Sweep Handler ==
/// Stateful callback bound to one sweep pass.
///
/// This is the only code path that performs expiry-driven deletion during a
/// sweep; partial and total GC differ only in how many times and under what
/// stopping condition they run it.
pub(crate) struct SweepHandler<'a, K, T> {
    counter: SweepCounter,
    storage: &'a dyn Storage<K, Value<T>>,
    clock: &'a dyn Clock,
}

impl<'a, K, T> SweepHandler<'a, K, T> {
    // == Constructor ==
    pub(crate) fn new(
        storage: &'a dyn Storage<K, Value<T>>,
        clock: &'a dyn Clock,
        max_iterated_count: usize,
        min_expired_percent: f64,
    ) -> Self {
        Self {
            counter: SweepCounter::new(max_iterated_count, min_expired_percent),
            storage,
            clock,
        }
    }

    // == Handle ==
    /// Processes one visited entry; returns false to stop the scan once the
    /// sample-size cap is reached.
    ///
    /// The expiry check and the delete are separate storage calls, not an
    /// atomic pair: a concurrent `set` may refresh the key in between, in
    /// which case the refreshed value is deleted anyway. Best-effort cleanup
    /// accepts this race.
    pub(crate) fn handle(&mut self, key: &K, value: &Value<T>) -> bool {
        if value.is_expired(self.clock) {
            self.storage.delete(key);
            self.counter.record_expired();
        }

        self.counter.record_iterated();
        !self.counter.stop_iterate()
    }

    // == Counter ==
    pub(crate) fn counter(&self) -> &SweepCounter {
        &self.counter
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::gc::counter::{DEFAULT_MAX_ITERATED_COUNT, DEFAULT_MIN_EXPIRED_PERCENT};
    use crate::storage::ConcurrentHashMap;
    use std::time::{Duration, SystemTime};

    fn epoch_plus(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_handler_keeps_live_entry() {
        let storage: ConcurrentHashMap<String, Value<i32>> = ConcurrentHashMap::new();
        let clock = ManualClock::new(epoch_plus(100));

        let key = "key1".to_string();
        let value = Value::new(1, Some(epoch_plus(200)));
        storage.set(key.clone(), value.clone());

        let mut handler = SweepHandler::new(
            &storage,
            &clock,
            DEFAULT_MAX_ITERATED_COUNT,
            DEFAULT_MIN_EXPIRED_PERCENT,
        );

        assert!(handler.handle(&key, &value));
        assert!(storage.get(&key).is_some());
        assert_eq!(handler.counter().iterated(), 1);
        assert_eq!(handler.counter().expired(), 0);
    }

    #[test]
    fn test_handler_deletes_expired_entry() {
        let storage: ConcurrentHashMap<String, Value<i32>> = ConcurrentHashMap::new();
        let clock = ManualClock::new(epoch_plus(300));

        let key = "key1".to_string();
        let value = Value::new(1, Some(epoch_plus(200)));
        storage.set(key.clone(), value.clone());

        let mut handler = SweepHandler::new(
            &storage,
            &clock,
            DEFAULT_MAX_ITERATED_COUNT,
            DEFAULT_MIN_EXPIRED_PERCENT,
        );

        assert!(handler.handle(&key, &value));
        assert!(storage.get(&key).is_none());
        assert_eq!(handler.counter().iterated(), 1);
        assert_eq!(handler.counter().expired(), 1);
    }

    #[test]
    fn test_handler_stops_at_sample_cap() {
        let storage: ConcurrentHashMap<String, Value<i32>> = ConcurrentHashMap::new();
        let clock = ManualClock::new(epoch_plus(100));

        let value: Value<i32> = Value::new(1, None);
        let mut handler = SweepHandler::new(&storage, &clock, 2, DEFAULT_MIN_EXPIRED_PERCENT);

        assert!(handler.handle(&"key1".to_string(), &value));
        assert!(!handler.handle(&"key2".to_string(), &value));
        assert_eq!(handler.counter().iterated(), 2);
    }
}
