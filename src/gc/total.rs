//! Total GC Module
//!
//! Full-sweep strategy: one unbounded pass over all of storage per
//! invocation, deleting every expired entry encountered. Cost is
//! proportional to storage size, appropriate for smaller stores.

use std::hash::Hash;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::Value;
use crate::clock::SharedClock;
use crate::gc::GarbageCollector;
use crate::storage::{with_interruption, Storage};

// == Total GC ==
/// Single unbounded full-sweep strategy.
pub struct TotalGc<K, T> {
    storage: Arc<dyn Storage<K, Value<T>>>,
    clock: SharedClock,
}

impl<K, T> TotalGc<K, T> {
    // == Constructor ==
    /// Creates a total GC over shared storage and clock.
    pub fn new(storage: Arc<dyn Storage<K, Value<T>>>, clock: SharedClock) -> Self {
        Self { storage, clock }
    }
}

impl<K, T> GarbageCollector for TotalGc<K, T>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn clean(&self, token: &CancellationToken) {
        let mut iterated = 0usize;
        let mut expired = 0usize;

        {
            let mut wrapped = with_interruption(token, |key: &K, value: &Value<T>| {
                if value.is_expired(self.clock.as_ref()) {
                    self.storage.delete(key);
                    expired += 1;
                }

                iterated += 1;
                true
            });
            self.storage.iterate(&mut wrapped);
        }

        debug!(iterated, expired, "total GC sweep finished");
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::gc::testing::CountingStorage;
    use crate::storage::ConcurrentHashMap;
    use std::time::{Duration, SystemTime};

    fn epoch_plus(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_total_gc_deletes_exactly_the_expired_subset() {
        let inner = Arc::new(ConcurrentHashMap::new());
        let clock: SharedClock = Arc::new(ManualClock::new(epoch_plus(100)));

        for i in 0..25 {
            inner.set(format!("dead{}", i), Value::new(i, Some(epoch_plus(10))));
        }
        for i in 0..25 {
            inner.set(format!("live{}", i), Value::new(i, Some(epoch_plus(1_000))));
        }
        for i in 0..25 {
            inner.set(format!("eternal{}", i), Value::new(i, None));
        }

        let gc = TotalGc::new(
            inner.clone() as Arc<dyn Storage<String, Value<i32>>>,
            clock,
        );
        gc.clean(&CancellationToken::new());

        assert_eq!(inner.len(), 50);
        for i in 0..25 {
            assert!(inner.get(&format!("dead{}", i)).is_none());
            assert!(inner.get(&format!("live{}", i)).is_some());
            assert!(inner.get(&format!("eternal{}", i)).is_some());
        }
    }

    #[test]
    fn test_total_gc_issues_one_pass_per_invocation() {
        let inner = Arc::new(ConcurrentHashMap::new());
        let storage = Arc::new(CountingStorage::new(inner.clone()));
        let clock: SharedClock = Arc::new(ManualClock::new(epoch_plus(100)));

        for i in 0..100 {
            inner.set(format!("key{}", i), Value::new(i, Some(epoch_plus(10))));
        }

        let gc = TotalGc::new(
            storage.clone() as Arc<dyn Storage<String, Value<i32>>>,
            clock,
        );
        gc.clean(&CancellationToken::new());
        gc.clean(&CancellationToken::new());

        assert_eq!(storage.iterate_calls(), 2);
        assert!(inner.is_empty());
    }

    #[test]
    fn test_total_gc_on_empty_storage() {
        let inner: Arc<ConcurrentHashMap<String, Value<i32>>> = Arc::new(ConcurrentHashMap::new());
        let clock: SharedClock = Arc::new(ManualClock::new(epoch_plus(100)));

        let gc = TotalGc::new(
            inner.clone() as Arc<dyn Storage<String, Value<i32>>>,
            clock,
        );
        gc.clean(&CancellationToken::new());

        assert!(inner.is_empty());
    }

    #[test]
    fn test_total_gc_cancelled_token_stops_sweep() {
        let inner = Arc::new(ConcurrentHashMap::new());
        let clock: SharedClock = Arc::new(ManualClock::new(epoch_plus(100)));

        for i in 0..100 {
            inner.set(format!("key{}", i), Value::new(i, Some(epoch_plus(10))));
        }

        let token = CancellationToken::new();
        token.cancel();

        let gc = TotalGc::new(
            inner.clone() as Arc<dyn Storage<String, Value<i32>>>,
            clock,
        );
        gc.clean(&token);

        // Nothing was visited, so nothing was deleted.
        assert_eq!(inner.len(), 100);
    }
}
