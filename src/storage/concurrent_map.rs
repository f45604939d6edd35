//! Concurrent Hash Map Module
//!
//! Default storage implementation: a fixed array of hash-routed shards, each
//! guarded by its own read/write lock.

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use parking_lot::RwLock;

use crate::storage::Storage;

// == Constants ==
/// Default number of shards.
const DEFAULT_SHARD_COUNT: usize = 16;

// == Concurrent Hash Map ==
/// Sharded in-memory key/value map safe for concurrent access.
///
/// Each key is routed to one shard by hash; operations lock only that shard.
/// `iterate` snapshots one shard at a time and invokes the handler outside
/// the shard lock, so handlers may freely call `delete` mid-scan. An entry
/// deleted during a scan may still be delivered from the snapshot taken
/// before the deletion.
///
/// Snapshot cost is per shard touched: a scan that stops after a few
/// entries still clones every entry of the shard it stopped in, so one
/// bounded sweep pass costs O(shard size), not O(entries visited).
pub struct ConcurrentHashMap<K, V> {
    shards: Box<[RwLock<HashMap<K, V>>]>,
    hasher: RandomState,
}

impl<K: Eq + Hash, V> ConcurrentHashMap<K, V> {
    // == Constructors ==
    /// Creates a map with the default shard count.
    pub fn new() -> Self {
        Self::with_shard_count(DEFAULT_SHARD_COUNT)
    }

    /// Creates a map with the given shard count (minimum 1).
    pub fn with_shard_count(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        let shards = (0..shard_count)
            .map(|_| RwLock::new(HashMap::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            shards,
            hasher: RandomState::new(),
        }
    }

    // == Shard Routing ==
    fn shard_for(&self, key: &K) -> &RwLock<HashMap<K, V>> {
        let hash = self.hasher.hash_one(key);
        &self.shards[hash as usize % self.shards.len()]
    }

    // == Length ==
    /// Returns the current number of entries across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    /// Returns true if no shard holds any entry.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }
}

impl<K: Eq + Hash, V> Default for ConcurrentHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Storage Implementation ==
impl<K, V> Storage<K, V> for ConcurrentHashMap<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        self.shard_for(key).read().get(key).cloned()
    }

    fn set(&self, key: K, value: V) {
        self.shard_for(&key).write().insert(key, value);
    }

    fn delete(&self, key: &K) {
        self.shard_for(key).write().remove(key);
    }

    fn iterate(&self, handler: &mut dyn FnMut(&K, &V) -> bool) -> bool {
        for shard in self.shards.iter() {
            // Snapshot the shard so the handler can mutate storage without
            // holding the shard lock.
            let entries: Vec<(K, V)> = shard
                .read()
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();

            for (key, value) in &entries {
                if !handler(key, value) {
                    return false;
                }
            }
        }

        true
    }
}
