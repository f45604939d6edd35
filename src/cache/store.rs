//! Cache Facade Module
//!
//! Orchestrates get/set/delete against shared storage, applying lazy expiry
//! on the read path.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::cache::Value;
use crate::clock::{SharedClock, SystemClock};
use crate::error::{CacheError, Result};
use crate::storage::{with_interruption, ConcurrentHashMap, Storage};

// == Cache ==
/// In-memory key/value cache with per-entry TTL expiration.
///
/// The cache holds shared references to its storage and clock; GC strategies
/// constructed over the same storage and clock reclaim expired entries in the
/// background, while the read path judges expiry lazily against the clock.
pub struct Cache<K, T> {
    storage: Arc<dyn Storage<K, Value<T>>>,
    clock: SharedClock,
}

impl<K, T> Clone for Cache<K, T> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<K, T> Cache<K, T>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache over a fresh [`ConcurrentHashMap`] and the system
    /// clock.
    pub fn new() -> Self {
        Self::with_parts(Arc::new(ConcurrentHashMap::new()), Arc::new(SystemClock))
    }

    /// Creates a cache over explicitly injected storage and clock.
    ///
    /// Pass the same storage and clock to a GC strategy to have background
    /// sweeps reclaim this cache's expired entries.
    pub fn with_parts(storage: Arc<dyn Storage<K, Value<T>>>, clock: SharedClock) -> Self {
        Self { storage, clock }
    }

    // == Get ==
    /// Retrieves the payload for a key.
    ///
    /// Fails with [`CacheError::KeyMissed`] if the key is absent and with
    /// [`CacheError::KeyExpired`] if the stored value's expiration instant
    /// has passed. An expired entry is left in storage; this is purely a
    /// read-side judgment with no side effect.
    pub fn get(&self, key: &K) -> Result<T> {
        let value = self.storage.get(key).ok_or(CacheError::KeyMissed)?;
        if value.is_expired(self.clock.as_ref()) {
            return Err(CacheError::KeyExpired);
        }

        Ok(value.data)
    }

    // == Get With GC ==
    /// Retrieves the payload for a key, deleting the entry if it expired.
    ///
    /// Identical to [`Cache::get`], except an expired entry is additionally
    /// removed from storage before the error is returned. This couples lazy
    /// reclamation to read traffic as a complement to background sweeps.
    pub fn get_with_gc(&self, key: &K) -> Result<T> {
        match self.get(key) {
            Err(CacheError::KeyExpired) => {
                self.storage.delete(key);
                Err(CacheError::KeyExpired)
            }
            result => result,
        }
    }

    // == Set ==
    /// Stores a payload under a key with the given TTL.
    ///
    /// A zero TTL means the value never expires. Any existing entry for the
    /// key is overwritten.
    pub fn set(&self, key: K, data: T, ttl: Duration) {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Some(self.clock.now() + ttl)
        };

        self.storage.set(key, Value::new(data, expires_at));
    }

    // == Delete ==
    /// Removes a key unconditionally. No error if the key is absent.
    pub fn delete(&self, key: &K) {
        self.storage.delete(key);
    }

    // == Iterate ==
    /// Visits all live entries, skipping expired ones.
    ///
    /// Expired entries are filtered out before the handler sees them but are
    /// left in storage. Returns false if the handler requested an early stop
    /// or the token fired mid-scan, true if iteration completed.
    pub fn iterate<H>(&self, token: &CancellationToken, handler: H) -> bool
    where
        H: FnMut(&K, &T) -> bool,
    {
        self.iterate_with_expired_handler(token, handler, |_key| {})
    }

    // == Iterate With GC ==
    /// Visits all live entries, deleting expired ones as a side effect.
    ///
    /// Like [`Cache::iterate`], but each expired entry encountered during the
    /// scan is removed from storage.
    pub fn iterate_with_gc<H>(&self, token: &CancellationToken, handler: H) -> bool
    where
        H: FnMut(&K, &T) -> bool,
    {
        self.iterate_with_expired_handler(token, handler, |key| self.storage.delete(key))
    }

    fn iterate_with_expired_handler<H, E>(
        &self,
        token: &CancellationToken,
        mut handler: H,
        expired_handler: E,
    ) -> bool
    where
        H: FnMut(&K, &T) -> bool,
        E: Fn(&K),
    {
        let clock = self.clock.as_ref();
        let filtered = |key: &K, value: &Value<T>| -> bool {
            if value.is_expired(clock) {
                expired_handler(key);
                return true;
            }

            handler(key, &value.data)
        };

        let mut wrapped = with_interruption(token, filtered);
        self.storage.iterate(&mut wrapped)
    }
}

impl<K, T> Default for Cache<K, T>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
