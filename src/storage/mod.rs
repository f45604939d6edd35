//! Storage Module
//!
//! The contract the cache and GC strategies require from the underlying
//! concurrent key/value storage engine, plus the default implementation.

mod concurrent_map;

pub use concurrent_map::ConcurrentHashMap;

use tokio_util::sync::CancellationToken;

// == Storage Trait ==
/// Thread-safe key/value storage with a full-iteration primitive.
///
/// The cache facade and every GC strategy hold a shared reference to one
/// storage instance; they are collaborators, not owners. All methods must be
/// safe for concurrent invocation from any number of foreground callers plus
/// the background GC task.
pub trait Storage<K, V>: Send + Sync {
    /// Fetches the value for a key, or None if absent.
    fn get(&self, key: &K) -> Option<V>;

    /// Inserts or replaces the value for a key.
    fn set(&self, key: K, value: V);

    /// Removes a key. No-op if the key is absent.
    fn delete(&self, key: &K);

    /// Visits all current entries in unspecified order, invoking the handler
    /// per entry. Stops early and returns false if the handler returns false
    /// for any entry; returns true after visiting all entries.
    ///
    /// Implementations must tolerate handler-triggered `delete` calls on the
    /// currently-visited or other keys without corrupting the scan. There is
    /// no guarantee such deletions affect the current scan's enumeration.
    fn iterate(&self, handler: &mut dyn FnMut(&K, &V) -> bool) -> bool;
}

// == Interruption Wrapper ==
/// Wraps an iteration handler so a fired cancellation token stops iteration.
///
/// The token is checked before every entry, not once per pass, so an
/// in-progress scan over a large store responds to cancellation within at
/// most one entry's processing time. Once the token fires, the inner handler
/// is no longer invoked.
pub fn with_interruption<'a, K, V, H>(
    token: &'a CancellationToken,
    mut handler: H,
) -> impl FnMut(&K, &V) -> bool + 'a
where
    H: FnMut(&K, &V) -> bool + 'a,
{
    move |key: &K, value: &V| {
        if token.is_cancelled() {
            return false;
        }
        handler(key, value)
    }
}
