//! Cache Value Module
//!
//! Defines the wrapper pairing a payload with its expiration instant.

use std::time::SystemTime;

use crate::clock::Clock;

// == Value ==
/// A stored payload together with its absolute expiration instant.
///
/// `expires_at` of `None` means the value never expires. Values are
/// immutable once stored; a `set` on the same key replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value<T> {
    /// The stored payload
    pub data: T,
    /// Absolute expiration instant, None = no expiration
    pub expires_at: Option<SystemTime>,
}

impl<T> Value<T> {
    // == Constructor ==
    /// Creates a value with an optional expiration instant.
    pub fn new(data: T, expires_at: Option<SystemTime>) -> Self {
        Self { data, expires_at }
    }

    // == Is Expired ==
    /// Checks whether the value has expired as of the given clock.
    ///
    /// A value is expired iff it carries an expiration instant and the clock
    /// reading is strictly after it; at exactly the expiration instant the
    /// value is still live. Values without an expiration instant never
    /// expire.
    ///
    /// This predicate is the single expiry authority: the read path and both
    /// GC sweeps all judge expiry through it.
    pub fn is_expired(&self, clock: &dyn Clock) -> bool {
        match self.expires_at {
            Some(expires_at) => clock.now() > expires_at,
            None => false,
        }
    }
}
