//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache read operations.
///
/// Both variants are ordinary, recoverable outcomes of a read; callers are
/// expected to branch on them rather than treat them as fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// Key never existed or was already removed
    #[error("key missed")]
    KeyMissed,

    /// Key exists in storage but its expiration instant has passed
    #[error("key expired")]
    KeyExpired,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
